//! # hive-core
//!
//! Shared configuration and domain models for the Hive bot-fleet API.
//!
//! This crate holds the plain data types that every other Hive crate works
//! with: administrator accounts, bot instances with their lifecycle status,
//! and immutable audit records. Records carry no behavior beyond pure
//! derivations (redaction, status predicates); all mutation lives in the
//! lifecycle services.

pub mod config;
pub mod model;

pub use config::{
    BotDefaults, ConfigError, HiveConfig, JwtConfig, MongoConfig, OrchestrationConfig,
    ServerConfig,
};
pub use model::{
    Admin, AdminSummary, AuditAction, AuditRecord, Bot, BotCredentials, BotStatus, BotSummary,
    LifecycleEvent, ServiceCredential,
};
