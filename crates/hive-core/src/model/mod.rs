//! Domain models.
//!
//! Plain serde records persisted in the document store. Wire and storage
//! field names are camelCase, matching the JSON API surface.

pub mod admin;
pub mod audit;
pub mod bot;

pub use admin::{Admin, AdminSummary};
pub use audit::{AuditAction, AuditRecord};
pub use bot::{Bot, BotCredentials, BotStatus, BotSummary, LifecycleEvent, ServiceCredential};
