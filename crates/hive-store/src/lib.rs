//! # hive-store
//!
//! Persistence collaborator for the Hive bot-fleet API.
//!
//! The lifecycle services depend only on the `AdminStore` / `BotStore` /
//! `AuditStore` traits. Two backends are provided: `MongoStore` over a
//! MongoDB deployment, and `MemoryStore` for tests and local development.
//! Audit records are append-only at the trait level; no backend exposes a
//! way to mutate or delete one.

pub mod error;
pub mod memory;
pub mod mongo;
pub mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use store::{AdminStore, AuditStore, BotStore};
