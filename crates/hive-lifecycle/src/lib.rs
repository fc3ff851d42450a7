//! # hive-lifecycle
//!
//! Entity lifecycle services: administrator account management and the bot
//! instance state machine.
//!
//! Both services enforce their state invariants, persist the change through
//! the store traits, and trigger exactly one audit record per real mutation.
//! Business rejections (duplicate admin email, bot not yet ready) come back
//! as `false` results, never as errors; only genuine faults propagate.
//!
//! There is no transaction or lock around a read-modify-write sequence on a
//! record: concurrent requests against the same target can race and the last
//! write wins. Accepted at the current scale, revisit before it grows.

pub mod admin;
pub mod bot;
pub mod error;
pub mod notify;
pub mod secrets;
pub mod slug;

pub use admin::{AdminService, CreatedAdmin};
pub use bot::{BotPatch, BotService, BotStatusRow, CreatedBot, CredentialChange};
pub use error::LifecycleError;
pub use notify::{HttpNotifier, NotifyError, NullNotifier, OrchestrationNotifier};
pub use slug::slugify;
