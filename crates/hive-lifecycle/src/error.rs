//! Error types for the lifecycle services.

use hive_guard::GuardError;
use hive_store::StoreError;
use thiserror::Error;

/// Faults a lifecycle operation can raise.
///
/// Business rejections are not here: those are `false` results on the
/// operation's return type.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The referenced entity does not exist.
    #[error("entity not found")]
    NotFound,

    /// Authorization failure, including the privilege-escalation guard.
    #[error(transparent)]
    Guard(#[from] GuardError),

    /// The persistence collaborator failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The hashing collaborator failed.
    #[error("secret hashing failed: {0}")]
    Hash(String),
}
