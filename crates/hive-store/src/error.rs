//! Error types for store operations.

use thiserror::Error;

/// Errors that can occur while talking to a persistence backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend rejected or failed the operation.
    #[error("database error: {0}")]
    Database(String),

    /// A record violates a uniqueness constraint.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::{ErrorKind, WriteFailure};

        // E11000 duplicate key surfaces as a write error with code 11000.
        if let ErrorKind::Write(WriteFailure::WriteError(ref we)) = *err.kind {
            if we.code == 11000 {
                return StoreError::DuplicateKey(we.message.clone());
            }
        }
        StoreError::Database(err.to_string())
    }
}
