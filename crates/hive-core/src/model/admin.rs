//! Administrator account records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An administrator account.
///
/// The secret is stored only as an adaptive salted hash. `password_hash` of
/// `None` is the sentinel for "no secret, cannot authenticate".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: Uuid,

    /// Globally unique email address.
    pub email: String,

    /// PHC-formatted hash of the secret, or `None` when authentication is
    /// disabled for this account.
    pub password_hash: Option<String>,

    /// Free-form permission labels. `"super"` is reserved.
    pub permissions: Vec<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub password_changed_at: DateTime<Utc>,
}

impl Admin {
    /// Create a new account with the given hashed secret.
    pub fn new(email: String, password_hash: Option<String>, permissions: Vec<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            permissions,
            created_at: now,
            updated_at: now,
            password_changed_at: now,
        }
    }

    /// Projection safe to return on read paths. Never includes the hash.
    pub fn summary(&self) -> AdminSummary {
        AdminSummary {
            id: self.id,
            email: self.email.clone(),
            permissions: self.permissions.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Listing projection of an administrator account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSummary {
    pub id: Uuid,
    pub email: String,
    pub permissions: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
