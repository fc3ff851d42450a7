//! Store traits the lifecycle services depend on.

use crate::error::StoreError;
use async_trait::async_trait;
use hive_core::{Admin, AuditRecord, Bot};
use uuid::Uuid;

/// Persistence operations over administrator accounts.
#[async_trait]
pub trait AdminStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Admin>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, StoreError>;

    /// All accounts, newest first, capped at `limit`.
    async fn list_recent(&self, limit: i64) -> Result<Vec<Admin>, StoreError>;

    async fn insert(&self, admin: &Admin) -> Result<(), StoreError>;

    /// Replace the stored record in place.
    async fn save(&self, admin: &Admin) -> Result<(), StoreError>;

    /// Hard removal. Returns whether a record existed.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}

/// Persistence operations over bot instances. Bots are never deleted from
/// the store; the `deleted` status is their terminal form.
#[async_trait]
pub trait BotStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Bot>, StoreError>;

    /// Bots whose status is not `deleted`, newest first, capped at `limit`.
    async fn list_active(&self, limit: i64) -> Result<Vec<Bot>, StoreError>;

    /// Bots discoverable through the public surface: `public == true` and
    /// status `deployed`, capped at `limit`.
    async fn list_public_deployed(&self, limit: i64) -> Result<Vec<Bot>, StoreError>;

    async fn insert(&self, bot: &Bot) -> Result<(), StoreError>;

    /// Replace the stored record in place.
    async fn save(&self, bot: &Bot) -> Result<(), StoreError>;
}

/// Append-only persistence for audit records.
#[async_trait]
pub trait AuditStore: Send + Sync {
    async fn append(&self, record: &AuditRecord) -> Result<(), StoreError>;

    /// Records newest first, capped at `limit`.
    async fn list_recent(&self, limit: i64) -> Result<Vec<AuditRecord>, StoreError>;
}
