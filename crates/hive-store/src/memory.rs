//! In-memory store for tests and local development.

use crate::error::StoreError;
use crate::store::{AdminStore, AuditStore, BotStore};
use async_trait::async_trait;
use hive_core::{Admin, AuditRecord, Bot, BotStatus};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// Backend holding everything in process memory.
///
/// Mirrors the Mongo adapter's semantics (unique email, newest-first
/// listings) closely enough that the lifecycle tests run against it.
#[derive(Default)]
pub struct MemoryStore {
    admins: RwLock<HashMap<Uuid, Admin>>,
    bots: RwLock<HashMap<Uuid, Bot>>,
    audits: RwLock<Vec<AuditRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every audit record written so far, oldest first.
    pub fn audit_log(&self) -> Vec<AuditRecord> {
        self.audits.read().unwrap().clone()
    }
}

#[async_trait]
impl AdminStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Admin>, StoreError> {
        Ok(self.admins.read().unwrap().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, StoreError> {
        Ok(self
            .admins
            .read()
            .unwrap()
            .values()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<Admin>, StoreError> {
        let mut all: Vec<Admin> = self.admins.read().unwrap().values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all.truncate(limit.max(0) as usize);
        Ok(all)
    }

    async fn insert(&self, admin: &Admin) -> Result<(), StoreError> {
        let mut admins = self.admins.write().unwrap();
        if admins.values().any(|a| a.email == admin.email) {
            return Err(StoreError::DuplicateKey(admin.email.clone()));
        }
        admins.insert(admin.id, admin.clone());
        Ok(())
    }

    async fn save(&self, admin: &Admin) -> Result<(), StoreError> {
        self.admins.write().unwrap().insert(admin.id, admin.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.admins.write().unwrap().remove(&id).is_some())
    }
}

#[async_trait]
impl BotStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Bot>, StoreError> {
        Ok(self.bots.read().unwrap().get(&id).cloned())
    }

    async fn list_active(&self, limit: i64) -> Result<Vec<Bot>, StoreError> {
        let mut active: Vec<Bot> = self
            .bots
            .read()
            .unwrap()
            .values()
            .filter(|b| b.status != BotStatus::Deleted)
            .cloned()
            .collect();
        active.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        active.truncate(limit.max(0) as usize);
        Ok(active)
    }

    async fn list_public_deployed(&self, limit: i64) -> Result<Vec<Bot>, StoreError> {
        let mut listed: Vec<Bot> = self
            .bots
            .read()
            .unwrap()
            .values()
            .filter(|b| b.is_publicly_listed())
            .cloned()
            .collect();
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        listed.truncate(limit.max(0) as usize);
        Ok(listed)
    }

    async fn insert(&self, bot: &Bot) -> Result<(), StoreError> {
        self.bots.write().unwrap().insert(bot.id, bot.clone());
        Ok(())
    }

    async fn save(&self, bot: &Bot) -> Result<(), StoreError> {
        self.bots.write().unwrap().insert(bot.id, bot.clone());
        Ok(())
    }
}

#[async_trait]
impl AuditStore for MemoryStore {
    async fn append(&self, record: &AuditRecord) -> Result<(), StoreError> {
        self.audits.write().unwrap().push(record.clone());
        Ok(())
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<AuditRecord>, StoreError> {
        let mut all = self.audits.read().unwrap().clone();
        all.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        all.truncate(limit.max(0) as usize);
        Ok(all)
    }
}
