//! The audit recorder.

use crate::origin::RequestOrigin;
use chrono::Utc;
use hive_core::{AuditAction, AuditRecord};
use hive_store::{AuditStore, StoreError};
use std::sync::Arc;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Builder for one audit record.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    action: AuditAction,
    admin_id: Option<Uuid>,
    target: String,
    target_id: Option<Uuid>,
    detail: Option<String>,
    ip: Option<String>,
}

impl AuditEntry {
    pub fn new(action: AuditAction, target: impl Into<String>) -> Self {
        Self {
            action,
            admin_id: None,
            target: target.into(),
            target_id: None,
            detail: None,
            ip: None,
        }
    }

    /// The acting principal.
    pub fn actor(mut self, admin_id: Uuid) -> Self {
        self.admin_id = Some(admin_id);
        self
    }

    pub fn target_id(mut self, id: Uuid) -> Self {
        self.target_id = Some(id);
        self
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Resolve and attach the original-client IP.
    pub fn origin(mut self, origin: &RequestOrigin) -> Self {
        self.ip = origin.client_ip();
        self
    }

    fn into_record(self) -> AuditRecord {
        AuditRecord {
            id: Uuid::new_v4(),
            recorded_at: Utc::now(),
            action: self.action,
            admin_id: self.admin_id,
            target: self.target,
            target_id: self.target_id,
            detail: self.detail,
            ip: self.ip,
        }
    }
}

/// Writes audit records through the append-only store.
#[derive(Clone)]
pub struct AuditRecorder {
    store: Arc<dyn AuditStore>,
}

impl AuditRecorder {
    pub fn new(store: Arc<dyn AuditStore>) -> Self {
        Self { store }
    }

    /// Dispatch an audit write as a detached task.
    ///
    /// The caller gets the task handle back and may await it for a stronger
    /// guarantee, but by default nothing waits: the response can go out
    /// before the record is durable. A write failure is logged with full
    /// detail and swallowed; it never fails the parent operation.
    pub fn record(&self, entry: AuditEntry) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        let record = entry.into_record();
        tokio::spawn(async move {
            let action = record.action;
            if let Err(err) = store.append(&record).await {
                tracing::error!(%action, error = %err, "audit write failed");
            }
        })
    }

    /// Write an audit record and wait for it. Failure is still logged and
    /// swallowed: an audit error must not reverse a committed mutation.
    pub async fn record_now(&self, entry: AuditEntry) {
        let record = entry.into_record();
        let action = record.action;
        if let Err(err) = self.store.append(&record).await {
            tracing::error!(%action, error = %err, "audit write failed");
        }
    }

    /// Recent records, newest first.
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<AuditRecord>, StoreError> {
        self.store.list_recent(limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hive_store::MemoryStore;

    #[tokio::test]
    async fn detached_write_lands_in_the_store() {
        let store = Arc::new(MemoryStore::new());
        let recorder = AuditRecorder::new(store.clone());

        let handle = recorder.record(
            AuditEntry::new(AuditAction::AdminCreated, "admin")
                .actor(Uuid::new_v4())
                .detail("test"),
        );
        handle.await.unwrap();

        let log = store.audit_log();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].action, AuditAction::AdminCreated);
        assert_eq!(log[0].detail.as_deref(), Some("test"));
    }

    #[tokio::test]
    async fn record_now_attaches_the_resolved_ip() {
        let store = Arc::new(MemoryStore::new());
        let recorder = AuditRecorder::new(store.clone());

        let origin = RequestOrigin {
            cdn_client_ip: Some("203.0.113.7".into()),
            forwarded_for: None,
            peer: None,
        };
        recorder
            .record_now(AuditEntry::new(AuditAction::BotCreated, "bot").origin(&origin))
            .await;

        let log = store.audit_log();
        assert_eq!(log[0].ip.as_deref(), Some("203.0.113.7"));
    }

    #[tokio::test]
    async fn listing_returns_newest_first() {
        let store = Arc::new(MemoryStore::new());
        let recorder = AuditRecorder::new(store.clone());

        recorder
            .record_now(AuditEntry::new(AuditAction::AdminCreated, "admin"))
            .await;
        recorder
            .record_now(AuditEntry::new(AuditAction::AdminDeleted, "admin"))
            .await;

        let recent = recorder.list_recent(10).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].action, AuditAction::AdminDeleted);
    }
}
