//! Administrator account lifecycle.

use crate::error::LifecycleError;
use crate::secrets::{generate_one_time_password, hash_secret};
use chrono::Utc;
use hive_audit::{AuditEntry, AuditRecorder, RequestOrigin};
use hive_core::{Admin, AdminSummary, AuditAction};
use hive_guard::guard_escalation;
use hive_store::{AdminStore, StoreError};
use hive_token::Claims;
use std::sync::Arc;
use uuid::Uuid;

const LIST_LIMIT: i64 = 3000;

/// Result of an account creation attempt.
///
/// A duplicate email is a business rejection, not a fault: `created` is
/// `false` and `password` is empty.
#[derive(Debug, Clone)]
pub struct CreatedAdmin {
    pub created: bool,
    /// One-time plaintext password, returned exactly once. Empty on the
    /// duplicate-email path.
    pub password: String,
    pub id: Option<Uuid>,
}

/// Service owning every mutation of administrator accounts.
#[derive(Clone)]
pub struct AdminService {
    store: Arc<dyn AdminStore>,
    audit: AuditRecorder,
}

impl AdminService {
    pub fn new(store: Arc<dyn AdminStore>, audit: AuditRecorder) -> Self {
        Self { store, audit }
    }

    fn entry(&self, action: AuditAction, actor: &Claims, origin: &RequestOrigin) -> AuditEntry {
        let mut entry = AuditEntry::new(action, "admin").origin(origin);
        if let Ok(id) = Uuid::parse_str(&actor.sub) {
            entry = entry.actor(id);
        }
        entry
    }

    /// Create an account with a fresh one-time password.
    ///
    /// Guarded against privilege escalation: granting `"super"` requires the
    /// caller to hold `"super"`, over and above the route-level requirement.
    pub async fn create(
        &self,
        actor: &Claims,
        email: &str,
        permissions: Vec<String>,
        origin: &RequestOrigin,
    ) -> Result<CreatedAdmin, LifecycleError> {
        guard_escalation(actor, &permissions)?;

        let refused = |detail: &str| {
            let _ = self.audit.record(
                self.entry(AuditAction::AdminCreateFailed, actor, origin)
                    .detail(detail),
            );
            CreatedAdmin {
                created: false,
                password: String::new(),
                id: None,
            }
        };

        if self.store.find_by_email(email).await?.is_some() {
            return Ok(refused("duplicate email"));
        }

        let password = generate_one_time_password();
        let admin = Admin::new(email.to_string(), Some(hash_secret(&password)?), permissions);

        match self.store.insert(&admin).await {
            Ok(()) => {}
            // Lost the race against a concurrent create for the same email;
            // still a business rejection, not a fault.
            Err(StoreError::DuplicateKey(_)) => return Ok(refused("duplicate email")),
            Err(err) => return Err(err.into()),
        }

        tracing::info!(email, admin = %admin.id, "administrator created");
        let _ = self.audit.record(
            self.entry(AuditAction::AdminCreated, actor, origin)
                .target_id(admin.id),
        );

        Ok(CreatedAdmin {
            created: true,
            password,
            id: Some(admin.id),
        })
    }

    /// Hard removal of an account.
    pub async fn delete(
        &self,
        actor: &Claims,
        id: Uuid,
        origin: &RequestOrigin,
    ) -> Result<(), LifecycleError> {
        if !self.store.delete(id).await? {
            return Err(LifecycleError::NotFound);
        }

        tracing::info!(admin = %id, "administrator deleted");
        let _ = self.audit.record(
            self.entry(AuditAction::AdminDeleted, actor, origin)
                .target_id(id),
        );
        Ok(())
    }

    /// Replace the account's permission set wholesale (no merging).
    ///
    /// Escalation-guarded in both directions: granting `"super"` and
    /// touching the permissions of a principal that already holds it each
    /// require the caller to hold `"super"`.
    pub async fn replace_permissions(
        &self,
        actor: &Claims,
        id: Uuid,
        permissions: Vec<String>,
        origin: &RequestOrigin,
    ) -> Result<(), LifecycleError> {
        guard_escalation(actor, &permissions)?;

        let mut admin = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(LifecycleError::NotFound)?;

        guard_escalation(actor, &admin.permissions)?;

        admin.permissions = permissions;
        admin.updated_at = Utc::now();
        self.store.save(&admin).await?;

        let _ = self.audit.record(
            self.entry(AuditAction::AdminPermissions, actor, origin)
                .target_id(id),
        );
        Ok(())
    }

    /// Issue a new one-time password, invalidating the old secret.
    /// The plaintext is returned once and never re-derivable.
    pub async fn reset_password(
        &self,
        actor: &Claims,
        id: Uuid,
        origin: &RequestOrigin,
    ) -> Result<String, LifecycleError> {
        let mut admin = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(LifecycleError::NotFound)?;

        let password = generate_one_time_password();
        let now = Utc::now();
        admin.password_hash = Some(hash_secret(&password)?);
        admin.password_changed_at = now;
        admin.updated_at = now;
        self.store.save(&admin).await?;

        let _ = self.audit.record(
            self.entry(AuditAction::AdminPasswordReset, actor, origin)
                .target_id(id),
        );
        Ok(password)
    }

    /// Email for an account id, `None` when the account no longer exists.
    /// Used to label audit records with something human-readable.
    pub async fn email_of(&self, id: Uuid) -> Result<Option<String>, LifecycleError> {
        Ok(self.store.find_by_id(id).await?.map(|a| a.email))
    }

    /// Account summaries, newest first. Never exposes secret hashes.
    pub async fn list(
        &self,
        actor: &Claims,
        origin: &RequestOrigin,
    ) -> Result<Vec<AdminSummary>, LifecycleError> {
        let admins = self.store.list_recent(LIST_LIMIT).await?;
        let _ = self
            .audit
            .record(self.entry(AuditAction::AdminList, actor, origin));
        Ok(admins.iter().map(Admin::summary).collect())
    }
}
