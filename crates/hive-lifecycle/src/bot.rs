//! Bot instance lifecycle: creation, metadata/credential updates, removal
//! flagging, and the read projections.

use crate::error::LifecycleError;
use crate::notify::OrchestrationNotifier;
use crate::secrets::{generate_secret, hash_account_secret};
use crate::slug::slugify;
use chrono::Utc;
use hive_audit::{AuditEntry, AuditRecorder, RequestOrigin};
use hive_core::{
    AuditAction, Bot, BotCredentials, BotDefaults, BotStatus, BotSummary, LifecycleEvent,
    ServiceCredential,
};
use hive_store::BotStore;
use hive_token::Claims;
use std::sync::Arc;
use uuid::Uuid;

const LIST_LIMIT: i64 = 3000;

/// Name of the storage-layer credential generated at creation.
const STORAGE_CREDENTIAL: &str = "storage";

/// Result of a successful bot creation. The account password is plaintext,
/// returned exactly once; only its two-stage hash is stored.
#[derive(Debug, Clone)]
pub struct CreatedBot {
    pub id: Uuid,
    pub slug: String,
    pub url: String,
    pub password: String,
}

/// Requested owner-account credential change on an existing bot.
#[derive(Debug, Clone)]
pub struct CredentialChange {
    pub name: String,
    /// New plaintext secret. Empty means leave the stored hash alone.
    pub password: String,
}

/// Partial update over a bot's mutable metadata and account credentials.
/// `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct BotPatch {
    pub name: Option<String>,
    pub desc: Option<String>,
    pub project_id: Option<String>,
    pub public: Option<bool>,
    pub accounts: Vec<CredentialChange>,
}

/// Lightweight status projection for the polling surface.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BotStatusRow {
    pub id: Uuid,
    pub name: String,
    pub status: BotStatus,
}

/// Service owning every transition of the bot state machine.
#[derive(Clone)]
pub struct BotService {
    store: Arc<dyn BotStore>,
    audit: AuditRecorder,
    notifier: Arc<dyn OrchestrationNotifier>,
    defaults: BotDefaults,
}

impl BotService {
    pub fn new(
        store: Arc<dyn BotStore>,
        audit: AuditRecorder,
        notifier: Arc<dyn OrchestrationNotifier>,
        defaults: BotDefaults,
    ) -> Self {
        Self {
            store,
            audit,
            notifier,
            defaults,
        }
    }

    fn entry(&self, action: AuditAction, actor: &Claims, origin: &RequestOrigin) -> AuditEntry {
        let mut entry = AuditEntry::new(action, "bot").origin(origin);
        if let Ok(id) = Uuid::parse_str(&actor.sub) {
            entry = entry.actor(id);
        }
        entry
    }

    /// Create a bot record in `provisioning` state and poke orchestration.
    ///
    /// Two credentials are generated: a raw storage secret the bot itself
    /// needs at runtime, and an owner account secret stored only as its
    /// two-stage hash. The plaintext account secret goes back to the caller
    /// once.
    pub async fn create(
        &self,
        actor: &Claims,
        name: &str,
        desc: &str,
        owner_email: &str,
        origin: &RequestOrigin,
    ) -> Result<CreatedBot, LifecycleError> {
        let slug = slugify(name);
        let url = format!("https://{slug}.{}", self.defaults.public_domain);

        let storage_secret = generate_secret();
        let account_password = generate_secret();

        let now = Utc::now();
        let bot = Bot {
            id: Uuid::new_v4(),
            name: name.to_string(),
            desc: desc.to_string(),
            project_id: self.defaults.default_project_id.clone(),
            slug: slug.clone(),
            url: url.clone(),
            public: true,
            credentials: BotCredentials {
                databases: vec![ServiceCredential {
                    name: STORAGE_CREDENTIAL.to_string(),
                    password_hash: storage_secret,
                }],
                accounts: vec![ServiceCredential {
                    name: owner_email.to_string(),
                    password_hash: hash_account_secret(&account_password)?,
                }],
            },
            logs: vec![LifecycleEvent::new(
                "created",
                serde_json::json!({ "slug": slug }),
            )],
            status: BotStatus::Provisioning,
            tombstoned: false,
            created_by: Uuid::parse_str(&actor.sub).ok(),
            created_at: now,
            updated_at: now,
            removed_at: None,
        };

        self.store.insert(&bot).await?;

        // The record is committed; a notification failure leaves the bot in
        // `provisioning` for a later retry rather than reversing the create.
        if let Err(err) = self.notifier.bot_created(bot.id).await {
            tracing::warn!(bot = %bot.id, error = %err, "orchestration notify failed");
        }

        tracing::info!(bot = %bot.id, %slug, "bot created");
        let _ = self.audit.record(
            self.entry(AuditAction::BotCreated, actor, origin)
                .target_id(bot.id),
        );

        Ok(CreatedBot {
            id: bot.id,
            slug,
            url,
            password: account_password,
        })
    }

    /// Apply a metadata/credential patch to a settled bot.
    ///
    /// Returns `Ok(false)` without touching the record when the bot is not
    /// in a settled status, or when the patch changes nothing. The slug is
    /// never regenerated on a name edit.
    pub async fn update(
        &self,
        actor: &Claims,
        id: Uuid,
        patch: BotPatch,
        origin: &RequestOrigin,
    ) -> Result<bool, LifecycleError> {
        let mut bot = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(LifecycleError::NotFound)?;

        if !bot.status.is_settled() {
            return Ok(false);
        }

        let mut modified = false;

        if let Some(name) = patch.name {
            if name != bot.name {
                bot.name = name;
                modified = true;
            }
        }
        if let Some(desc) = patch.desc {
            if desc != bot.desc {
                bot.desc = desc;
                modified = true;
            }
        }
        if let Some(project_id) = patch.project_id {
            if project_id != bot.project_id {
                bot.project_id = project_id;
                modified = true;
            }
        }
        if let Some(public) = patch.public {
            if public != bot.public {
                bot.public = public;
                modified = true;
            }
        }

        for change in &patch.accounts {
            if change.password.is_empty() {
                continue;
            }
            // Only existing account credentials are rotated; unknown names
            // are ignored rather than created.
            if let Some(account) = bot
                .credentials
                .accounts
                .iter_mut()
                .find(|a| a.name == change.name)
            {
                account.password_hash = hash_account_secret(&change.password)?;
                modified = true;
            }
        }

        // Nothing to apply is reported as a false result, same as "not
        // ready": no save, no audit.
        if !modified {
            return Ok(false);
        }

        bot.updated_at = Utc::now();
        bot.logs.push(LifecycleEvent::new(
            "updated",
            serde_json::json!({ "adminId": actor.sub }),
        ));
        self.store.save(&bot).await?;

        let _ = self.audit.record(
            self.entry(AuditAction::BotUpdated, actor, origin)
                .target_id(id),
        );
        Ok(true)
    }

    /// Flag a bot for removal. The record survives as a tombstone; actual
    /// teardown is orchestration's job.
    ///
    /// Idempotent: a bot already in `removing` returns `Ok(true)` with no
    /// second audit record or log entry. A bot still provisioning returns
    /// `Ok(false)`.
    pub async fn flag_removal(
        &self,
        actor: &Claims,
        id: Uuid,
        origin: &RequestOrigin,
    ) -> Result<bool, LifecycleError> {
        let mut bot = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(LifecycleError::NotFound)?;

        if bot.status == BotStatus::Removing {
            return Ok(true);
        }
        if !bot.status.is_settled() {
            return Ok(false);
        }

        let now = Utc::now();
        bot.status = BotStatus::Removing;
        bot.tombstoned = true;
        bot.removed_at = Some(now);
        bot.updated_at = now;
        bot.logs.push(LifecycleEvent::new(
            "removal flagged",
            serde_json::json!({ "adminId": actor.sub }),
        ));
        self.store.save(&bot).await?;

        if let Err(err) = self.notifier.bot_removal_flagged(id).await {
            tracing::warn!(bot = %id, error = %err, "orchestration notify failed");
        }

        tracing::info!(bot = %id, "bot flagged for removal");
        let _ = self.audit.record(
            self.entry(AuditAction::BotRemovalFlagged, actor, origin)
                .target_id(id),
        );
        Ok(true)
    }

    /// Full bot record with every credential secret blanked.
    pub async fn get_redacted(&self, id: Uuid) -> Result<Bot, LifecycleError> {
        let mut bot = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(LifecycleError::NotFound)?;
        bot.credentials = bot.credentials.redacted();
        Ok(bot)
    }

    /// Current lifecycle status of one bot.
    pub async fn status(&self, id: Uuid) -> Result<BotStatus, LifecycleError> {
        let bot = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(LifecycleError::NotFound)?;
        Ok(bot.status)
    }

    /// Non-deleted bot summaries, newest first.
    pub async fn list_active(
        &self,
        actor: &Claims,
        origin: &RequestOrigin,
    ) -> Result<Vec<BotSummary>, LifecycleError> {
        let bots = self.store.list_active(LIST_LIMIT).await?;
        let _ = self
            .audit
            .record(self.entry(AuditAction::BotList, actor, origin));
        Ok(bots.iter().map(Bot::summary).collect())
    }

    /// Status rows for the polling surface, newest first.
    pub async fn list_status(
        &self,
        actor: &Claims,
        origin: &RequestOrigin,
    ) -> Result<Vec<BotStatusRow>, LifecycleError> {
        let bots = self.store.list_active(LIST_LIMIT).await?;
        let _ = self
            .audit
            .record(self.entry(AuditAction::BotStatusList, actor, origin));
        Ok(bots
            .iter()
            .map(|b| BotStatusRow {
                id: b.id,
                name: b.name.clone(),
                status: b.status,
            })
            .collect())
    }

    /// Anonymous listing surface: public, deployed bots only, as summaries.
    /// Unaudited, there is no principal to attribute.
    pub async fn list_public(&self) -> Result<Vec<BotSummary>, LifecycleError> {
        let bots = self.store.list_public_deployed(LIST_LIMIT).await?;
        Ok(bots.iter().map(Bot::summary).collect())
    }
}
