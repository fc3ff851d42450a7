//! Bot instance records and the lifecycle status enum.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a bot instance.
///
/// `Provisioning` is the implicit initial state. The transitions
/// `provisioning -> deployed | errored` and `removing -> deleted` are driven
/// by the orchestration collaborator; this core only ever moves a bot into
/// `Removing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotStatus {
    Provisioning,
    Deployed,
    Errored,
    Removing,
    Deleted,
}

impl BotStatus {
    /// Whether credential/metadata updates and removal flagging are allowed.
    /// A bot mid-provisioning is not yet ready; `Deleted` is terminal.
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Deployed | Self::Errored | Self::Removing)
    }
}

impl std::fmt::Display for BotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Provisioning => "provisioning",
            Self::Deployed => "deployed",
            Self::Errored => "errored",
            Self::Removing => "removing",
            Self::Deleted => "deleted",
        };
        write!(f, "{s}")
    }
}

/// One named credential within a credential class.
///
/// `password_hash` holds whatever the credential class stores: an adaptive
/// salted hash for account credentials, the raw generated secret for storage
/// credentials the bot itself needs at runtime. Read paths must blank it
/// either way, see [`BotCredentials::redacted`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCredential {
    pub name: String,
    pub password_hash: String,
}

/// Nested service credentials, grouped by credential class.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotCredentials {
    /// Storage-layer credentials (e.g. the bot's own database user).
    pub databases: Vec<ServiceCredential>,
    /// Owner-facing account credentials.
    pub accounts: Vec<ServiceCredential>,
}

impl BotCredentials {
    /// Copy with every stored secret blanked. Applied before any full bot
    /// record leaves the server, regardless of credential class.
    pub fn redacted(&self) -> Self {
        let blank = |creds: &[ServiceCredential]| {
            creds
                .iter()
                .map(|c| ServiceCredential {
                    name: c.name.clone(),
                    password_hash: String::new(),
                })
                .collect()
        };
        Self {
            databases: blank(&self.databases),
            accounts: blank(&self.accounts),
        }
    }
}

/// Append-only lifecycle log entry on a bot record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleEvent {
    pub at: DateTime<Utc>,
    pub message: String,
    #[serde(default)]
    pub context: serde_json::Value,
}

impl LifecycleEvent {
    pub fn new(message: impl Into<String>, context: serde_json::Value) -> Self {
        Self {
            at: Utc::now(),
            message: message.into(),
            context,
        }
    }
}

/// A provisioned (or provisioning) bot instance.
///
/// Bots are never physically deleted: the terminal state is retained with
/// tombstone metadata. The slug is derived from the name once at creation
/// and is not regenerated on later name edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bot {
    pub id: Uuid,
    pub name: String,
    pub desc: String,
    pub project_id: String,

    /// URL-safe slug derived from the name at creation.
    pub slug: String,

    /// Public URL the deployed bot is reachable at.
    pub url: String,

    /// Whether the bot appears on the public listing (only while deployed).
    pub public: bool,

    #[serde(default)]
    pub credentials: BotCredentials,

    /// Append-only lifecycle event log.
    #[serde(default)]
    pub logs: Vec<LifecycleEvent>,

    pub status: BotStatus,

    /// Terminal-intent marker, set when removal is flagged.
    #[serde(default)]
    pub tombstoned: bool,

    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub removed_at: Option<DateTime<Utc>>,
}

impl Bot {
    /// Listing projection (no credentials, no logs).
    pub fn summary(&self) -> BotSummary {
        BotSummary {
            id: self.id,
            name: self.name.clone(),
            desc: self.desc.clone(),
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Whether the bot is discoverable through the public listing surface.
    pub fn is_publicly_listed(&self) -> bool {
        self.public && self.status == BotStatus::Deployed
    }
}

/// Listing projection of a bot instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotSummary {
    pub id: Uuid,
    pub name: String,
    pub desc: String,
    pub status: BotStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
