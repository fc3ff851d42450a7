//! Immutable audit records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The privileged action an audit record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuditAction {
    AdminCreated,
    /// Creation refused as a false result (duplicate email). Labeled
    /// distinctly so a refused attempt never reads as a true success.
    AdminCreateFailed,
    AdminDeleted,
    AdminPasswordReset,
    AdminPermissions,
    AdminList,
    BotCreated,
    BotUpdated,
    BotRemovalFlagged,
    BotList,
    BotStatusList,
    AuditList,
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::AdminCreated => "admin-created",
            Self::AdminCreateFailed => "admin-create-failed",
            Self::AdminDeleted => "admin-deleted",
            Self::AdminPasswordReset => "admin-password-reset",
            Self::AdminPermissions => "admin-permissions",
            Self::AdminList => "admin-list",
            Self::BotCreated => "bot-created",
            Self::BotUpdated => "bot-updated",
            Self::BotRemovalFlagged => "bot-removal-flagged",
            Self::BotList => "bot-list",
            Self::BotStatusList => "bot-status-list",
            Self::AuditList => "audit-list",
        };
        write!(f, "{s}")
    }
}

/// An immutable fact describing a privileged action.
///
/// Written once as a side effect of the action, never mutated or deleted,
/// and never read back by the mutating path itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub action: AuditAction,

    /// The acting principal, when the action was authenticated.
    pub admin_id: Option<Uuid>,

    /// Kind of entity acted on ("admin", "bot", "self").
    pub target: String,
    pub target_id: Option<Uuid>,

    pub detail: Option<String>,

    /// Original-client IP, resolved through the trusted proxy chain.
    pub ip: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_labels_match_the_wire_format() {
        assert_eq!(AuditAction::AdminCreated.to_string(), "admin-created");
        assert_eq!(
            AuditAction::BotRemovalFlagged.to_string(),
            "bot-removal-flagged"
        );
        assert_eq!(
            serde_json::to_string(&AuditAction::AdminPasswordReset).unwrap(),
            "\"admin-password-reset\""
        );
    }

    #[test]
    fn display_agrees_with_serde() {
        for action in [
            AuditAction::AdminCreated,
            AuditAction::AdminCreateFailed,
            AuditAction::AdminDeleted,
            AuditAction::AdminPasswordReset,
            AuditAction::AdminPermissions,
            AuditAction::AdminList,
            AuditAction::BotCreated,
            AuditAction::BotUpdated,
            AuditAction::BotRemovalFlagged,
            AuditAction::BotList,
            AuditAction::BotStatusList,
            AuditAction::AuditList,
        ] {
            let serde_label = serde_json::to_value(action).unwrap();
            assert_eq!(serde_label, action.to_string().as_str());
        }
    }
}
