//! Audit trail read surface. Requires `super`.

use crate::error::ApiError;
use crate::middleware::{require_permission, AuthContext};
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::{Extension, Json};
use hive_audit::AuditEntry;
use hive_core::{AuditAction, AuditRecord};
use hive_guard::SUPER_PERMISSION;
use hive_lifecycle::AdminService;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

const LIMIT_DEFAULT: i64 = 1_000;
const LIMIT_MAX: i64 = 10_000;

#[derive(Deserialize)]
pub struct AuditQuery {
    pub limit: Option<i64>,
}

/// An audit record annotated with resolved account emails. Deleted
/// accounts resolve to `None`; non-admin targets carry no target email.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRow {
    #[serde(flatten)]
    pub record: AuditRecord,
    pub admin_email: Option<String>,
    pub target_email: Option<String>,
}

/// One lookup per distinct id across the page, not per row.
async fn resolve_email(
    admins: &AdminService,
    cache: &mut HashMap<Uuid, Option<String>>,
    id: Uuid,
) -> Result<Option<String>, ApiError> {
    if let Some(email) = cache.get(&id) {
        return Ok(email.clone());
    }
    let email = admins
        .email_of(id)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    cache.insert(id, email.clone());
    Ok(email)
}

/// Recent audit records, newest first, with actor and admin-target ids
/// resolved to their current emails. Reading the trail is itself audited.
pub async fn list(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Query(query): Query<AuditQuery>,
) -> Result<Json<Vec<AuditRow>>, ApiError> {
    let claims = require_permission(&ctx, SUPER_PERMISSION)?;

    let limit = query.limit.unwrap_or(LIMIT_DEFAULT).clamp(1, LIMIT_MAX);
    let records = state
        .audit
        .list_recent(limit)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let mut emails = HashMap::new();
    let mut rows = Vec::with_capacity(records.len());
    for record in records {
        let admin_email = match record.admin_id {
            Some(id) => resolve_email(&state.admins, &mut emails, id).await?,
            None => None,
        };
        let target_email = match (record.target.as_str(), record.target_id) {
            ("admin", Some(id)) => resolve_email(&state.admins, &mut emails, id).await?,
            _ => None,
        };
        rows.push(AuditRow {
            record,
            admin_email,
            target_email,
        });
    }

    let mut entry = AuditEntry::new(AuditAction::AuditList, "audit").origin(&ctx.origin);
    if let Ok(id) = Uuid::parse_str(&claims.sub) {
        entry = entry.actor(id);
    }
    let _ = state.audit.record(entry);

    Ok(Json(rows))
}
