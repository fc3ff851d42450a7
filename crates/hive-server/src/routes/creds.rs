//! Bot credential routes. All require `admin`.
//!
//! Reads never return a stored secret: full records go out with every
//! credential hash blanked.

use crate::error::ApiError;
use crate::middleware::{require_permission, AuthContext};
use crate::state::AppState;
use crate::validate::parse_id;
use axum::extract::{Path, State};
use axum::{Extension, Json};
use hive_core::Bot;
use hive_lifecycle::{BotPatch, CredentialChange};
use serde::Deserialize;
use serde_json::{json, Value};

const ADMIN_PERMISSION: &str = "admin";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountChange {
    pub name: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SaveCredsRequest {
    pub name: Option<String>,
    pub desc: Option<String>,
    pub project_id: Option<String>,
    pub public: Option<bool>,
    #[serde(default)]
    pub accounts: Vec<AccountChange>,
}

pub async fn get_redacted(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
) -> Result<Json<Bot>, ApiError> {
    require_permission(&ctx, ADMIN_PERMISSION)?;
    let id = parse_id(&id)?;

    let bot = state.bots.get_redacted(id).await?;
    Ok(Json(bot))
}

pub async fn status(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    require_permission(&ctx, ADMIN_PERMISSION)?;
    let id = parse_id(&id)?;

    let status = state.bots.status(id).await?;
    Ok(Json(json!({ "status": status })))
}

/// Patch metadata and rotate account credentials. A bot still provisioning
/// comes back as `success: false` untouched.
pub async fn save(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
    Json(body): Json<SaveCredsRequest>,
) -> Result<Json<Value>, ApiError> {
    let claims = require_permission(&ctx, ADMIN_PERMISSION)?;
    let id = parse_id(&id)?;

    let patch = BotPatch {
        name: body.name,
        desc: body.desc,
        project_id: body.project_id,
        public: body.public,
        accounts: body
            .accounts
            .into_iter()
            .map(|a| CredentialChange {
                name: a.name,
                password: a.password,
            })
            .collect(),
    };

    let applied = state.bots.update(claims, id, patch, &ctx.origin).await?;
    Ok(Json(json!({ "success": applied })))
}
