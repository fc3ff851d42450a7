//! Bot provisioning and listing routes. All require `admin`.

use crate::error::ApiError;
use crate::middleware::{require_permission, AuthContext};
use crate::state::AppState;
use crate::validate::{parse_id, Validator};
use axum::extract::{Path, State};
use axum::{Extension, Json};
use hive_core::BotSummary;
use hive_lifecycle::BotStatusRow;
use serde::Deserialize;
use serde_json::{json, Value};

const ADMIN_PERMISSION: &str = "admin";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddBotRequest {
    pub name: String,
    #[serde(default)]
    pub desc: String,
    pub owner_email: String,
}

pub async fn add(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(body): Json<AddBotRequest>,
) -> Result<Json<Value>, ApiError> {
    let claims = require_permission(&ctx, ADMIN_PERMISSION)?;

    let mut v = Validator::new();
    v.non_empty("name", &body.name)
        .email("ownerEmail", &body.owner_email);
    v.finish()?;

    let created = state
        .bots
        .create(claims, &body.name, &body.desc, &body.owner_email, &ctx.origin)
        .await?;

    Ok(Json(json!({
        "success": true,
        "id": created.id,
        "slug": created.slug,
        "url": created.url,
        "password": created.password,
    })))
}

/// Flag a bot for removal. A bot that is not ready yet comes back as
/// `success: false`; teardown itself happens downstream.
pub async fn remove(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let claims = require_permission(&ctx, ADMIN_PERMISSION)?;
    let id = parse_id(&id)?;

    let flagged = state.bots.flag_removal(claims, id, &ctx.origin).await?;
    Ok(Json(json!({ "success": flagged })))
}

pub async fn list(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<Vec<BotSummary>>, ApiError> {
    let claims = require_permission(&ctx, ADMIN_PERMISSION)?;
    let bots = state.bots.list_active(claims, &ctx.origin).await?;
    Ok(Json(bots))
}

/// Status rows for the dashboard's polling surface.
pub async fn status_list(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<Vec<BotStatusRow>>, ApiError> {
    let claims = require_permission(&ctx, ADMIN_PERMISSION)?;
    let rows = state.bots.list_status(claims, &ctx.origin).await?;
    Ok(Json(rows))
}
