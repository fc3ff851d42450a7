//! Administrator account routes. Every one of them requires `super`.

use crate::error::ApiError;
use crate::middleware::AuthContext;
use crate::state::AppState;
use crate::validate::{parse_id, Validator};
use axum::extract::{Path, State};
use axum::{Extension, Json};
use hive_core::AdminSummary;
use hive_guard::SUPER_PERMISSION;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddAdminRequest {
    pub email: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionsRequest {
    pub permissions: Vec<String>,
}

pub async fn add(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(body): Json<AddAdminRequest>,
) -> Result<Json<Value>, ApiError> {
    let claims = crate::middleware::require_permission(&ctx, SUPER_PERMISSION)?;

    let mut v = Validator::new();
    v.email("email", &body.email);
    v.finish()?;

    let created = state
        .admins
        .create(claims, &body.email, body.permissions, &ctx.origin)
        .await?;

    Ok(Json(json!({
        "success": created.created,
        "password": created.password,
    })))
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let claims = crate::middleware::require_permission(&ctx, SUPER_PERMISSION)?;
    let id = parse_id(&id)?;

    state.admins.delete(claims, id, &ctx.origin).await?;
    Ok(Json(json!({ "success": true })))
}

pub async fn reset(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let claims = crate::middleware::require_permission(&ctx, SUPER_PERMISSION)?;
    let id = parse_id(&id)?;

    let password = state.admins.reset_password(claims, id, &ctx.origin).await?;
    Ok(Json(json!({ "success": true, "password": password })))
}

pub async fn permissions(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
    Json(body): Json<PermissionsRequest>,
) -> Result<Json<Value>, ApiError> {
    let claims = crate::middleware::require_permission(&ctx, SUPER_PERMISSION)?;
    let id = parse_id(&id)?;

    state
        .admins
        .replace_permissions(claims, id, body.permissions, &ctx.origin)
        .await?;
    Ok(Json(json!({ "success": true })))
}

pub async fn list(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<Vec<AdminSummary>>, ApiError> {
    let claims = crate::middleware::require_permission(&ctx, SUPER_PERMISSION)?;
    let admins = state.admins.list(claims, &ctx.origin).await?;
    Ok(Json(admins))
}
