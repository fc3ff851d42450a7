//! Route table and handler modules.

use crate::middleware::authenticate;
use crate::state::AppState;
use axum::extract::State;
use axum::routing::{delete, get, post};
use axum::{middleware, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

pub mod admin;
pub mod audits;
pub mod botlist;
pub mod bots;
pub mod creds;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/status", get(status))
        .route("/public", get(botlist::public))
        .route("/admin", get(admin::list))
        .route("/admin/add", post(admin::add))
        .route("/admin/{id}", delete(admin::remove))
        .route("/admin/reset/{id}", post(admin::reset))
        .route("/admin/permissions/{id}", post(admin::permissions))
        .route("/bots", get(bots::list))
        .route("/bots/add", post(bots::add))
        .route("/bots/bot-status", get(bots::status_list))
        .route("/bots/{id}", delete(bots::remove))
        .route("/bot-creds/{id}", get(creds::get_redacted))
        .route("/bot-creds/status/{id}", get(creds::status))
        .route("/bot-creds/save-creds/{id}", post(creds::save))
        .route("/audits", get(audits::list))
        .layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Unauthenticated health check.
async fn status(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({ "ok": true, "environment": state.environment }))
}
