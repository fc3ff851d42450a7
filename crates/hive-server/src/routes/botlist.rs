//! Anonymous public bot listing.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use hive_core::BotSummary;

/// Public, deployed bots only. No authentication, no audit record: there is
/// no principal to attribute.
pub async fn public(State(state): State<AppState>) -> Result<Json<Vec<BotSummary>>, ApiError> {
    let bots = state.bots.list_public().await?;
    Ok(Json(bots))
}
