//! HTTP error mapping and response envelopes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hive_guard::GuardError;
use hive_lifecycle::LifecycleError;
use serde::Serialize;
use serde_json::json;

/// One failed validation check, named by request field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Everything a handler can fail with, mapped onto the wire envelopes.
#[derive(Debug)]
pub enum ApiError {
    /// No verifiable identity on the request.
    Unauthenticated,
    /// Valid identity, insufficient rights.
    Forbidden,
    /// Request body or parameters failed validation.
    Validation(Vec<FieldError>),
    /// The addressed entity does not exist. Carries the wire error code.
    NotFound(&'static str),
    /// Dependency fault. The detail stays in the server log; the client
    /// gets an opaque envelope.
    Internal(String),
}

impl ApiError {
    pub fn invalid(field: &str, message: &str) -> Self {
        Self::Validation(vec![FieldError {
            field: field.to_string(),
            message: message.to_string(),
        }])
    }
}

impl From<GuardError> for ApiError {
    fn from(err: GuardError) -> Self {
        match err {
            GuardError::Unauthenticated => Self::Unauthenticated,
            GuardError::Forbidden => Self::Forbidden,
        }
    }
}

impl From<LifecycleError> for ApiError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::NotFound => Self::NotFound("NotFound"),
            LifecycleError::Guard(guard) => guard.into(),
            LifecycleError::Store(store) => Self::Internal(store.to_string()),
            LifecycleError::Hash(detail) => Self::Internal(detail),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Unauthenticated" })),
            )
                .into_response(),
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": "InvalidPermissions", "message": "Not allowed" })),
            )
                .into_response(),
            Self::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "ValidatingError",
                    "message": "Request validation failed",
                    "errors": errors,
                })),
            )
                .into_response(),
            Self::NotFound(code) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": code }))).into_response()
            }
            Self::Internal(detail) => {
                tracing::error!(%detail, "request failed on a dependency");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "success": false, "error": "GeneralError" })),
                )
                    .into_response()
            }
        }
    }
}
