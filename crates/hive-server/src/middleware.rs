//! Request authentication middleware.
//!
//! Every request passes through here. A verifiable token yields a claims set;
//! anything else (no token, bad signature, expired, wrong issuer) yields
//! `None`, and the per-route permission check turns that into the 401/403
//! distinction. The middleware itself never rejects.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use hive_audit::RequestOrigin;
use hive_guard::authorize;
use hive_token::{extract_token, Claims};
use std::net::SocketAddr;

/// Per-request identity and origin, attached as a request extension.
#[derive(Clone)]
pub struct AuthContext {
    pub claims: Option<Claims>,
    pub origin: RequestOrigin,
}

/// Check the route's permission requirement and hand back the claims.
pub fn require_permission<'a>(
    ctx: &'a AuthContext,
    permission: &str,
) -> Result<&'a Claims, ApiError> {
    authorize(ctx.claims.as_ref(), permission)?;
    ctx.claims.as_ref().ok_or(ApiError::Unauthenticated)
}

pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    // Present when the server is driven through connect-info; absent under
    // in-process test harnesses.
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());

    let headers = req.headers();
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string())
    };

    let origin = RequestOrigin {
        cdn_client_ip: header_value("cf-connecting-ip"),
        forwarded_for: header_value("x-forwarded-for"),
        peer,
    };

    let authorization = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    let claims = extract_token(authorization, req.uri().query()).and_then(|token| {
        match state.verifier.verify(&token) {
            Ok(claims) => Some(claims),
            Err(err) => {
                tracing::debug!(error = %err, "token rejected");
                None
            }
        }
    });

    req.extensions_mut().insert(AuthContext { claims, origin });
    next.run(req).await
}
