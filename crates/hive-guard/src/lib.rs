//! # hive-guard
//!
//! Gates access to an operation by required permission label before any
//! business logic runs.
//!
//! Two distinct failures are modeled: [`GuardError::Unauthenticated`] when no
//! verified claims set exists at all (missing or invalid token), and
//! [`GuardError::Forbidden`] when a valid identity lacks the required rights.
//! The reserved `"super"` label satisfies every requirement, with one
//! exception: granting or modifying `"super"` itself is covered by the
//! privilege-escalation guard, which is checked inside the lifecycle services
//! in addition to the route-level permission requirement.

use hive_token::Claims;
use thiserror::Error;

/// The reserved escalation-capable permission label.
pub const SUPER_PERMISSION: &str = "super";

/// Authorization failures.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GuardError {
    /// No verified claims set: missing, invalid, or expired token.
    #[error("authentication required")]
    Unauthenticated,

    /// Valid identity, insufficient rights.
    #[error("insufficient permissions")]
    Forbidden,
}

/// Check that the caller holds the required permission label.
///
/// `claims` of `None` means the request carried no verifiable token and is
/// always `Unauthenticated`, never `Forbidden`.
pub fn authorize(claims: Option<&Claims>, required: &str) -> Result<(), GuardError> {
    let claims = claims.ok_or(GuardError::Unauthenticated)?;

    if claims.has_permission(required) || claims.has_permission(SUPER_PERMISSION) {
        return Ok(());
    }

    tracing::debug!(
        subject = %claims.sub,
        required,
        "permission check failed"
    );
    Err(GuardError::Forbidden)
}

/// Privilege-escalation guard: an operation that would grant or modify the
/// `"super"` label on any principal requires the caller to already hold
/// `"super"`, independent of the route-level requirement.
pub fn guard_escalation(claims: &Claims, requested: &[String]) -> Result<(), GuardError> {
    if requested.iter().any(|p| p == SUPER_PERMISSION)
        && !claims.has_permission(SUPER_PERMISSION)
    {
        tracing::warn!(subject = %claims.sub, "blocked attempt to grant super");
        return Err(GuardError::Forbidden);
    }
    Ok(())
}
