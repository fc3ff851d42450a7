//! The verified claims set.

use serde::{Deserialize, Serialize};

/// Decoded payload of a verified token.
///
/// Derived fresh from the token on every request and owned by that request's
/// lifetime; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject principal identifier.
    pub sub: String,

    /// Permission labels held by the principal, in issuance order.
    pub permissions: Vec<String>,

    /// Issuer the token is bound to.
    pub iss: String,

    /// Issued-at, seconds since the Unix epoch.
    pub iat: u64,

    /// Expiry, seconds since the Unix epoch.
    pub exp: u64,
}

impl Claims {
    /// Whether the principal holds the given permission label.
    pub fn has_permission(&self, label: &str) -> bool {
        self.permissions.iter().any(|p| p == label)
    }
}
