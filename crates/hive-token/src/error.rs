//! Error types for token operations.

use thiserror::Error;

/// Errors that can occur while issuing or verifying tokens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// No private signing key is configured. Issuance must refuse to run;
    /// verification remains available through the public key alone.
    #[error("no private signing key configured, token issuance is disabled")]
    SigningKeyMissing,

    /// Key material could not be read or parsed.
    #[error("invalid key material: {0}")]
    InvalidKey(String),

    /// Signing failed.
    #[error("failed to sign token: {0}")]
    Signing(String),

    /// The token is malformed, carries a bad signature, or was signed with
    /// an algorithm other than RS512.
    #[error("invalid token")]
    Invalid,

    /// The token's expiry has passed.
    #[error("token has expired")]
    Expired,

    /// The token was issued by a different issuer.
    #[error("token issuer mismatch")]
    WrongIssuer,
}
