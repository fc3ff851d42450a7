//! # hive-token
//!
//! Signed, time-bounded bearer tokens binding a principal's identity and
//! permissions to an issuer.
//!
//! Tokens are RS512 JWTs. Issuance requires the RSA private key; verification
//! needs only the public key, so verification-only deployments hold no
//! issuance capability. Verification is stateless and side-effect-free: it
//! never touches persistence.

pub mod claims;
pub mod error;
pub mod keys;
pub mod token;

pub use claims::Claims;
pub use error::TokenError;
pub use keys::{load_private_key, load_public_key, private_key_from_pem, public_key_from_pem};
pub use token::{extract_token, TokenIssuer, TokenVerifier};
