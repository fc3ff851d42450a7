//! RSA key loading for token signing and verification.

use crate::error::TokenError;
use jsonwebtoken::{DecodingKey, EncodingKey};
use std::path::Path;

/// Load an RSA private key from a PEM file.
pub fn load_private_key(path: &Path) -> Result<EncodingKey, TokenError> {
    let pem = std::fs::read(path)
        .map_err(|e| TokenError::InvalidKey(format!("{}: {e}", path.display())))?;
    private_key_from_pem(&pem)
}

/// Load an RSA public key from a PEM file.
pub fn load_public_key(path: &Path) -> Result<DecodingKey, TokenError> {
    let pem = std::fs::read(path)
        .map_err(|e| TokenError::InvalidKey(format!("{}: {e}", path.display())))?;
    public_key_from_pem(&pem)
}

/// Parse an RSA private key from PEM bytes.
pub fn private_key_from_pem(pem: &[u8]) -> Result<EncodingKey, TokenError> {
    EncodingKey::from_rsa_pem(pem).map_err(|e| TokenError::InvalidKey(e.to_string()))
}

/// Parse an RSA public key from PEM bytes.
pub fn public_key_from_pem(pem: &[u8]) -> Result<DecodingKey, TokenError> {
    DecodingKey::from_rsa_pem(pem).map_err(|e| TokenError::InvalidKey(e.to_string()))
}
