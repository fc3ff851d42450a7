//! One-time secret generation and hashing.
//!
//! Administrator secrets use Argon2id directly. Bot owner-account secrets go
//! through a two-stage scheme: a SHA-256 digest of the plaintext first, then
//! Argon2id over the hex digest. The first stage bounds the input length
//! before the expensive adaptive stage.

use crate::error::LifecycleError;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::distr::{Alphanumeric, SampleString};
use sha2::{Digest, Sha256};

/// Prefix on every operator-issued one-time password, signalling that the
/// recipient must change it.
pub const ONE_TIME_PREFIX: &str = "CHANGE-";

const SECRET_LEN: usize = 10;

/// Freshly-random secret: 10 lowercase alphanumeric characters.
pub fn generate_secret() -> String {
    Alphanumeric
        .sample_string(&mut rand::rng(), SECRET_LEN)
        .to_lowercase()
}

/// One-time password handed to a new or reset administrator account.
/// Returned to the caller exactly once and never persisted in cleartext.
pub fn generate_one_time_password() -> String {
    format!("{ONE_TIME_PREFIX}{}", generate_secret())
}

/// Hash an administrator secret with Argon2id (PHC format, random salt).
pub fn hash_secret(plain: &str) -> Result<String, LifecycleError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| LifecycleError::Hash(e.to_string()))
}

/// Verify an administrator secret against its stored hash.
pub fn verify_secret(plain: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok()
}

/// Two-stage hash for bot owner-account secrets: SHA-256 digest, then
/// Argon2id over the hex digest.
pub fn hash_account_secret(plain: &str) -> Result<String, LifecycleError> {
    hash_secret(&sha256_hex(plain))
}

/// Verify a bot owner-account secret against its two-stage hash.
pub fn verify_account_secret(plain: &str, hash: &str) -> bool {
    verify_secret(&sha256_hex(plain), hash)
}

fn sha256_hex(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}
