//! Password hashing backed by bcrypt.

use std::sync::OnceLock;

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

static DUMMY_HASH: OnceLock<String> = OnceLock::new();

fn dummy_hash() -> &'static str {
    DUMMY_HASH.get_or_init(|| hash("campus-dummy-password", DEFAULT_COST).unwrap_or_default())
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

/// Returns `Ok(false)` on mismatch; errors only when the stored hash is unusable.
pub fn verify_password(password: &str, hashed: &str) -> Result<bool, AppError> {
    verify(password, hashed)
        .map_err(|e| AppError::internal_error(format!("Failed to verify password: {}", e)))
}

/// Spends the same bcrypt work as [`verify_password`] when there is no
/// stored hash to check, so a missing account costs as much as a wrong password.
pub fn verify_dummy_password(password: &str) {
    let _ = verify(password, dummy_hash());
}
