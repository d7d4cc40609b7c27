//! Shared utilities used across all service domains.
//!
//! Contains identifier generation and the password hash/verify capability.

use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use nanoid::nanoid;
use rand::rngs::OsRng;

use crate::constants::{ID_ALPHABET, USER_ID_LENGTH, VISITOR_ID_LENGTH};
use crate::errors::AppError;

// ============================================================================
// Identifier Generation
// ============================================================================

/// Generate a random alphanumeric token of the given length.
///
/// Tokens are unlikely but not guaranteed to be unique; callers inserting
/// into a table check for collisions themselves.
pub fn generate_id(length: usize) -> String {
    nanoid!(length, &ID_ALPHABET)
}

/// Generate a random short code
pub fn generate_short_code(length: usize) -> String {
    generate_id(length)
}

/// Generate a random user ID
pub fn generate_user_id() -> String {
    generate_id(USER_ID_LENGTH)
}

/// Generate a random visitor ID for visit logs
pub fn generate_visitor_id() -> String {
    generate_id(VISITOR_ID_LENGTH)
}

// ============================================================================
// Password Hashing
// ============================================================================

/// Hash a password with Argon2 and a fresh random salt
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            log::error!("Password hashing failed: {}", e);
            AppError::internal("Failed to hash password")
        })
}

/// Check a password against a stored hash.
///
/// A mismatch is `Ok(false)`; only an unreadable hash or a failure inside the
/// hasher is an error.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(password_hash).map_err(|e| {
        log::error!("Stored password hash could not be parsed: {}", e);
        AppError::internal("Stored password hash is invalid")
    })?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => {
            log::error!("Password verification failed: {}", e);
            Err(AppError::internal("Failed to verify password"))
        }
    }
}
