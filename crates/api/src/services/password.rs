//! Password generation and hashing.
//!
//! Customers provisioned during order placement get a deterministic initial
//! password derived from their phone number; only the Argon2id hash is ever
//! stored.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Datelike, Utc};
use thiserror::Error;

/// Errors that can occur when hashing or verifying passwords.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// Hashing failed.
    #[error("failed to hash password")]
    Hash,

    /// The password does not match the stored hash.
    #[error("password does not match")]
    Mismatch,
}

/// The initial password for a customer provisioned during order placement:
/// `{phone}@{current year}`.
#[must_use]
pub fn initial_password(phone: &str, at: DateTime<Utc>) -> String {
    format!("{phone}@{}", at.year())
}

/// Hash a password using Argon2id with a random per-record salt.
///
/// # Errors
///
/// Returns `PasswordError::Hash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| PasswordError::Hash)
}

/// Verify a password against a stored PHC hash string.
///
/// # Errors
///
/// Returns `PasswordError::Mismatch` if the hash is unparseable or the
/// password does not match.
pub fn verify_password(password: &str, hash: &str) -> Result<(), PasswordError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordError::Mismatch)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| PasswordError::Mismatch)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_initial_password_format() {
        let at = Utc.with_ymd_and_hms(2026, 5, 2, 9, 0, 0).single().expect("valid timestamp");
        assert_eq!(initial_password("0899136868", at), "0899136868@2026");
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("0899136868@2026").expect("hash");
        assert_ne!(hash, "0899136868@2026");
        assert!(verify_password("0899136868@2026", &hash).is_ok());
        assert!(verify_password("wrong password", &hash).is_err());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("same password").expect("hash");
        let second = hash_password("same password").expect("hash");
        assert_ne!(first, second);
    }
}
