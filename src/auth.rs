//! Credential hashing for account secrets.
//!
//! Secrets are stored as Argon2id hashes with a per-secret random salt;
//! plaintext never lands in an `Account`.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

use crate::error::{BankError, Result};

/// Hash a secret using Argon2id with a fresh random salt.
pub fn hash_secret(secret: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map_err(|e| BankError::CredentialHash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a secret against a stored hash. A malformed stored hash counts
/// as a verification failure rather than an error.
pub fn verify_secret(secret: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(secret.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
