//! Argon2id password hashing and verification.
//!
//! Hashes are stored as PHC strings (salt and parameters included), so the
//! stored value alone is enough to verify a password.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Raised when a digest cannot be produced or parsed.
#[derive(Debug, thiserror::Error)]
#[error("password hashing failed: {0}")]
pub struct PasswordError(String);

impl From<password_hash::Error> for PasswordError {
    fn from(err: password_hash::Error) -> Self {
        PasswordError(err.to_string())
    }
}

/// One-way password digest capability.
///
/// Implementations are CPU-bound; async callers should run them on the
/// blocking pool.
pub trait PasswordHasher: Send + Sync {
    /// Produce a self-describing digest of `plain`.
    fn hash(&self, plain: &str) -> Result<String, PasswordError>;

    /// `Ok(true)` if `plain` matches `digest`, `Ok(false)` if it does not.
    fn verify(&self, plain: &str, digest: &str) -> Result<bool, PasswordError>;
}

/// Argon2id with the library's default parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Hasher;

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, plain: &str) -> Result<String, PasswordError> {
        use argon2::password_hash::PasswordHasher as _;

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default().hash_password(plain.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    fn verify(&self, plain: &str, digest: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(digest)?;
        match Argon2::default().verify_password(plain.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let hasher = Argon2Hasher;
        let hash = hasher.hash("correct-horse-battery-staple").unwrap();

        assert!(hash.starts_with("$argon2id$"), "expected argon2id PHC prefix");
        assert!(hasher.verify("correct-horse-battery-staple", &hash).unwrap());
    }

    #[test]
    fn wrong_password_does_not_verify() {
        let hasher = Argon2Hasher;
        let hash = hasher.hash("real-password").unwrap();
        assert!(!hasher.verify("wrong-password", &hash).unwrap());
    }

    #[test]
    fn salts_differ() {
        let hasher = Argon2Hasher;
        assert_ne!(hasher.hash("same").unwrap(), hasher.hash("same").unwrap());
    }

    #[test]
    fn malformed_digest_is_an_error() {
        assert!(Argon2Hasher.verify("anything", "not-a-phc-string").is_err());
    }
}
