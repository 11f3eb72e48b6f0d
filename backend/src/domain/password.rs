//! Salted password hashing for admin credentials.
//!
//! Argon2id via the `password-hash` PHC string format. Hashing happens once
//! at bootstrap (and on future password changes); verification happens on
//! every login.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

/// Error raised when a password cannot be hashed or a stored hash is
/// unparseable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    /// Hashing failed.
    #[error("failed to hash password: {message}")]
    Hash {
        /// Underlying failure description.
        message: String,
    },
    /// The stored hash is not a valid PHC string.
    #[error("stored password hash is malformed: {message}")]
    MalformedHash {
        /// Underlying failure description.
        message: String,
    },
}

/// Hash a raw password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| PasswordHashError::Hash {
            message: err.to_string(),
        })
}

/// Check a raw password against a stored PHC hash.
///
/// A mismatch is `Ok(false)`; only an unparseable stored hash is an error.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, PasswordHashError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|err| PasswordHashError::MalformedHash {
        message: err.to_string(),
    })?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn hash_then_verify_round_trips() {
        let hash = hash_password("Admin@2025").expect("hashing succeeds");
        assert!(verify_password("Admin@2025", &hash).expect("verifiable"));
        assert!(!verify_password("wrong-password", &hash).expect("verifiable"));
    }

    #[rstest]
    fn salts_differ_between_hashes() {
        let first = hash_password("same-password").expect("hashing succeeds");
        let second = hash_password("same-password").expect("hashing succeeds");
        assert_ne!(first, second);
    }

    #[rstest]
    fn malformed_stored_hash_is_an_error() {
        let err = verify_password("anything", "not-a-phc-string").expect_err("must fail");
        assert!(matches!(err, PasswordHashError::MalformedHash { .. }));
    }
}
