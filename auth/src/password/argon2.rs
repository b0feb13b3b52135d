use std::sync::OnceLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::PasswordError;

const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

/// Salted password hashing (Argon2id, default parameters).
///
/// Also keeps a lazily built decoy hash so that a login attempt against an
/// unknown account spends the same work as one against a real account.
#[derive(Default)]
pub struct PasswordHasher {
    decoy_hash: OnceLock<Option<String>>,
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self {
            decoy_hash: OnceLock::new(),
        }
    }

    /// Hash a plaintext password with a freshly generated salt.
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored hash is not a valid PHC string
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Run a verification that always fails, against the decoy hash.
    pub fn verify_against_decoy(&self, password: &str) -> bool {
        let decoy = self
            .decoy_hash
            .get_or_init(|| self.hash(DECOY_PASSWORD).ok());

        match decoy {
            Some(hash) => {
                let _ = self.verify(password, hash);
                false
            }
            None => false,
        }
    }
}
