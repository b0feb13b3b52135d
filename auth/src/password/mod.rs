mod argon2;

use thiserror::Error;

pub use self::argon2::PasswordHasher;

/// Error type for password hashing and verification.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}
