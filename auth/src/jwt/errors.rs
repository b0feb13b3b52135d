use thiserror::Error;

/// Error type for token signing and verification.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Signing secret is not configured")]
    SecretUnavailable,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Failed to decode token: {0}")]
    DecodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Missing required claim: {0}")]
    MissingClaim(String),
}
