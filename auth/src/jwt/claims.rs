use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Lifetime of an issued bearer token.
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 3600;

/// Bearer token claims.
///
/// The identity lives in a nested `user` object (`{"user": {"id": ...}}`) next
/// to the standard `iat`/`exp` timestamps.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Authenticated user reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserClaim>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserClaim {
    pub id: String,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create claims for an authenticated user, expiring `expiration_seconds`
    /// from now.
    pub fn for_user(user_id: impl ToString, expiration_seconds: i64) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::seconds(expiration_seconds);

        Self {
            user: Some(UserClaim {
                id: user_id.to_string(),
            }),
            exp: Some(expiration.timestamp()),
            iat: Some(now.timestamp()),
        }
    }

    /// Set user identity.
    pub fn with_user(mut self, user_id: impl ToString) -> Self {
        self.user = Some(UserClaim {
            id: user_id.to_string(),
        });
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Get the user id carried by the token.
    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.id.as_str())
    }

    /// Get the user id, failing when the claim is absent.
    pub fn require_user_id(&self) -> Result<&str, JwtError> {
        self.user_id()
            .ok_or_else(|| JwtError::MissingClaim("user.id".to_string()))
    }
}
