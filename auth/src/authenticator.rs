use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::DEFAULT_TOKEN_TTL_SECONDS;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and bearer
/// token issuance/verification.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_ttl_seconds: i64,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed bearer token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator issuing tokens valid for
    /// [`DEFAULT_TOKEN_TTL_SECONDS`].
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            token_ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
        }
    }

    /// Override the lifetime of issued tokens.
    pub fn with_token_ttl(mut self, seconds: i64) -> Self {
        self.token_ttl_seconds = seconds;
        self
    }

    pub fn token_ttl_seconds(&self) -> i64 {
        self.token_ttl_seconds
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token for `user_id`.
    ///
    /// `stored_hash` is `None` when no account matched the login identifier;
    /// the password is then checked against a decoy hash and the call fails
    /// with the same `InvalidCredentials` as a wrong password.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown account or password does not match
    /// * `PasswordError` - Stored hash could not be parsed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: Option<&str>,
        user_id: impl ToString,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = match stored_hash {
            Some(hash) => self.password_hasher.verify(password, hash)?,
            None => self.password_hasher.verify_against_decoy(password),
        };

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.issue_token(user_id)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue a token for `user_id` without password verification.
    ///
    /// Used right after registration, when the caller has just proven the
    /// credentials by creating them.
    ///
    /// # Errors
    /// * `SecretUnavailable` / `EncodingFailed` - Token could not be signed
    pub fn issue_token(&self, user_id: impl ToString) -> Result<String, JwtError> {
        let claims = Claims::for_user(user_id, self.token_ttl_seconds);
        self.jwt_handler.encode(&claims)
    }

    /// Verify a token and return the user id it carries.
    ///
    /// # Errors
    /// * `JwtError` - Token is malformed, tampered, expired, or lacks `user.id`
    pub fn verify_token(&self, token: &str) -> Result<String, JwtError> {
        let claims: Claims = self.jwt_handler.decode(token)?;
        claims.require_user_id().map(str::to_string)
    }
}
