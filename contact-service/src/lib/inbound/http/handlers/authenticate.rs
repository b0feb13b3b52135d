use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::register_user::TokenResponseData;
use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use super::FieldErrors;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Same message for unknown email and wrong password.
const INVALID_CREDENTIAL_MESSAGE: &str = "Invalid Credential";

pub async fn authenticate(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<AuthenticateRequestBody>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let (email, password) = body.validate()?;

    let (user_id, stored_hash) = match state.user_service.get_user_by_email(&email).await {
        Ok(user) => (user.id, Some(user.password_hash)),
        Err(UserError::NotFoundByEmail(_)) => (UserId::new(), None),
        Err(e) => return Err(ApiError::from(e)),
    };

    // Argon2 verification is CPU bound; run it on the blocking pool.
    let authenticator = Arc::clone(&state.authenticator);
    let result = tokio::task::spawn_blocking(move || {
        authenticator.authenticate(&password, stored_hash.as_deref(), user_id)
    })
    .await
    .map_err(|e| ApiError::InternalServerError(format!("Login task failed: {}", e)))?
    .map_err(|e| match e {
        auth::AuthenticationError::InvalidCredentials => {
            ApiError::BadRequest(INVALID_CREDENTIAL_MESSAGE.to_string())
        }
        auth::AuthenticationError::PasswordError(err) => {
            ApiError::InternalServerError(format!("Password verification failed: {}", err))
        }
        auth::AuthenticationError::JwtError(err) => {
            ApiError::InternalServerError(format!("Token generation failed: {}", err))
        }
    })?;

    tracing::debug!(user_id = %user_id, "User logged in");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        TokenResponseData {
            token: result.access_token,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthenticateRequestBody {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

impl AuthenticateRequestBody {
    fn validate(self) -> Result<(EmailAddress, String), FieldErrors> {
        let mut errors = FieldErrors::new();

        let email = errors.check(
            "email",
            "Please input valid email",
            EmailAddress::new(self.email),
        );
        let password = errors.check(
            "password",
            "Please input valid password",
            if self.password.is_empty() {
                Err(())
            } else {
                Ok(self.password)
            },
        );

        match (email, password) {
            (Some(email), Some(password)) => Ok((email, password)),
            _ => Err(errors),
        }
    }
}
