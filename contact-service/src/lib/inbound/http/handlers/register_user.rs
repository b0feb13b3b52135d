use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use super::FieldErrors;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UserName;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// Register a user and log them in right away.
pub async fn register_user(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterUserRequest>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let user = state
        .user_service
        .register_user(body.try_into_command()?)
        .await?;

    let token = state
        .authenticator
        .issue_token(user.id)
        .map_err(|e| ApiError::InternalServerError(format!("Token generation failed: {}", e)))?;

    Ok(ApiSuccess::new(StatusCode::OK, TokenResponseData { token }))
}

/// HTTP request body for registration (raw JSON). Missing fields are read as
/// empty strings so they fail validation like empty ones.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterUserRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

impl RegisterUserRequest {
    fn try_into_command(self) -> Result<RegisterUserCommand, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = errors.check("name", "Please input the name", UserName::new(self.name));
        let email = errors.check(
            "email",
            "Please input a valid email",
            EmailAddress::new(self.email),
        );
        let password = errors.check(
            "password",
            "Please input password with minimum 6 characters",
            Password::new(self.password),
        );

        match (name, email, password) {
            (Some(name), Some(email), Some(password)) => {
                Ok(RegisterUserCommand::new(name, email, password))
            }
            _ => Err(errors),
        }
    }
}

/// `{ "token": ... }` returned by registration and login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponseData {
    pub token: String,
}
