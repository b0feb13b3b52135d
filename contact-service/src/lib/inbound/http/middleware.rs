use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;

use super::handlers::MessageResponseData;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Header carrying the session token.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Extension type to store the authenticated user ID in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that validates the session token and adds the user to request
/// extensions. Protected handlers never run without it.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let user_id = state
        .authenticator
        .verify_token(token)
        .map_err(|e| {
            tracing::warn!("Token validation failed: {}", e);
            invalid_token()
        })
        .and_then(|user_id| {
            UserId::from_string(&user_id).map_err(|e| {
                tracing::warn!("Failed to parse user ID from token: {}", e);
                invalid_token()
            })
        })?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let value = req
        .headers()
        .get(AUTH_TOKEN_HEADER)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| unauthorized("No token, authorization denied"))?;

    value.to_str().map_err(|_| {
        tracing::warn!("Token header is not visible ASCII");
        invalid_token()
    })
}

fn invalid_token() -> Response {
    unauthorized("Token is not valid")
}

fn unauthorized(msg: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(MessageResponseData::new(msg))).into_response()
}
