use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::contact::errors::ContactError;
use crate::user::errors::UserError;

pub mod authenticate;
pub mod contacts;
pub mod get_current_user;
pub mod register_user;

/// Message returned in place of any internal failure.
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

pub const CONTACT_NAME_MESSAGE: &str = "Please input contact name";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// JSON body extractor whose rejections use the API error shape.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The detail is logged and replaced by a generic message.
    InternalServerError(String),
    BadRequest(String),
    Validation(Vec<FieldError>),
    NotFound(String),
    Unauthorized(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors.0)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed");
                message_response(StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE)
            }
            ApiError::BadRequest(msg) => message_response(StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => message_response(StatusCode::NOT_FOUND, msg),
            ApiError::Unauthorized(msg) => message_response(StatusCode::UNAUTHORIZED, msg),
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ValidationErrorBody { errors }),
            )
                .into_response(),
        }
    }
}

fn message_response(status: StatusCode, msg: impl Into<String>) -> Response {
    (status, Json(MessageResponseData::new(msg))).into_response()
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::EmailAlreadyExists(_) => {
                ApiError::BadRequest("User already exists".to_string())
            }
            UserError::NotFound(_) | UserError::NotFoundByEmail(_) => {
                ApiError::NotFound("User not found".to_string())
            }
            UserError::InvalidName(_)
            | UserError::InvalidEmail(_)
            | UserError::Password(_)
            | UserError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<ContactError> for ApiError {
    fn from(err: ContactError) -> Self {
        match err {
            ContactError::NotFound(_) | ContactError::InvalidContactId(_) => {
                ApiError::NotFound("Contact not found".to_string())
            }
            ContactError::NotOwner { .. } => ApiError::Unauthorized("Unauthorize".to_string()),
            ContactError::InvalidContactName(_) => ApiError::Validation(vec![FieldError::new(
                "name",
                CONTACT_NAME_MESSAGE,
            )]),
            ContactError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

/// `{ "msg": ... }` body used by confirmations and single-message errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponseData {
    pub msg: String,
}

impl MessageResponseData {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationErrorBody {
    pub errors: Vec<FieldError>,
}

/// One failed validation rule on a request body field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub msg: String,
    pub param: String,
    pub location: String,
}

impl FieldError {
    pub fn new(param: &str, msg: &str) -> Self {
        Self {
            msg: msg.to_string(),
            param: param.to_string(),
            location: "body".to_string(),
        }
    }
}

/// Collects field errors in the order the rules are checked.
#[derive(Debug, Default)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `msg` for `param` when `result` is an error; pass the value
    /// through otherwise.
    pub fn check<T, E>(&mut self, param: &str, msg: &str, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(_) => {
                self.0.push(FieldError::new(param, msg));
                None
            }
        }
    }
}
