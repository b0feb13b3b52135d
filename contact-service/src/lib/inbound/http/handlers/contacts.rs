use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use super::FieldErrors;
use super::CONTACT_NAME_MESSAGE;
use super::MessageResponseData;
use crate::contact::errors::ContactError;
use crate::domain::contact::models::Contact;
use crate::domain::contact::models::ContactId;
use crate::domain::contact::models::ContactName;
use crate::domain::contact::models::CreateContactCommand;
use crate::domain::contact::models::UpdateContactCommand;
use crate::domain::contact::ports::ContactServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_contacts(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<Vec<ContactResponseData>>, ApiError> {
    let contacts = state.contact_service.list_contacts(current.user_id).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        contacts.iter().map(ContactResponseData::from).collect(),
    ))
}

pub async fn create_contact(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    ApiJson(body): ApiJson<CreateContactRequest>,
) -> Result<ApiSuccess<ContactResponseData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .contact_service
        .create_contact(command, current.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref contact| ApiSuccess::new(StatusCode::OK, contact.into()))
}

/// A request without a JSON body is an empty patch.
pub async fn update_contact(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(contact_id): Path<String>,
    body: Result<Json<UpdateContactRequest>, JsonRejection>,
) -> Result<ApiSuccess<ContactResponseData>, ApiError> {
    let contact_id = parse_contact_id(&contact_id)?;
    let command = match body {
        Ok(Json(body)) => body.into_command(),
        Err(JsonRejection::MissingJsonContentType(_)) => UpdateContactCommand::default(),
        Err(rejection) => return Err(rejection.into()),
    };

    state
        .contact_service
        .update_contact(contact_id, command, current.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref contact| ApiSuccess::new(StatusCode::OK, contact.into()))
}

pub async fn delete_contact(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(contact_id): Path<String>,
) -> Result<ApiSuccess<MessageResponseData>, ApiError> {
    let contact_id = parse_contact_id(&contact_id)?;

    state
        .contact_service
        .delete_contact(contact_id, current.user_id)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageResponseData::new("Contact Removed"),
    ))
}

/// A malformed id can never name a stored contact, so it reads as not found.
fn parse_contact_id(raw: &str) -> Result<ContactId, ApiError> {
    ContactId::from_string(raw)
        .map_err(ContactError::from)
        .map_err(ApiError::from)
}

/// Treat empty strings like absent fields.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateContactRequest {
    #[serde(default)]
    name: String,
    email: Option<String>,
    phone: Option<String>,
    #[serde(rename = "type")]
    contact_type: Option<String>,
}

impl CreateContactRequest {
    fn try_into_command(self) -> Result<CreateContactCommand, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = errors
            .check("name", CONTACT_NAME_MESSAGE, ContactName::new(self.name))
            .ok_or(errors)?;

        Ok(CreateContactCommand {
            name,
            email: non_empty(self.email),
            phone: non_empty(self.phone),
            contact_type: non_empty(self.contact_type),
        })
    }
}

/// Every field is optional; absent or empty fields keep their stored value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateContactRequest {
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    #[serde(rename = "type")]
    contact_type: Option<String>,
}

impl UpdateContactRequest {
    fn into_command(self) -> UpdateContactCommand {
        UpdateContactCommand {
            name: non_empty(self.name),
            email: non_empty(self.email),
            phone: non_empty(self.phone),
            contact_type: non_empty(self.contact_type),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactResponseData {
    pub id: String,
    pub user: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(rename = "type")]
    pub contact_type: String,
    pub date: DateTime<Utc>,
}

impl From<&Contact> for ContactResponseData {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id.to_string(),
            user: contact.owner.to_string(),
            name: contact.name.as_str().to_string(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
            contact_type: contact.contact_type.clone(),
            date: contact.created_at,
        }
    }
}
