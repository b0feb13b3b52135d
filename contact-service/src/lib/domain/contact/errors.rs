use thiserror::Error;

use crate::domain::contact::models::ContactId;
use crate::domain::user::models::UserId;

/// Error type for ContactId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContactIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error type for ContactName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContactNameError {
    #[error("Contact name is empty")]
    Empty,
}

/// Top-level error type for all contact-related operations
#[derive(Debug, Error)]
pub enum ContactError {
    #[error("Invalid contact ID: {0}")]
    InvalidContactId(#[from] ContactIdError),

    #[error("Invalid contact name: {0}")]
    InvalidContactName(#[from] ContactNameError),

    #[error("Contact not found: {0}")]
    NotFound(ContactId),

    #[error("User {user_id} does not own contact {contact_id}")]
    NotOwner {
        contact_id: ContactId,
        user_id: UserId,
    },

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
