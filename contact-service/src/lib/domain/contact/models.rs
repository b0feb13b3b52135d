use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::contact::errors::ContactError;
use crate::domain::contact::errors::ContactIdError;
use crate::domain::contact::errors::ContactNameError;
use crate::domain::user::models::UserId;

/// Category assigned when a contact is created without one.
pub const DEFAULT_CONTACT_TYPE: &str = "personal";

/// Contact unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContactId(pub Uuid);

impl ContactId {
    /// Generate a new random contact ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a contact ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ContactIdError> {
        Uuid::parse_str(s)
            .map(ContactId)
            .map_err(|e| ContactIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ContactId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Contact name value object (non-blank).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactName(String);

impl ContactName {
    pub fn new(name: String) -> Result<Self, ContactNameError> {
        if name.trim().is_empty() {
            return Err(ContactNameError::Empty);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Contact entry of a user's contact list.
///
/// A contact has exactly one owner for its whole lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub id: ContactId,
    pub owner: UserId,
    pub name: ContactName,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub contact_type: String,
    pub created_at: DateTime<Utc>,
}

impl Contact {
    /// Check that `requester` owns this contact.
    ///
    /// Every read of a single contact and every mutation goes through this
    /// check. A mismatch is an authorization failure, never a not-found.
    ///
    /// # Errors
    /// * `NotOwner` - Contact belongs to another user
    pub fn ensure_owned_by(&self, requester: &UserId) -> Result<(), ContactError> {
        if self.owner == *requester {
            Ok(())
        } else {
            Err(ContactError::NotOwner {
                contact_id: self.id,
                user_id: *requester,
            })
        }
    }

    /// Apply the fields present in `command`, leaving the others untouched.
    ///
    /// Nothing is changed when the new name is blank.
    ///
    /// # Errors
    /// * `InvalidContactName` - Supplied name is blank
    pub fn apply(&mut self, command: UpdateContactCommand) -> Result<(), ContactError> {
        let name = command.name.map(ContactName::new).transpose()?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(email) = command.email {
            self.email = Some(email);
        }
        if let Some(phone) = command.phone {
            self.phone = Some(phone);
        }
        if let Some(contact_type) = command.contact_type {
            self.contact_type = contact_type;
        }
        Ok(())
    }
}

/// Command to create a contact in the requester's list.
#[derive(Debug, Clone)]
pub struct CreateContactCommand {
    pub name: ContactName,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Falls back to [`DEFAULT_CONTACT_TYPE`] when absent.
    pub contact_type: Option<String>,
}

/// Partial update of a contact. Only `Some` fields are applied.
///
/// The name is checked by [`Contact::apply`], after ownership is established.
#[derive(Debug, Clone, Default)]
pub struct UpdateContactCommand {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub contact_type: Option<String>,
}

impl UpdateContactCommand {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.contact_type.is_none()
    }
}
