use async_trait::async_trait;

use crate::domain::contact::errors::ContactError;
use crate::domain::contact::models::Contact;
use crate::domain::contact::models::ContactId;
use crate::domain::contact::models::CreateContactCommand;
use crate::domain::contact::models::UpdateContactCommand;
use crate::domain::user::models::UserId;

/// Port for contact domain service operations.
///
/// Every operation is scoped to the authenticated `requester`.
#[async_trait]
pub trait ContactServicePort: Send + Sync + 'static {
    /// List the requester's contacts, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_contacts(&self, requester: UserId) -> Result<Vec<Contact>, ContactError>;

    /// Create a contact owned by the requester.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_contact(
        &self,
        command: CreateContactCommand,
        requester: UserId,
    ) -> Result<Contact, ContactError>;

    /// Apply a partial update to one of the requester's contacts.
    ///
    /// # Errors
    /// * `NotFound` - Contact does not exist
    /// * `NotOwner` - Contact belongs to another user
    /// * `InvalidContactName` - Supplied name is blank (checked after ownership)
    /// * `DatabaseError` - Database operation failed
    async fn update_contact(
        &self,
        id: ContactId,
        command: UpdateContactCommand,
        requester: UserId,
    ) -> Result<Contact, ContactError>;

    /// Delete one of the requester's contacts.
    ///
    /// # Errors
    /// * `NotFound` - Contact does not exist
    /// * `NotOwner` - Contact belongs to another user
    /// * `DatabaseError` - Database operation failed
    async fn delete_contact(&self, id: ContactId, requester: UserId) -> Result<(), ContactError>;
}

/// Persistence operations for contacts.
#[async_trait]
pub trait ContactRepository: Send + Sync + 'static {
    /// Persist a new contact.
    async fn create(&self, contact: Contact) -> Result<Contact, ContactError>;

    /// Retrieve contact by identifier, regardless of owner.
    async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>, ContactError>;

    /// Retrieve all contacts of `owner`, ordered by `created_at` descending.
    async fn find_by_owner(&self, owner: UserId) -> Result<Vec<Contact>, ContactError>;

    /// Overwrite the mutable fields of an existing contact.
    ///
    /// # Errors
    /// * `NotFound` - Contact vanished since it was read
    async fn update(&self, contact: Contact) -> Result<Contact, ContactError>;

    /// Remove a contact.
    ///
    /// # Errors
    /// * `NotFound` - Contact does not exist
    async fn delete(&self, id: ContactId) -> Result<(), ContactError>;
}
