use std::sync::Arc;

use async_trait::async_trait;
use chrono::SubsecRound;
use chrono::Utc;

use super::errors::ContactError;
use super::models::Contact;
use super::models::ContactId;
use super::models::CreateContactCommand;
use super::models::UpdateContactCommand;
use super::models::DEFAULT_CONTACT_TYPE;
use super::ports::ContactRepository;
use super::ports::ContactServicePort;
use crate::domain::user::models::UserId;

/// Concrete implementation of ContactServicePort.
///
/// Generic over repository for testability.
pub struct ContactService<CR>
where
    CR: ContactRepository,
{
    contact_repository: Arc<CR>,
}

impl<CR> ContactService<CR>
where
    CR: ContactRepository,
{
    pub fn new(contact_repository: Arc<CR>) -> Self {
        Self { contact_repository }
    }

    /// Load a contact and check it belongs to `requester`.
    async fn owned_contact(
        &self,
        id: ContactId,
        requester: &UserId,
    ) -> Result<Contact, ContactError> {
        let contact = self
            .contact_repository
            .find_by_id(id)
            .await?
            .ok_or(ContactError::NotFound(id))?;

        contact.ensure_owned_by(requester)?;

        Ok(contact)
    }
}

#[async_trait]
impl<CR> ContactServicePort for ContactService<CR>
where
    CR: ContactRepository,
{
    async fn list_contacts(&self, requester: UserId) -> Result<Vec<Contact>, ContactError> {
        self.contact_repository.find_by_owner(requester).await
    }

    async fn create_contact(
        &self,
        command: CreateContactCommand,
        requester: UserId,
    ) -> Result<Contact, ContactError> {
        let contact = Contact {
            id: ContactId::new(),
            owner: requester,
            name: command.name,
            email: command.email,
            phone: command.phone,
            contact_type: command
                .contact_type
                .unwrap_or_else(|| DEFAULT_CONTACT_TYPE.to_string()),
            // Stored timestamps keep microseconds.
            created_at: Utc::now().trunc_subsecs(6),
        };

        self.contact_repository.create(contact).await
    }

    async fn update_contact(
        &self,
        id: ContactId,
        command: UpdateContactCommand,
        requester: UserId,
    ) -> Result<Contact, ContactError> {
        let mut contact = self.owned_contact(id, &requester).await?;

        if command.is_empty() {
            return Ok(contact);
        }

        contact.apply(command)?;
        self.contact_repository.update(contact).await
    }

    async fn delete_contact(&self, id: ContactId, requester: UserId) -> Result<(), ContactError> {
        self.owned_contact(id, &requester).await?;
        self.contact_repository.delete(id).await?;

        tracing::info!(contact_id = %id, user_id = %requester, "Contact removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::contact::models::ContactName;

    mock! {
        pub TestContactRepository {}

        #[async_trait]
        impl ContactRepository for TestContactRepository {
            async fn create(&self, contact: Contact) -> Result<Contact, ContactError>;
            async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>, ContactError>;
            async fn find_by_owner(&self, owner: UserId) -> Result<Vec<Contact>, ContactError>;
            async fn update(&self, contact: Contact) -> Result<Contact, ContactError>;
            async fn delete(&self, id: ContactId) -> Result<(), ContactError>;
        }
    }

    fn stored_contact(owner: UserId) -> Contact {
        Contact {
            id: ContactId::new(),
            owner,
            name: ContactName::new("Bob".to_string()).unwrap(),
            email: Some("bob@x.com".to_string()),
            phone: None,
            contact_type: "personal".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_contact_defaults_type_and_owner() {
        let mut repository = MockTestContactRepository::new();
        let owner = UserId::new();

        repository
            .expect_create()
            .withf(move |contact| {
                contact.owner == owner
                    && contact.name.as_str() == "Bob"
                    && contact.contact_type == "personal"
                    && contact.email.is_none()
            })
            .times(1)
            .returning(|contact| Ok(contact));

        let service = ContactService::new(Arc::new(repository));

        let command = CreateContactCommand {
            name: ContactName::new("Bob".to_string()).unwrap(),
            email: None,
            phone: None,
            contact_type: None,
        };

        let contact = service.create_contact(command, owner).await.unwrap();
        assert_eq!(contact.owner, owner);
        assert_eq!(contact.contact_type, DEFAULT_CONTACT_TYPE);
        assert_eq!(contact.created_at.timestamp_subsec_nanos() % 1_000, 0);
    }

    #[tokio::test]
    async fn test_create_contact_keeps_given_type() {
        let mut repository = MockTestContactRepository::new();

        repository
            .expect_create()
            .times(1)
            .returning(|contact| Ok(contact));

        let service = ContactService::new(Arc::new(repository));

        let command = CreateContactCommand {
            name: ContactName::new("Alice".to_string()).unwrap(),
            email: Some("alice@x.com".to_string()),
            phone: Some("555-0100".to_string()),
            contact_type: Some("professional".to_string()),
        };

        let contact = service
            .create_contact(command, UserId::new())
            .await
            .unwrap();
        assert_eq!(contact.contact_type, "professional");
        assert_eq!(contact.phone.as_deref(), Some("555-0100"));
    }

    #[tokio::test]
    async fn test_list_contacts_is_scoped_to_requester() {
        let mut repository = MockTestContactRepository::new();
        let owner = UserId::new();

        repository
            .expect_find_by_owner()
            .with(eq(owner))
            .times(1)
            .returning(|owner| Ok(vec![stored_contact(owner), stored_contact(owner)]));

        let service = ContactService::new(Arc::new(repository));

        let contacts = service.list_contacts(owner).await.unwrap();
        assert_eq!(contacts.len(), 2);
        assert!(contacts.iter().all(|contact| contact.owner == owner));
    }

    #[tokio::test]
    async fn test_update_contact_success() {
        let mut repository = MockTestContactRepository::new();
        let owner = UserId::new();
        let existing = stored_contact(owner);
        let contact_id = existing.id;

        repository
            .expect_find_by_id()
            .with(eq(contact_id))
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository
            .expect_update()
            .withf(|contact| {
                contact.phone.as_deref() == Some("555-0199")
                    && contact.name.as_str() == "Bob"
                    && contact.email.as_deref() == Some("bob@x.com")
            })
            .times(1)
            .returning(|contact| Ok(contact));

        let service = ContactService::new(Arc::new(repository));

        let command = UpdateContactCommand {
            phone: Some("555-0199".to_string()),
            ..Default::default()
        };

        let contact = service
            .update_contact(contact_id, command, owner)
            .await
            .unwrap();
        assert_eq!(contact.phone.as_deref(), Some("555-0199"));
    }

    #[tokio::test]
    async fn test_update_contact_not_found() {
        let mut repository = MockTestContactRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_update().times(0);

        let service = ContactService::new(Arc::new(repository));

        let result = service
            .update_contact(
                ContactId::new(),
                UpdateContactCommand::default(),
                UserId::new(),
            )
            .await;
        assert!(matches!(result, Err(ContactError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_contact_by_non_owner_is_rejected() {
        let mut repository = MockTestContactRepository::new();
        let existing = stored_contact(UserId::new());
        let contact_id = existing.id;

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository.expect_update().times(0);

        let service = ContactService::new(Arc::new(repository));

        let command = UpdateContactCommand {
            name: Some("   ".to_string()),
            ..Default::default()
        };

        let result = service
            .update_contact(contact_id, command, UserId::new())
            .await;
        assert!(matches!(result, Err(ContactError::NotOwner { .. })));
    }

    #[tokio::test]
    async fn test_update_contact_checks_name_after_ownership() {
        let mut repository = MockTestContactRepository::new();
        let owner = UserId::new();
        let existing = stored_contact(owner);
        let contact_id = existing.id;

        repository
            .expect_find_by_id()
            .times(2)
            .returning(move |_| Ok(Some(existing.clone())));
        repository.expect_update().times(0);

        let service = ContactService::new(Arc::new(repository));
        let blank_name = || UpdateContactCommand {
            name: Some("   ".to_string()),
            ..Default::default()
        };

        let by_owner = service
            .update_contact(contact_id, blank_name(), owner)
            .await;
        assert!(matches!(by_owner, Err(ContactError::InvalidContactName(_))));

        let by_intruder = service
            .update_contact(contact_id, blank_name(), UserId::new())
            .await;
        assert!(matches!(by_intruder, Err(ContactError::NotOwner { .. })));
    }

    #[tokio::test]
    async fn test_update_contact_without_fields_skips_write() {
        let mut repository = MockTestContactRepository::new();
        let owner = UserId::new();
        let existing = stored_contact(owner);
        let contact_id = existing.id;

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository.expect_update().times(0);

        let service = ContactService::new(Arc::new(repository));

        let contact = service
            .update_contact(contact_id, UpdateContactCommand::default(), owner)
            .await
            .unwrap();
        assert_eq!(contact.id, contact_id);
    }

    #[tokio::test]
    async fn test_delete_contact_success() {
        let mut repository = MockTestContactRepository::new();
        let owner = UserId::new();
        let existing = stored_contact(owner);
        let contact_id = existing.id;

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository
            .expect_delete()
            .with(eq(contact_id))
            .times(1)
            .returning(|_| Ok(()));

        let service = ContactService::new(Arc::new(repository));

        assert!(service.delete_contact(contact_id, owner).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_contact_by_non_owner_is_rejected() {
        let mut repository = MockTestContactRepository::new();
        let existing = stored_contact(UserId::new());
        let contact_id = existing.id;

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository.expect_delete().times(0);

        let service = ContactService::new(Arc::new(repository));

        let result = service.delete_contact(contact_id, UserId::new()).await;
        assert!(matches!(result, Err(ContactError::NotOwner { .. })));
    }

    #[tokio::test]
    async fn test_delete_contact_not_found() {
        let mut repository = MockTestContactRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_delete().times(0);

        let service = ContactService::new(Arc::new(repository));

        let result = service
            .delete_contact(ContactId::new(), UserId::new())
            .await;
        assert!(matches!(result, Err(ContactError::NotFound(_))));
    }
}
