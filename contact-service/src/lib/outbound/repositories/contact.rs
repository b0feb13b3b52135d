use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::contact::errors::ContactError;
use crate::domain::contact::models::Contact;
use crate::domain::contact::models::ContactId;
use crate::domain::contact::models::ContactName;
use crate::domain::contact::ports::ContactRepository;
use crate::domain::user::models::UserId;

pub struct PostgresContactRepository {
    pool: PgPool,
}

impl PostgresContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ContactRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    contact_type: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ContactRow> for Contact {
    type Error = ContactError;

    fn try_from(row: ContactRow) -> Result<Self, Self::Error> {
        Ok(Contact {
            id: ContactId(row.id),
            owner: UserId(row.user_id),
            name: ContactName::new(row.name)?,
            email: row.email,
            phone: row.phone,
            contact_type: row.contact_type,
            created_at: row.created_at,
        })
    }
}

fn database_error(e: sqlx::Error) -> ContactError {
    ContactError::DatabaseError(e.to_string())
}

#[async_trait]
impl ContactRepository for PostgresContactRepository {
    async fn create(&self, contact: Contact) -> Result<Contact, ContactError> {
        sqlx::query(
            r#"
            INSERT INTO contacts (id, user_id, name, email, phone, contact_type, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(contact.id.0)
        .bind(contact.owner.0)
        .bind(contact.name.as_str())
        .bind(contact.email.as_deref())
        .bind(contact.phone.as_deref())
        .bind(&contact.contact_type)
        .bind(contact.created_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(contact)
    }

    async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>, ContactError> {
        let row = sqlx::query_as::<_, ContactRow>(
            r#"
            SELECT id, user_id, name, email, phone, contact_type, created_at
            FROM contacts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Contact::try_from).transpose()
    }

    async fn find_by_owner(&self, owner: UserId) -> Result<Vec<Contact>, ContactError> {
        let rows = sqlx::query_as::<_, ContactRow>(
            r#"
            SELECT id, user_id, name, email, phone, contact_type, created_at
            FROM contacts
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner.0)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(Contact::try_from).collect()
    }

    async fn update(&self, contact: Contact) -> Result<Contact, ContactError> {
        let result = sqlx::query(
            r#"
            UPDATE contacts
            SET name = $2, email = $3, phone = $4, contact_type = $5
            WHERE id = $1
            "#,
        )
        .bind(contact.id.0)
        .bind(contact.name.as_str())
        .bind(contact.email.as_deref())
        .bind(contact.phone.as_deref())
        .bind(&contact.contact_type)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(ContactError::NotFound(contact.id));
        }

        Ok(contact)
    }

    async fn delete(&self, id: ContactId) -> Result<(), ContactError> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(ContactError::NotFound(id));
        }

        Ok(())
    }
}
