//! Emergency contacts owned by users.

use sqlx::QueryBuilder;

use super::DbPool;
use crate::{Result, SirenError};

/// Emergency contact entity.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EmergencyContact {
    /// Unique contact ID.
    pub id: i64,
    /// Owning user ID.
    pub user_id: i64,
    /// Contact name.
    pub name: String,
    /// Relationship to the user.
    pub relationship: String,
    /// Phone number.
    pub phone_number: String,
    /// Optional email address.
    pub email: Option<String>,
    /// Optional street address.
    pub address: Option<String>,
}

/// New emergency contact.
#[derive(Debug, Clone)]
pub struct NewEmergencyContact {
    /// Owning user ID.
    pub user_id: i64,
    /// Contact name.
    pub name: String,
    /// Relationship to the user.
    pub relationship: String,
    /// Phone number.
    pub phone_number: String,
    /// Optional email address.
    pub email: Option<String>,
    /// Optional street address.
    pub address: Option<String>,
}

/// Partial contact update.
#[derive(Debug, Clone, Default)]
pub struct ContactUpdate {
    /// New name.
    pub name: Option<String>,
    /// New relationship.
    pub relationship: Option<String>,
    /// New phone number.
    pub phone_number: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New address.
    pub address: Option<String>,
}

/// Repository for emergency contacts.
pub struct ContactRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> ContactRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create an emergency contact.
    pub async fn create(&self, new_contact: &NewEmergencyContact) -> Result<EmergencyContact> {
        let result = sqlx::query(
            "INSERT INTO emergency_contacts (user_id, name, relationship, phone_number, email, address)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(new_contact.user_id)
        .bind(&new_contact.name)
        .bind(&new_contact.relationship)
        .bind(&new_contact.phone_number)
        .bind(&new_contact.email)
        .bind(&new_contact.address)
        .execute(self.pool)
        .await
        .map_err(|e| SirenError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| SirenError::NotFound("emergency contact".to_string()))
    }

    /// Get a contact by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<EmergencyContact>> {
        let result = sqlx::query_as::<_, EmergencyContact>(
            "SELECT id, user_id, name, relationship, phone_number, email, address
             FROM emergency_contacts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| SirenError::Database(e.to_string()))?;

        Ok(result)
    }

    /// List contacts owned by a user.
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<EmergencyContact>> {
        let result = sqlx::query_as::<_, EmergencyContact>(
            "SELECT id, user_id, name, relationship, phone_number, email, address
             FROM emergency_contacts WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await
        .map_err(|e| SirenError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Update a contact by ID.
    pub async fn update(&self, id: i64, update: &ContactUpdate) -> Result<EmergencyContact> {
        let mut builder = QueryBuilder::new("UPDATE emergency_contacts SET ");
        let mut separated = builder.separated(", ");
        let mut any = false;

        if let Some(ref name) = update.name {
            separated.push("name = ").push_bind_unseparated(name);
            any = true;
        }
        if let Some(ref relationship) = update.relationship {
            separated.push("relationship = ").push_bind_unseparated(relationship);
            any = true;
        }
        if let Some(ref phone_number) = update.phone_number {
            separated.push("phone_number = ").push_bind_unseparated(phone_number);
            any = true;
        }
        if let Some(ref email) = update.email {
            separated.push("email = ").push_bind_unseparated(email);
            any = true;
        }
        if let Some(ref address) = update.address {
            separated.push("address = ").push_bind_unseparated(address);
            any = true;
        }

        if any {
            builder.push(" WHERE id = ").push_bind(id);
            builder
                .build()
                .execute(self.pool)
                .await
                .map_err(|e| SirenError::Database(e.to_string()))?;
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| SirenError::NotFound("emergency contact".to_string()))
    }

    /// Delete a contact by ID.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM emergency_contacts WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| SirenError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, NewUser, UserRepository};

    async fn setup_db() -> Database {
        let db = Database::open_in_memory().await.unwrap();
        UserRepository::new(db.pool())
            .create(&NewUser::new(
                "Jane",
                "Doe",
                "jane@example.com",
                "1234567890",
                "hash",
            ))
            .await
            .unwrap();
        db
    }

    fn sample_contact(user_id: i64) -> NewEmergencyContact {
        NewEmergencyContact {
            user_id,
            name: "John Doe".to_string(),
            relationship: "brother".to_string(),
            phone_number: "0987654321".to_string(),
            email: None,
            address: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let db = setup_db().await;
        let repo = ContactRepository::new(db.pool());

        let contact = repo.create(&sample_contact(1)).await.unwrap();
        assert_eq!(contact.relationship, "brother");

        let contacts = repo.list_for_user(1).await.unwrap();
        assert_eq!(contacts.len(), 1);
        assert!(repo.list_for_user(2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_contact() {
        let db = setup_db().await;
        let repo = ContactRepository::new(db.pool());
        let contact = repo.create(&sample_contact(1)).await.unwrap();

        let updated = repo
            .update(
                contact.id,
                &ContactUpdate {
                    phone_number: Some("1112223333".to_string()),
                    email: Some("john@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.phone_number, "1112223333");
        assert_eq!(updated.email.as_deref(), Some("john@example.com"));
        assert_eq!(updated.name, "John Doe");
    }

    #[tokio::test]
    async fn test_delete_contact() {
        let db = setup_db().await;
        let repo = ContactRepository::new(db.pool());
        let contact = repo.create(&sample_contact(1)).await.unwrap();

        assert!(repo.delete(contact.id).await.unwrap());
        assert!(repo.get_by_id(contact.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cascade_on_user_delete() {
        let db = setup_db().await;
        let repo = ContactRepository::new(db.pool());
        repo.create(&sample_contact(1)).await.unwrap();

        UserRepository::new(db.pool()).delete(1).await.unwrap();
        assert!(repo.list_for_user(1).await.unwrap().is_empty());
    }
}
