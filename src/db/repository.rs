//! User repository for SIREN.
//!
//! CRUD operations for user records.

use sqlx::QueryBuilder;

use super::user::{NewUser, User, UserUpdate};
use super::DbPool;
use crate::{Result, SirenError};

const USER_COLUMNS: &str = "id, first_name, last_name, email, phone_number, password, role,
                            created_at, updated_at";

/// Repository for user CRUD operations.
pub struct UserRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new user in the database.
    ///
    /// Returns the created user with the assigned ID. A unique-constraint
    /// violation surfaces as a database error containing "UNIQUE"; the
    /// caller maps it to a conflict after its own explicit checks.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let result = sqlx::query(
            "INSERT INTO users (first_name, last_name, email, phone_number, password, role)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&new_user.email)
        .bind(&new_user.phone_number)
        .bind(&new_user.password)
        .bind(new_user.role.as_str())
        .execute(self.pool)
        .await
        .map_err(|e| SirenError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| SirenError::NotFound("user".to_string()))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| SirenError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Get a user by email (exact match).
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| SirenError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Get a user by phone number (exact match).
    pub async fn get_by_phone(&self, phone_number: &str) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE phone_number = $1"
        ))
        .bind(phone_number)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| SirenError::Database(e.to_string()))?;

        Ok(result)
    }

    /// List all users ordered by ID.
    pub async fn list_all(&self) -> Result<Vec<User>> {
        let result = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id"
        ))
        .fetch_all(self.pool)
        .await
        .map_err(|e| SirenError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Update a user by ID.
    ///
    /// Only fields that are set in the update will be modified;
    /// `updated_at` is always refreshed.
    pub async fn update(&self, id: i64, update: &UserUpdate) -> Result<User> {
        if update.is_empty() {
            return self
                .get_by_id(id)
                .await?
                .ok_or_else(|| SirenError::NotFound("user".to_string()));
        }

        let mut builder = QueryBuilder::new("UPDATE users SET ");
        let mut separated = builder.separated(", ");

        if let Some(ref first_name) = update.first_name {
            separated.push("first_name = ").push_bind_unseparated(first_name);
        }
        if let Some(ref last_name) = update.last_name {
            separated.push("last_name = ").push_bind_unseparated(last_name);
        }
        if let Some(ref email) = update.email {
            separated.push("email = ").push_bind_unseparated(email);
        }
        if let Some(ref phone_number) = update.phone_number {
            separated.push("phone_number = ").push_bind_unseparated(phone_number);
        }
        if let Some(ref password) = update.password {
            separated.push("password = ").push_bind_unseparated(password);
        }
        if let Some(role) = update.role {
            separated.push("role = ").push_bind_unseparated(role.as_str());
        }
        separated.push("updated_at = datetime('now')");

        builder.push(" WHERE id = ").push_bind(id);

        builder
            .build()
            .execute(self.pool)
            .await
            .map_err(|e| SirenError::Database(e.to_string()))?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| SirenError::NotFound("user".to_string()))
    }

    /// Delete a user by ID.
    ///
    /// Owned reports and emergency contacts cascade at the schema level.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| SirenError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
