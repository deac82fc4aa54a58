//! Location records for reports.

use sqlx::QueryBuilder;

use super::DbPool;
use crate::{Result, SirenError};

/// Location entity attached to a report.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Location {
    /// Unique location ID.
    pub id: i64,
    /// Report this location belongs to.
    pub report_id: i64,
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
    /// Optional street address.
    pub address: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
}

/// New location record.
#[derive(Debug, Clone)]
pub struct NewLocation {
    /// Report this location belongs to.
    pub report_id: i64,
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
    /// Optional street address.
    pub address: Option<String>,
}

/// Partial location update.
#[derive(Debug, Clone, Default)]
pub struct LocationUpdate {
    /// New latitude.
    pub latitude: Option<f64>,
    /// New longitude.
    pub longitude: Option<f64>,
    /// New address.
    pub address: Option<String>,
}

/// Repository for location records.
pub struct LocationRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> LocationRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a location record.
    pub async fn create(&self, new_location: &NewLocation) -> Result<Location> {
        let result = sqlx::query(
            "INSERT INTO locations (report_id, latitude, longitude, address)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(new_location.report_id)
        .bind(new_location.latitude)
        .bind(new_location.longitude)
        .bind(&new_location.address)
        .execute(self.pool)
        .await
        .map_err(|e| SirenError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| SirenError::NotFound("location".to_string()))
    }

    /// Get a location by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Location>> {
        let result = sqlx::query_as::<_, Location>(
            "SELECT id, report_id, latitude, longitude, address, created_at
             FROM locations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| SirenError::Database(e.to_string()))?;

        Ok(result)
    }

    /// List all locations ordered by ID.
    pub async fn list_all(&self) -> Result<Vec<Location>> {
        let result = sqlx::query_as::<_, Location>(
            "SELECT id, report_id, latitude, longitude, address, created_at
             FROM locations ORDER BY id",
        )
        .fetch_all(self.pool)
        .await
        .map_err(|e| SirenError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Update a location by ID.
    pub async fn update(&self, id: i64, update: &LocationUpdate) -> Result<Location> {
        let mut builder = QueryBuilder::new("UPDATE locations SET ");
        let mut separated = builder.separated(", ");
        let mut any = false;

        if let Some(latitude) = update.latitude {
            separated.push("latitude = ").push_bind_unseparated(latitude);
            any = true;
        }
        if let Some(longitude) = update.longitude {
            separated.push("longitude = ").push_bind_unseparated(longitude);
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
            .ok_or_else(|| SirenError::NotFound("location".to_string()))
    }

    /// Delete a location by ID.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1")
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
    use crate::db::{Database, NewReport, NewUser, ReportRepository, UserRepository};

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
        ReportRepository::new(db.pool())
            .create(&NewReport {
                user_id: 1,
                incident: "flood".to_string(),
                details: "details".to_string(),
                latitude: 0.0,
                longitude: 0.0,
            })
            .await
            .unwrap();
        db
    }

    #[tokio::test]
    async fn test_create_get_update_delete() {
        let db = setup_db().await;
        let repo = LocationRepository::new(db.pool());

        let location = repo
            .create(&NewLocation {
                report_id: 1,
                latitude: -1.2921,
                longitude: 36.8219,
                address: Some("Moi Avenue".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(location.report_id, 1);

        let updated = repo
            .update(
                location.id,
                &LocationUpdate {
                    address: Some("Kenyatta Avenue".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.address.as_deref(), Some("Kenyatta Avenue"));
        assert_eq!(updated.latitude, -1.2921);

        assert!(repo.delete(location.id).await.unwrap());
        assert!(repo.get_by_id(location.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_all() {
        let db = setup_db().await;
        let repo = LocationRepository::new(db.pool());

        for i in 0..2 {
            repo.create(&NewLocation {
                report_id: 1,
                latitude: i as f64,
                longitude: i as f64,
                address: None,
            })
            .await
            .unwrap();
        }

        assert_eq!(repo.list_all().await.unwrap().len(), 2);
    }
}
