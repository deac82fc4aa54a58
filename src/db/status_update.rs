//! Status-update audit trail for reports.

use super::report::ReportStatus;
use super::DbPool;
use crate::{Result, SirenError};

/// A single status transition in a report's audit trail.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StatusUpdate {
    /// Unique row ID.
    pub id: i64,
    /// Report this transition belongs to.
    pub report_id: i64,
    /// Admin user who made the transition.
    pub updated_by: i64,
    /// Status set by this transition.
    pub status: String,
    /// Transition timestamp.
    pub created_at: String,
}

/// New status transition.
#[derive(Debug, Clone)]
pub struct NewStatusUpdate {
    /// Report being transitioned.
    pub report_id: i64,
    /// Admin user making the transition.
    pub updated_by: i64,
    /// New status.
    pub status: ReportStatus,
}

/// Repository for the append-only status audit trail.
pub struct StatusUpdateRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> StatusUpdateRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Append a status transition.
    ///
    /// The row is only appended when the report exists at commit time; the
    /// insert and the existence check share one transaction so a concurrent
    /// delete cannot leave an orphan row.
    pub async fn append(&self, new_update: &NewStatusUpdate) -> Result<StatusUpdate> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| SirenError::Database(e.to_string()))?;

        let report_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM reports WHERE id = $1)")
                .bind(new_update.report_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| SirenError::Database(e.to_string()))?;

        if !report_exists {
            return Err(SirenError::NotFound("report".to_string()));
        }

        let result = sqlx::query(
            "INSERT INTO status_updates (report_id, updated_by, status) VALUES ($1, $2, $3)",
        )
        .bind(new_update.report_id)
        .bind(new_update.updated_by)
        .bind(new_update.status.as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| SirenError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();

        tx.commit()
            .await
            .map_err(|e| SirenError::Database(e.to_string()))?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| SirenError::NotFound("status update".to_string()))
    }

    /// Get a status update by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<StatusUpdate>> {
        let result = sqlx::query_as::<_, StatusUpdate>(
            "SELECT id, report_id, updated_by, status, created_at
             FROM status_updates WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| SirenError::Database(e.to_string()))?;

        Ok(result)
    }

    /// The latest status transition for a report, if any.
    pub async fn latest_for_report(&self, report_id: i64) -> Result<Option<StatusUpdate>> {
        let result = sqlx::query_as::<_, StatusUpdate>(
            "SELECT id, report_id, updated_by, status, created_at
             FROM status_updates WHERE report_id = $1 ORDER BY id DESC LIMIT 1",
        )
        .bind(report_id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| SirenError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Full audit trail for a report, oldest first.
    pub async fn list_for_report(&self, report_id: i64) -> Result<Vec<StatusUpdate>> {
        let result = sqlx::query_as::<_, StatusUpdate>(
            "SELECT id, report_id, updated_by, status, created_at
             FROM status_updates WHERE report_id = $1 ORDER BY id",
        )
        .bind(report_id)
        .fetch_all(self.pool)
        .await
        .map_err(|e| SirenError::Database(e.to_string()))?;

        Ok(result)
    }
}
