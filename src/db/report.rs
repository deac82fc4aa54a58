//! Report model and repository for SIREN.

use std::fmt;
use std::str::FromStr;

use super::DbPool;
use crate::{Result, SirenError};

/// Report triage status.
///
/// Current status is derived from the latest row of the append-only
/// status_updates audit trail; a report with no rows is `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportStatus {
    /// Newly filed, not yet triaged.
    #[default]
    Pending,
    /// An administrator is investigating.
    UnderInvestigation,
    /// Dismissed by an administrator.
    Rejected,
    /// Closed as resolved.
    Resolved,
}

impl ReportStatus {
    /// Database/display string for the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::UnderInvestigation => "under investigation",
            ReportStatus::Rejected => "rejected",
            ReportStatus::Resolved => "resolved",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ReportStatus::Pending),
            "under investigation" => Ok(ReportStatus::UnderInvestigation),
            "rejected" => Ok(ReportStatus::Rejected),
            "resolved" => Ok(ReportStatus::Resolved),
            _ => Err(format!("invalid status: {s}")),
        }
    }
}

/// Incident report entity.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Report {
    /// Unique report ID.
    pub id: i64,
    /// Owning user ID.
    pub user_id: i64,
    /// Incident type.
    pub incident: String,
    /// Detailed description.
    pub details: String,
    /// Latitude at filing time.
    pub latitude: f64,
    /// Longitude at filing time.
    pub longitude: f64,
    /// Creation timestamp.
    pub created_at: String,
}

/// New report data for creation.
#[derive(Debug, Clone)]
pub struct NewReport {
    /// Owning user ID.
    pub user_id: i64,
    /// Incident type.
    pub incident: String,
    /// Detailed description.
    pub details: String,
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
}

/// Partial report update; only set fields are modified.
#[derive(Debug, Clone, Default)]
pub struct ReportUpdate {
    /// New incident type.
    pub incident: Option<String>,
    /// New details.
    pub details: Option<String>,
    /// New latitude.
    pub latitude: Option<f64>,
    /// New longitude.
    pub longitude: Option<f64>,
}

/// Repository for report operations.
pub struct ReportRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> ReportRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new report.
    pub async fn create(&self, new_report: &NewReport) -> Result<Report> {
        let result = sqlx::query(
            "INSERT INTO reports (user_id, incident, details, latitude, longitude)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(new_report.user_id)
        .bind(&new_report.incident)
        .bind(&new_report.details)
        .bind(new_report.latitude)
        .bind(new_report.longitude)
        .execute(self.pool)
        .await
        .map_err(|e| SirenError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| SirenError::NotFound("report".to_string()))
    }

    /// Create a report and its location record atomically.
    ///
    /// Either both rows commit or neither does; any failure mid-sequence
    /// rolls the transaction back.
    pub async fn create_with_location(
        &self,
        new_report: &NewReport,
        address: Option<&str>,
    ) -> Result<Report> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| SirenError::Database(e.to_string()))?;

        let result = sqlx::query(
            "INSERT INTO reports (user_id, incident, details, latitude, longitude)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(new_report.user_id)
        .bind(&new_report.incident)
        .bind(&new_report.details)
        .bind(new_report.latitude)
        .bind(new_report.longitude)
        .execute(&mut *tx)
        .await
        .map_err(|e| SirenError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();

        sqlx::query(
            "INSERT INTO locations (report_id, latitude, longitude, address)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(id)
        .bind(new_report.latitude)
        .bind(new_report.longitude)
        .bind(address)
        .execute(&mut *tx)
        .await
        .map_err(|e| SirenError::Database(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| SirenError::Database(e.to_string()))?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| SirenError::NotFound("report".to_string()))
    }

    /// Get a report by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Report>> {
        let result = sqlx::query_as::<_, Report>(
            "SELECT id, user_id, incident, details, latitude, longitude, created_at
             FROM reports WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| SirenError::Database(e.to_string()))?;

        Ok(result)
    }

    /// List all reports ordered by ID.
    pub async fn list_all(&self) -> Result<Vec<Report>> {
        let result = sqlx::query_as::<_, Report>(
            "SELECT id, user_id, incident, details, latitude, longitude, created_at
             FROM reports ORDER BY id",
        )
        .fetch_all(self.pool)
        .await
        .map_err(|e| SirenError::Database(e.to_string()))?;

        Ok(result)
    }

    /// List reports for one user ordered by ID.
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Report>> {
        let result = sqlx::query_as::<_, Report>(
            "SELECT id, user_id, incident, details, latitude, longitude, created_at
             FROM reports WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await
        .map_err(|e| SirenError::Database(e.to_string()))?;

        Ok(result)
    }

    /// List one page of reports.
    pub async fn list_paginated(&self, offset: i64, limit: i64) -> Result<Vec<Report>> {
        let result = sqlx::query_as::<_, Report>(
            "SELECT id, user_id, incident, details, latitude, longitude, created_at
             FROM reports ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await
        .map_err(|e| SirenError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Total number of reports.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reports")
            .fetch_one(self.pool)
            .await
            .map_err(|e| SirenError::Database(e.to_string()))?;

        Ok(count)
    }

    /// Current status of a report: the latest audit-trail row, or pending.
    pub async fn current_status(&self, report_id: i64) -> Result<ReportStatus> {
        let status: Option<String> = sqlx::query_scalar(
            "SELECT status FROM status_updates
             WHERE report_id = $1 ORDER BY id DESC LIMIT 1",
        )
        .bind(report_id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| SirenError::Database(e.to_string()))?;

        match status {
            Some(s) => s
                .parse()
                .map_err(|e: String| SirenError::Database(e)),
            None => Ok(ReportStatus::Pending),
        }
    }

    /// Update a report by ID.
    pub async fn update(&self, id: i64, update: &ReportUpdate) -> Result<Report> {
        let mut builder = sqlx::QueryBuilder::new("UPDATE reports SET ");
        let mut separated = builder.separated(", ");
        let mut any = false;

        if let Some(ref incident) = update.incident {
            separated.push("incident = ").push_bind_unseparated(incident);
            any = true;
        }
        if let Some(ref details) = update.details {
            separated.push("details = ").push_bind_unseparated(details);
            any = true;
        }
        if let Some(latitude) = update.latitude {
            separated.push("latitude = ").push_bind_unseparated(latitude);
            any = true;
        }
        if let Some(longitude) = update.longitude {
            separated.push("longitude = ").push_bind_unseparated(longitude);
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
            .ok_or_else(|| SirenError::NotFound("report".to_string()))
    }

    /// Delete a report by ID.
    ///
    /// Status updates, media records, and locations cascade at the schema
    /// level.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| SirenError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
