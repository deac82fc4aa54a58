//! Media attachment records for reports.
//!
//! Only the records live here; file storage is an external collaborator.

use super::DbPool;
use crate::{Result, SirenError};

/// Media attachment entity.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MediaAttachment {
    /// Unique attachment ID.
    pub id: i64,
    /// Report this attachment belongs to.
    pub report_id: i64,
    /// URL of the stored file.
    pub file_url: String,
    /// MIME type.
    pub media_type: String,
    /// Upload timestamp.
    pub uploaded_at: String,
}

/// New media attachment record.
#[derive(Debug, Clone)]
pub struct NewMediaAttachment {
    /// Report this attachment belongs to.
    pub report_id: i64,
    /// URL of the stored file.
    pub file_url: String,
    /// MIME type.
    pub media_type: String,
}

/// Repository for media attachment records.
pub struct MediaRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> MediaRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a media attachment record.
    pub async fn create(&self, new_media: &NewMediaAttachment) -> Result<MediaAttachment> {
        let result = sqlx::query(
            "INSERT INTO media_attachments (report_id, file_url, media_type) VALUES ($1, $2, $3)",
        )
        .bind(new_media.report_id)
        .bind(&new_media.file_url)
        .bind(&new_media.media_type)
        .execute(self.pool)
        .await
        .map_err(|e| SirenError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();
        let media = sqlx::query_as::<_, MediaAttachment>(
            "SELECT id, report_id, file_url, media_type, uploaded_at
             FROM media_attachments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| SirenError::Database(e.to_string()))?;

        media.ok_or_else(|| SirenError::NotFound("media attachment".to_string()))
    }

    /// List attachments for a report.
    pub async fn list_for_report(&self, report_id: i64) -> Result<Vec<MediaAttachment>> {
        let result = sqlx::query_as::<_, MediaAttachment>(
            "SELECT id, report_id, file_url, media_type, uploaded_at
             FROM media_attachments WHERE report_id = $1 ORDER BY id",
        )
        .bind(report_id)
        .fetch_all(self.pool)
        .await
        .map_err(|e| SirenError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Delete all attachments for a report. Returns the number deleted.
    pub async fn delete_for_report(&self, report_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM media_attachments WHERE report_id = $1")
            .bind(report_id)
            .execute(self.pool)
            .await
            .map_err(|e| SirenError::Database(e.to_string()))?;

        Ok(result.rows_affected())
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
                incident: "theft".to_string(),
                details: "details".to_string(),
                latitude: 0.0,
                longitude: 0.0,
            })
            .await
            .unwrap();
        db
    }

    #[tokio::test]
    async fn test_create_and_list_media() {
        let db = setup_db().await;
        let repo = MediaRepository::new(db.pool());

        let media = repo
            .create(&NewMediaAttachment {
                report_id: 1,
                file_url: "https://cdn.example.com/a.jpg".to_string(),
                media_type: "image/jpeg".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(media.report_id, 1);
        assert!(!media.uploaded_at.is_empty());

        let list = repo.list_for_report(1).await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].file_url, "https://cdn.example.com/a.jpg");
    }

    #[tokio::test]
    async fn test_delete_for_report() {
        let db = setup_db().await;
        let repo = MediaRepository::new(db.pool());

        for i in 0..3 {
            repo.create(&NewMediaAttachment {
                report_id: 1,
                file_url: format!("https://cdn.example.com/{i}.jpg"),
                media_type: "image/jpeg".to_string(),
            })
            .await
            .unwrap();
        }

        let deleted = repo.delete_for_report(1).await.unwrap();
        assert_eq!(deleted, 3);
        assert!(repo.list_for_report(1).await.unwrap().is_empty());
    }
}
