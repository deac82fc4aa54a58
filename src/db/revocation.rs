//! Revocation ledger for token invalidation.
//!
//! Tokens are self-contained, so logout and forced session termination are
//! enforced through this append-only ledger: once a jti is recorded here,
//! the token is invalid for the rest of its natural lifetime.

use super::DbPool;
use crate::{Result, SirenError};

/// Repository for the revoked-token ledger.
pub struct RevocationRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> RevocationRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Revoke a token identifier.
    ///
    /// Idempotent: revoking the same jti twice is a no-op, not an error.
    pub async fn revoke(&self, jti: &str) -> Result<()> {
        sqlx::query("INSERT OR IGNORE INTO revoked_tokens (jti) VALUES ($1)")
            .bind(jti)
            .execute(self.pool)
            .await
            .map_err(|e| SirenError::Database(e.to_string()))?;

        Ok(())
    }

    /// Check whether a token identifier has been revoked.
    ///
    /// Consulted on every authenticated request; the jti is the primary
    /// key, so this is an indexed point lookup.
    pub async fn is_revoked(&self, jti: &str) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM revoked_tokens WHERE jti = $1)")
                .bind(jti)
                .fetch_one(self.pool)
                .await
                .map_err(|e| SirenError::Database(e.to_string()))?;

        Ok(exists)
    }

    /// Delete ledger entries older than the given retention window in days.
    ///
    /// An entry only matters while the underlying token could still be
    /// presented, so anything older than the refresh-token lifetime is dead
    /// weight. Returns the number of rows deleted.
    pub async fn cleanup_older_than(&self, days: u64) -> Result<u64> {
        let result = sqlx::query(
            "DELETE FROM revoked_tokens
             WHERE revoked_at < datetime('now', '-' || $1 || ' days')",
        )
        .bind(days as i64)
        .execute(self.pool)
        .await
        .map_err(|e| SirenError::Database(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
