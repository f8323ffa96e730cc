//! Session record storage in the `sessions` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use wanderlust_core::error::{AppError, ErrorKind};
use wanderlust_core::result::AppResult;
use wanderlust_entity::session::StoredSession;

use super::SessionBackend;

/// PostgreSQL-backed [`SessionBackend`].
#[derive(Debug, Clone)]
pub struct PgSessionBackend {
    pool: PgPool,
}

impl PgSessionBackend {
    /// Create a new session backend.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionBackend for PgSessionBackend {
    async fn load(&self, id: &str) -> AppResult<Option<StoredSession>> {
        sqlx::query_as::<_, StoredSession>("SELECT * FROM sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load session", e))
    }

    async fn save(&self, record: &StoredSession) -> AppResult<()> {
        sqlx::query(
            r#"INSERT INTO sessions (id, payload, created_at, expires_at, touched_at)
               VALUES ($1, $2, $3, $4, $5)
               ON CONFLICT (id) DO UPDATE
                  SET payload = EXCLUDED.payload,
                      expires_at = EXCLUDED.expires_at,
                      touched_at = EXCLUDED.touched_at"#,
        )
        .bind(&record.id)
        .bind(&record.payload)
        .bind(record.created_at)
        .bind(record.expires_at)
        .bind(record.touched_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to save session", e))?;
        Ok(())
    }

    async fn touch(&self, id: &str, at: DateTime<Utc>) -> AppResult<()> {
        sqlx::query("UPDATE sessions SET touched_at = $2 WHERE id = $1")
            .bind(id)
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to touch session", e))?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete session", e))?;
        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to purge expired sessions", e)
            })?;
        Ok(result.rows_affected())
    }
}
