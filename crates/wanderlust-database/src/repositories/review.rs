//! Review repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use wanderlust_core::error::{AppError, ErrorKind};
use wanderlust_core::result::AppResult;
use wanderlust_entity::listing::{CreateReview, Review};

use super::ReviewRepository;

const SELECT_REVIEW: &str = r#"SELECT r.id, r.listing_id, r.author_id, u.username AS author_username,
       r.rating, r.comment, r.created_at
  FROM reviews r
  JOIN users u ON u.id = r.author_id"#;

/// PostgreSQL-backed [`ReviewRepository`].
#[derive(Debug, Clone)]
pub struct PgReviewRepository {
    pool: PgPool,
}

impl PgReviewRepository {
    /// Create a new review repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    async fn find_by_listing(&self, listing_id: Uuid) -> AppResult<Vec<Review>> {
        sqlx::query_as::<_, Review>(&format!(
            "{SELECT_REVIEW} WHERE r.listing_id = $1 ORDER BY r.created_at ASC"
        ))
        .bind(listing_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list reviews", e))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Review>> {
        sqlx::query_as::<_, Review>(&format!("{SELECT_REVIEW} WHERE r.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find review", e))
    }

    async fn create(&self, input: CreateReview) -> AppResult<Review> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"INSERT INTO reviews (id, listing_id, author_id, rating, comment, created_at)
               VALUES ($1, $2, $3, $4, $5, NOW())"#,
        )
        .bind(id)
        .bind(input.listing_id)
        .bind(input.author_id)
        .bind(input.rating)
        .bind(&input.comment)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create review", e))?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::internal("Review vanished after insert"))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete review", e))?;
        Ok(result.rows_affected() > 0)
    }
}
