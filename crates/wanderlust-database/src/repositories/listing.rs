//! Listing repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use wanderlust_core::error::{AppError, ErrorKind};
use wanderlust_core::result::AppResult;
use wanderlust_entity::listing::{CreateListing, Listing, UpdateListing};

use super::ListingRepository;

const SELECT_LISTING: &str = r#"SELECT l.id, l.title, l.description, l.image_url, l.price,
       l.location, l.country, l.owner_id, u.username AS owner_username, l.created_at
  FROM listings l
  JOIN users u ON u.id = l.owner_id"#;

/// PostgreSQL-backed [`ListingRepository`].
#[derive(Debug, Clone)]
pub struct PgListingRepository {
    pool: PgPool,
}

impl PgListingRepository {
    /// Create a new listing repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListingRepository for PgListingRepository {
    async fn find_all(&self) -> AppResult<Vec<Listing>> {
        sqlx::query_as::<_, Listing>(&format!("{SELECT_LISTING} ORDER BY l.created_at DESC"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list listings", e))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Listing>> {
        sqlx::query_as::<_, Listing>(&format!("{SELECT_LISTING} WHERE l.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find listing", e))
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Listing>> {
        sqlx::query_as::<_, Listing>(&format!(
            "{SELECT_LISTING} WHERE l.owner_id = $1 ORDER BY l.created_at DESC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list listings by owner", e)
        })
    }

    async fn create(&self, input: CreateListing) -> AppResult<Listing> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"INSERT INTO listings
                   (id, title, description, image_url, price, location, country, owner_id, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW())"#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.image_url)
        .bind(input.price)
        .bind(&input.location)
        .bind(&input.country)
        .bind(input.owner_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create listing", e))?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::internal("Listing vanished after insert"))
    }

    async fn update(&self, id: Uuid, input: UpdateListing) -> AppResult<Option<Listing>> {
        let result = sqlx::query(
            r#"UPDATE listings
                  SET title = $2, description = $3, image_url = $4,
                      price = $5, location = $6, country = $7
                WHERE id = $1"#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.image_url)
        .bind(input.price)
        .bind(&input.location)
        .bind(&input.country)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update listing", e))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM listings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete listing", e))?;
        Ok(result.rows_affected() > 0)
    }
}
