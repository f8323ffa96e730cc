//! Review entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A review left on a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Review {
    /// Unique review identifier.
    pub id: Uuid,
    /// The reviewed listing.
    pub listing_id: Uuid,
    /// The reviewing user.
    pub author_id: Uuid,
    /// Author's username, joined in for display.
    pub author_username: String,
    /// Star rating, 1 to 5.
    pub rating: i32,
    /// Review text.
    pub comment: String,
    /// When the review was written.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReview {
    /// The reviewed listing.
    pub listing_id: Uuid,
    /// The reviewing user.
    pub author_id: Uuid,
    /// Star rating.
    pub rating: i32,
    /// Review text.
    pub comment: String,
}
