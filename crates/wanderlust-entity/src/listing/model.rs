//! Listing entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A property listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Listing {
    /// Unique listing identifier.
    pub id: Uuid,
    /// Headline.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Optional picture URL.
    pub image_url: Option<String>,
    /// Nightly price in whole currency units.
    pub price: i64,
    /// City or area.
    pub location: String,
    /// Country.
    pub country: String,
    /// The user who created the listing.
    pub owner_id: Uuid,
    /// Owner's username, joined in for display.
    pub owner_username: String,
    /// When the listing was created.
    pub created_at: DateTime<Utc>,
}

impl Listing {
    /// Whether the given user owns this listing.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }
}

/// Data required to create a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateListing {
    /// Headline.
    pub title: String,
    /// Description.
    pub description: String,
    /// Optional picture URL.
    pub image_url: Option<String>,
    /// Nightly price.
    pub price: i64,
    /// City or area.
    pub location: String,
    /// Country.
    pub country: String,
    /// Creating user.
    pub owner_id: Uuid,
}

/// Editable listing fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateListing {
    /// Headline.
    pub title: String,
    /// Description.
    pub description: String,
    /// Optional picture URL.
    pub image_url: Option<String>,
    /// Nightly price.
    pub price: i64,
    /// City or area.
    pub location: String,
    /// Country.
    pub country: String,
}
