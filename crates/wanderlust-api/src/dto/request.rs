//! Request DTOs with validation.

use serde::{Deserialize, Deserializer};
use uuid::Uuid;
use validator::Validate;

use wanderlust_entity::listing::{CreateListing, UpdateListing};

/// New or edited listing.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ListingForm {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(url(message = "Image must be a valid URL"))]
    pub image_url: Option<String>,
    #[validate(range(min = 0, message = "Price must not be negative"))]
    pub price: i64,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    #[validate(length(min = 1, message = "Country is required"))]
    pub country: String,
}

impl ListingForm {
    pub fn into_create(self, owner_id: Uuid) -> CreateListing {
        CreateListing {
            title: self.title,
            description: self.description,
            image_url: self.image_url,
            price: self.price,
            location: self.location,
            country: self.country,
            owner_id,
        }
    }

    pub fn into_update(self) -> UpdateListing {
        UpdateListing {
            title: self.title,
            description: self.description,
            image_url: self.image_url,
            price: self.price,
            location: self.location,
            country: self.country,
        }
    }
}

/// Review of a listing.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReviewForm {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
    #[validate(length(min = 1, message = "Comment is required"))]
    pub comment: String,
}

/// Signup body. Password policy is enforced at registration.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupForm {
    #[validate(length(min = 1, max = 64, message = "Username is required"))]
    pub username: String,
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Empty or whitespace-only form fields count as absent.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}
