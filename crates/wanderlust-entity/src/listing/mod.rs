//! Listings and their reviews.

pub mod model;
pub mod review;

pub use model::{CreateListing, Listing, UpdateListing};
pub use review::{CreateReview, Review};
