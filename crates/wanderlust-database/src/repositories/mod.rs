//! Repository traits and their PostgreSQL implementations.
//!
//! Each trait is object safe so the HTTP layer can hold an
//! `Arc<dyn ...Repository>` and swap the PostgreSQL backend for the
//! in-memory one in [`crate::memory`].

pub mod listing;
pub mod review;
pub mod session;
pub mod user;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use wanderlust_core::result::AppResult;
use wanderlust_entity::listing::{CreateListing, CreateReview, Listing, Review, UpdateListing};
use wanderlust_entity::session::StoredSession;
use wanderlust_entity::user::{CreateUser, User};

pub use listing::PgListingRepository;
pub use review::PgReviewRepository;
pub use session::PgSessionBackend;
pub use user::PgUserRepository;

/// Account lookups and registration.
#[async_trait]
pub trait UserRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by username (case-insensitive).
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Insert a new user. Fails with `Conflict` when the username is taken.
    async fn create(&self, input: CreateUser) -> AppResult<User>;
}

/// Listing persistence. Returned listings carry their owner's username.
#[async_trait]
pub trait ListingRepository: Send + Sync + std::fmt::Debug + 'static {
    /// All listings, newest first.
    async fn find_all(&self) -> AppResult<Vec<Listing>>;

    /// Find a listing by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Listing>>;

    /// Listings owned by the given user, newest first.
    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Listing>>;

    /// Insert a new listing.
    async fn create(&self, input: CreateListing) -> AppResult<Listing>;

    /// Replace the editable fields of a listing. `None` if it does not exist.
    async fn update(&self, id: Uuid, input: UpdateListing) -> AppResult<Option<Listing>>;

    /// Delete a listing and its reviews. Returns `true` if a row was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Review persistence.
#[async_trait]
pub trait ReviewRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Reviews of a listing, oldest first.
    async fn find_by_listing(&self, listing_id: Uuid) -> AppResult<Vec<Review>>;

    /// Find a review by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Review>>;

    /// Insert a new review.
    async fn create(&self, input: CreateReview) -> AppResult<Review>;

    /// Delete a review. Returns `true` if a row was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Raw session record storage used by the session store adapter.
///
/// Implementations store opaque payloads and never interpret them.
#[async_trait]
pub trait SessionBackend: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch a record by session id, expired or not.
    async fn load(&self, id: &str) -> AppResult<Option<StoredSession>>;

    /// Insert or replace a record.
    async fn save(&self, record: &StoredSession) -> AppResult<()>;

    /// Refresh the touch timestamp of an existing record.
    async fn touch(&self, id: &str, at: DateTime<Utc>) -> AppResult<()>;

    /// Remove a record. Removing a missing record is not an error.
    async fn delete(&self, id: &str) -> AppResult<()>;

    /// Remove every record that expired at or before `now`. Returns the count.
    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64>;
}
