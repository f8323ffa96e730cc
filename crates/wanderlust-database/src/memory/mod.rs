//! In-memory implementations of every repository trait.
//!
//! Backed by [`dashmap::DashMap`]; all data lives in the process and is lost
//! on restart. Used by the test suites and by `session.store = "memory"`.

mod content;
mod session;
mod user;

use dashmap::DashMap;
use uuid::Uuid;

use wanderlust_entity::listing::{Listing, Review};
use wanderlust_entity::session::StoredSession;
use wanderlust_entity::user::User;

/// A process-local database implementing all repository traits.
#[derive(Debug, Default)]
pub struct MemoryDatabase {
    users: DashMap<Uuid, User>,
    /// Lowercased username to user id, for case-insensitive uniqueness.
    usernames: DashMap<String, Uuid>,
    listings: DashMap<Uuid, Listing>,
    reviews: DashMap<Uuid, Review>,
    sessions: DashMap<String, StoredSession>,
}

impl MemoryDatabase {
    /// Create an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of session records currently held, expired ones included.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    fn username_of(&self, user_id: Uuid) -> String {
        self.users
            .get(&user_id)
            .map(|u| u.username.clone())
            .unwrap_or_default()
    }
}
