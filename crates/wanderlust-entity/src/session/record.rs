//! Persisted session row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A session as the backend stores it: the payload is opaque ciphertext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct StoredSession {
    /// Session token.
    pub id: String,
    /// Base64 of nonce followed by AES-256-GCM ciphertext of the JSON state.
    pub payload: String,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// Absolute expiry (creation + max age).
    pub expires_at: DateTime<Utc>,
    /// Last time the record was written or touched.
    pub touched_at: DateTime<Utc>,
}

impl StoredSession {
    /// Whether the record has passed its absolute expiry at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
