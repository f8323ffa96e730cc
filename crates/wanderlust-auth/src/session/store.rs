//! Session store adapter.
//!
//! Wraps a raw [`SessionBackend`] with payload encryption, expiry handling
//! and the touch policy. The request-facing entry points, [`SessionStore::load`]
//! and [`SessionStore::commit`], never fail: store errors go to the
//! [`StoreObserver`] and the request carries on with an in-memory session.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use wanderlust_core::config::SessionConfig;
use wanderlust_core::error::AppError;
use wanderlust_core::result::AppResult;
use wanderlust_database::repositories::SessionBackend;
use wanderlust_entity::session::{SessionData, SessionId, StoredSession};

use super::cipher::PayloadCipher;
use super::model::Session;
use super::observer::{StoreObserver, StoreOperation};

/// What [`SessionStore::commit`] did with a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The full record was written; the cookie must be (re)issued.
    Saved,
    /// Only the touch timestamp was refreshed.
    Touched,
    /// Nothing needed writing.
    Unchanged,
    /// The store rejected the write; already reported to the observer.
    Failed,
}

impl CommitOutcome {
    /// Whether the response should carry a fresh session cookie.
    pub fn issues_cookie(&self) -> bool {
        matches!(self, Self::Saved)
    }
}

/// Persists sessions through a [`SessionBackend`].
#[derive(Debug)]
pub struct SessionStore {
    backend: Arc<dyn SessionBackend>,
    cipher: PayloadCipher,
    observer: Arc<dyn StoreObserver>,
    max_age: Duration,
    touch_after: Duration,
    save_uninitialized: bool,
}

impl SessionStore {
    /// Build a store. The observer is mandatory.
    pub fn new(
        backend: Arc<dyn SessionBackend>,
        config: &SessionConfig,
        observer: Arc<dyn StoreObserver>,
    ) -> AppResult<Self> {
        Ok(Self {
            backend,
            cipher: PayloadCipher::new(&config.secret)?,
            observer,
            max_age: Duration::seconds(config.max_age_seconds()),
            touch_after: Duration::seconds(config.touch_after_seconds as i64),
            save_uninitialized: config.save_uninitialized,
        })
    }

    /// A new, not yet persisted session.
    pub fn create(&self) -> Session {
        Session::fresh(self.max_age, Utc::now())
    }

    /// Read a live session. Expired records are deleted and reported as absent.
    pub async fn get(&self, id: &SessionId) -> AppResult<Option<Session>> {
        let Some(record) = self.backend.load(id.as_str()).await? else {
            return Ok(None);
        };

        if record.is_expired_at(Utc::now()) {
            debug!(session_id = %id, "Session expired");
            self.backend.delete(id.as_str()).await?;
            return Ok(None);
        }

        let plaintext = self.cipher.decrypt(&record.payload)?;
        let data: SessionData = serde_json::from_slice(&plaintext)?;

        Ok(Some(Session::restored(
            id.clone(),
            data,
            record.created_at,
            record.expires_at,
            record.touched_at,
        )))
    }

    /// Write the full session record.
    pub async fn set(&self, session: &Session, now: DateTime<Utc>) -> AppResult<()> {
        let json = serde_json::to_vec(session.data())?;
        let record = StoredSession {
            id: session.id().to_string(),
            payload: self.cipher.encrypt(&json)?,
            created_at: session.created_at(),
            expires_at: session.expires_at(),
            touched_at: now,
        };
        self.backend.save(&record).await
    }

    /// Refresh the last-access time if `touch_after` has elapsed since the
    /// previous touch. Returns whether the backend was written.
    pub async fn touch(&self, session: &mut Session, now: DateTime<Utc>) -> AppResult<bool> {
        if now - session.touched_at() < self.touch_after {
            return Ok(false);
        }
        self.backend.touch(session.id().as_str(), now).await?;
        session.mark_touched(now);
        Ok(true)
    }

    /// Delete a session record.
    pub async fn destroy(&self, id: &SessionId) -> AppResult<()> {
        self.backend.delete(id.as_str()).await
    }

    /// Delete every expired record. Returns how many were removed.
    pub async fn purge_expired(&self) -> AppResult<u64> {
        self.backend
            .delete_expired(Utc::now())
            .await
            .inspect_err(|e| self.report(StoreOperation::Purge, e))
    }

    /// Resolve the session for a request from the raw cookie value.
    ///
    /// Missing, malformed, unknown and expired ids, as well as store
    /// failures, all yield a fresh session.
    pub async fn load(&self, cookie_value: Option<&str>) -> Session {
        let Some(id) = cookie_value.and_then(SessionId::parse) else {
            return self.create();
        };

        match self.get(&id).await {
            Ok(Some(session)) => session,
            Ok(None) => self.create(),
            Err(e) => {
                self.report(StoreOperation::Load, &e);
                self.create()
            }
        }
    }

    /// Persist whatever the request did to the session.
    pub async fn commit(&self, session: &mut Session) -> CommitOutcome {
        let now = Utc::now();

        if let Some(old) = session.replaced_id().cloned() {
            if let Err(e) = self.destroy(&old).await {
                self.report(StoreOperation::Destroy, &e);
            }
        }

        let must_save = session.is_modified() || (session.is_new() && self.save_uninitialized);
        if must_save {
            return match self.set(session, now).await {
                Ok(()) => {
                    session.mark_saved(now);
                    CommitOutcome::Saved
                }
                Err(e) => {
                    self.report(StoreOperation::Save, &e);
                    CommitOutcome::Failed
                }
            };
        }

        if session.is_new() {
            return CommitOutcome::Unchanged;
        }

        match self.touch(session, now).await {
            Ok(true) => CommitOutcome::Touched,
            Ok(false) => CommitOutcome::Unchanged,
            Err(e) => {
                self.report(StoreOperation::Touch, &e);
                CommitOutcome::Failed
            }
        }
    }

    fn report(&self, operation: StoreOperation, err: &AppError) {
        self.observer.store_error(operation, err);
    }
}
