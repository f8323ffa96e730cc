//! The in-flight session of a single request.

use chrono::{DateTime, Duration, Utc};

use wanderlust_entity::session::{SessionData, SessionId};
use wanderlust_entity::user::IdentityToken;

/// A session as seen by request handling.
///
/// Tracks whether it is new and whether anything was written to it, so the
/// store knows on commit whether to save, touch, or leave the record alone.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    pub(crate) data: SessionData,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    touched_at: DateTime<Utc>,
    is_new: bool,
    pub(crate) modified: bool,
    /// Persisted id abandoned by [`Session::regenerate`], pending deletion.
    replaced: Option<SessionId>,
}

impl Session {
    /// A brand-new session expiring `max_age` from `now`.
    pub fn fresh(max_age: Duration, now: DateTime<Utc>) -> Self {
        Self {
            id: SessionId::generate(),
            data: SessionData::default(),
            created_at: now,
            expires_at: now + max_age,
            touched_at: now,
            is_new: true,
            modified: false,
            replaced: None,
        }
    }

    /// A session rebuilt from a stored record.
    pub(crate) fn restored(
        id: SessionId,
        data: SessionData,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
        touched_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            data,
            created_at,
            expires_at,
            touched_at,
            is_new: false,
            modified: false,
            replaced: None,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn data(&self) -> &SessionData {
        &self.data
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Absolute expiry; never moves for the lifetime of this id.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn touched_at(&self) -> DateTime<Utc> {
        self.touched_at
    }

    /// `true` until the session has been persisted once.
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Serialized identity of the logged-in user, if any.
    pub fn user(&self) -> Option<&IdentityToken> {
        self.data.user.as_ref()
    }

    pub fn set_user(&mut self, user: Option<IdentityToken>) {
        if self.data.user != user {
            self.data.user = user;
            self.modified = true;
        }
    }

    /// Remember where to send the user after a successful login.
    pub fn set_redirect_url(&mut self, url: impl Into<String>) {
        self.data.redirect_url = Some(url.into());
        self.modified = true;
    }

    pub fn take_redirect_url(&mut self) -> Option<String> {
        let url = self.data.redirect_url.take();
        if url.is_some() {
            self.modified = true;
        }
        url
    }

    /// Swap to a new id with empty data and a fresh lifetime.
    ///
    /// The previous id, if it was ever persisted, is deleted on the next
    /// commit. Used on login and logout against session fixation.
    pub fn regenerate(&mut self, now: DateTime<Utc>) {
        let lifetime = self.expires_at - self.created_at;
        let old = std::mem::replace(&mut self.id, SessionId::generate());
        if !self.is_new && self.replaced.is_none() {
            self.replaced = Some(old);
        }
        self.data = SessionData::default();
        self.created_at = now;
        self.expires_at = now + lifetime;
        self.touched_at = now;
        self.is_new = true;
        self.modified = true;
    }

    pub(crate) fn replaced_id(&self) -> Option<&SessionId> {
        self.replaced.as_ref()
    }

    pub(crate) fn mark_saved(&mut self, now: DateTime<Utc>) {
        self.is_new = false;
        self.modified = false;
        self.replaced = None;
        self.touched_at = now;
    }

    pub(crate) fn mark_touched(&mut self, now: DateTime<Utc>) {
        self.touched_at = now;
    }
}
