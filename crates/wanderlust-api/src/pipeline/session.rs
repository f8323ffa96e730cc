//! Session stage: resolve the session from the signed cookie before the
//! request runs, commit it and (re)issue the cookie afterwards.

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::HeaderMap;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, Key, SignedCookieJar};
use sha2::{Digest, Sha512};
use time::OffsetDateTime;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, error};

use wanderlust_auth::Session;
use wanderlust_core::config::SessionConfig;

use crate::error::ErrorSignal;
use crate::state::AppState;

/// Name and signing key of the session cookie.
#[derive(Clone)]
pub struct SessionCookies {
    name: String,
    key: Key,
}

impl std::fmt::Debug for SessionCookies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCookies")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl SessionCookies {
    /// The signing key is the SHA-512 digest of the session secret.
    pub fn new(config: &SessionConfig) -> Self {
        let digest = Sha512::digest(config.secret.as_bytes());
        Self {
            name: config.cookie_name.clone(),
            key: Key::from(digest.as_slice()),
        }
    }

    /// The session id from the request cookie, if present and correctly signed.
    pub fn read(&self, headers: &HeaderMap) -> Option<String> {
        SignedCookieJar::from_headers(headers, self.key.clone())
            .get(&self.name)
            .map(|cookie| cookie.value().to_string())
    }

    /// A jar that sets the cookie for `session`, expiring with the session.
    pub fn issue(&self, session: &Session) -> SignedCookieJar {
        let mut cookie = Cookie::build((self.name.clone(), session.id().to_string()))
            .path("/")
            .http_only(true);

        if let Ok(expires) = OffsetDateTime::from_unix_timestamp(session.expires_at().timestamp()) {
            cookie = cookie.expires(expires);
        }

        SignedCookieJar::new(self.key.clone()).add(cookie)
    }
}

/// The request's session, shared by every stage and handler of that request.
#[derive(Debug, Clone)]
pub struct SessionHandle(Arc<Mutex<Session>>);

impl SessionHandle {
    pub fn new(session: Session) -> Self {
        Self(Arc::new(Mutex::new(session)))
    }

    /// Lock the session. Never hold the guard across another `lock` call.
    pub async fn lock(&self) -> MutexGuard<'_, Session> {
        self.0.lock().await
    }
}

impl<S> FromRequestParts<S> for SessionHandle
where
    S: Send + Sync,
{
    type Rejection = ErrorSignal;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Self>().cloned().ok_or_else(|| {
            error!("Session requested outside the session stage");
            ErrorSignal::default()
        })
    }
}

/// Session stage middleware.
pub async fn session_stage(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let cookie_value = state.cookies.read(request.headers());
    let session = state.session_store.load(cookie_value.as_deref()).await;
    let handle = SessionHandle::new(session);
    request.extensions_mut().insert(handle.clone());

    let response = next.run(request).await;

    let mut session = handle.lock().await;
    let outcome = state.session_store.commit(&mut session).await;
    debug!(session_id = %session.id(), outcome = ?outcome, "Session committed");

    if outcome.issues_cookie() {
        let jar = state.cookies.issue(&session);
        return (jar, response).into_response();
    }
    response
}
