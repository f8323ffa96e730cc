//! Auth stage: expose the session's identity to later stages and handlers.
//!
//! The user behind the identity token is looked up at most once per
//! request, and only when something asks for it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use wanderlust_auth::AuthService;
use wanderlust_core::error::ErrorKind;
use wanderlust_entity::user::{IdentityToken, User};

use super::session::SessionHandle;
use crate::error::ErrorSignal;
use crate::state::AppState;

/// The (possibly anonymous) identity of the current request.
#[derive(Debug, Clone)]
pub struct Identity(Arc<IdentityInner>);

#[derive(Debug)]
struct IdentityInner {
    token: Option<IdentityToken>,
    auth: Arc<AuthService>,
    resolved: OnceCell<Option<User>>,
    /// Set when the token points at a user that no longer exists.
    stale: AtomicBool,
}

impl Identity {
    pub fn new(token: Option<IdentityToken>, auth: Arc<AuthService>) -> Self {
        Self(Arc::new(IdentityInner {
            token,
            auth,
            resolved: OnceCell::new(),
            stale: AtomicBool::new(false),
        }))
    }

    /// The current user, or `None` when anonymous or the lookup failed.
    pub async fn user(&self) -> Option<User> {
        self.0
            .resolved
            .get_or_init(|| async {
                let token = self.0.token.as_ref()?;
                match self.0.auth.deserialize(token).await {
                    Ok(user) => Some(user),
                    Err(e) => {
                        if e.kind == ErrorKind::NotFound {
                            self.0.stale.store(true, Ordering::Relaxed);
                        }
                        warn!(token = %token, error = %e, "Failed to restore user from session");
                        None
                    }
                }
            })
            .await
            .clone()
    }

    fn is_stale(&self) -> bool {
        self.0.stale.load(Ordering::Relaxed)
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = ErrorSignal;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or_else(ErrorSignal::default)
    }
}

/// Auth stage middleware.
pub async fn auth_stage(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let Some(handle) = request.extensions().get::<SessionHandle>().cloned() else {
        return next.run(request).await;
    };

    let token = handle.lock().await.user().cloned();
    let identity = Identity::new(token.clone(), Arc::clone(&state.auth));
    request.extensions_mut().insert(identity.clone());

    let response = next.run(request).await;

    // Forget identities whose user is gone, unless the request logged in anew.
    if identity.is_stale() {
        let mut session = handle.lock().await;
        if session.user() == token.as_ref() {
            debug!("Dropping identity of a deleted user from the session");
            session.set_user(None);
        }
    }
    response
}
