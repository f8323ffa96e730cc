//! `LoggedIn` extractor: the login-required guard.

use axum::extract::{FromRequestParts, OriginalUri};
use axum::http::Method;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};

use wanderlust_entity::flash::FlashCategory;
use wanderlust_entity::user::User;

use crate::pipeline::auth::Identity;
use crate::pipeline::session::SessionHandle;

pub const LOGIN_REQUIRED: &str = "you must be logged in first!";

/// The authenticated user. Anonymous requests are redirected to `/login`;
/// for `GET` requests the requested URL is kept for after the login.
#[derive(Debug, Clone)]
pub struct LoggedIn(pub User);

impl<S> FromRequestParts<S> for LoggedIn
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let identity = Identity::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        if let Some(user) = identity.user().await {
            return Ok(Self(user));
        }

        let session = SessionHandle::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        let requested = parts
            .extensions
            .get::<OriginalUri>()
            .map(|uri| uri.0.to_string())
            .unwrap_or_else(|| parts.uri.to_string());

        let mut session = session.lock().await;
        if parts.method == Method::GET {
            session.set_redirect_url(requested);
        }
        session.push_flash(FlashCategory::Error, LOGIN_REQUIRED);

        Err(Redirect::to("/login").into_response())
    }
}
