//! Context stage: per-request view locals.

use axum::extract::{FromRequestParts, Request};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

use wanderlust_entity::flash::FlashCategory;
use wanderlust_entity::user::User;

use super::auth::Identity;
use super::session::SessionHandle;
use crate::error::ErrorSignal;

/// What every rendered view needs to know about the request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Success flashes drained for this request.
    pub success: Vec<String>,
    /// Error flashes drained for this request.
    pub error: Vec<String>,
    /// `None` for anonymous visitors.
    pub current_user: Option<User>,
    /// Request path, for highlighting navigation.
    pub path: String,
}

impl RequestContext {
    pub fn user_id(&self) -> Option<Uuid> {
        self.current_user.as_ref().map(|u| u.id)
    }

    pub fn is_logged_in(&self) -> bool {
        self.current_user.is_some()
    }
}

impl<S> FromRequestParts<S> for RequestContext
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

/// Context stage middleware.
pub async fn context_stage(mut request: Request, next: Next) -> Response {
    let mut context = RequestContext {
        path: request.uri().path().to_string(),
        ..RequestContext::default()
    };

    if let Some(handle) = request.extensions().get::<SessionHandle>().cloned() {
        let mut session = handle.lock().await;
        context.error = session.drain_flash(FlashCategory::Error);
        context.success = session.drain_flash(FlashCategory::Success);
    }

    if let Some(identity) = request.extensions().get::<Identity>().cloned() {
        context.current_user = identity.user().await;
    }

    request.extensions_mut().insert(context);
    next.run(request).await
}
