//! Route handlers for listings, reviews and user accounts.

pub mod listings;
pub mod reviews;
pub mod users;

use axum::response::{IntoResponse, Redirect, Response};
use uuid::Uuid;

use wanderlust_entity::flash::FlashCategory;

use crate::pipeline::session::SessionHandle;

/// Queue a flash message and redirect.
pub(crate) async fn flash_redirect(
    session: &SessionHandle,
    category: FlashCategory,
    text: impl Into<String>,
    to: &str,
) -> Response {
    session.lock().await.push_flash(category, text);
    Redirect::to(to).into_response()
}

/// Ids arrive as raw path segments; malformed ones count as missing.
pub(crate) fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}
