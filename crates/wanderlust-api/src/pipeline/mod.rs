//! The ordered request pipeline.
//!
//! Every routed request passes through the stages in [`PIPELINE`] order:
//!
//! 1. `Session` loads or creates the session and commits it afterwards.
//! 2. `Auth` exposes the session's identity as a lazily resolved [`auth::Identity`].
//! 3. `Context` drains flash messages and binds the current user into a
//!    [`context::RequestContext`].
//! 4. `Dispatch` runs the matching route group.
//! 5. `Fallback` answers anything unmatched with a 404 signal.
//! 6. `ErrorRender` turns every error signal into the error view.
//!
//! Error rendering wraps dispatch from inside the context stage so the
//! error view still shows the navigation and current user.

pub mod auth;
pub mod context;
pub mod error_render;
pub mod fallback;
pub mod session;

use std::any::Any;

use axum::Router;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use tower_http::catch_panic::CatchPanicLayer;
use tracing::error;

use crate::error::ErrorSignal;
use crate::state::AppState;

/// One step of the request pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Session,
    Auth,
    Context,
    Dispatch,
    Fallback,
    ErrorRender,
}

/// Stages in the order a request meets them.
pub const PIPELINE: [Stage; 6] = [
    Stage::Session,
    Stage::Auth,
    Stage::Context,
    Stage::Dispatch,
    Stage::Fallback,
    Stage::ErrorRender,
];

/// Wrap the merged route groups in the pipeline stages, in [`PIPELINE`] order.
///
/// Stages before `Dispatch` wrap it, the first one outermost. Stages from
/// `Dispatch` on each handle what the previous ones left, so every later
/// stage wraps the earlier ones.
pub fn apply(routes: Router<AppState>, state: AppState) -> Router<AppState> {
    let dispatch_at = PIPELINE
        .iter()
        .position(|stage| *stage == Stage::Dispatch)
        .unwrap_or(PIPELINE.len());
    let (before, from_dispatch) = PIPELINE.split_at(dispatch_at);

    let handled = from_dispatch
        .iter()
        .fold(routes, |router, stage| add_stage(router, *stage, &state));
    before
        .iter()
        .rev()
        .fold(handled, |router, stage| add_stage(router, *stage, &state))
}

fn add_stage(router: Router<AppState>, stage: Stage, state: &AppState) -> Router<AppState> {
    match stage {
        Stage::Session => router.layer(middleware::from_fn_with_state(
            state.clone(),
            session::session_stage,
        )),
        Stage::Auth => router.layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_stage,
        )),
        Stage::Context => router.layer(middleware::from_fn(context::context_stage)),
        Stage::Dispatch => router,
        Stage::Fallback => router
            .fallback(fallback::not_found)
            .method_not_allowed_fallback(fallback::not_found),
        Stage::ErrorRender => router
            .layer(CatchPanicLayer::custom(panic_signal))
            .layer(middleware::from_fn(error_render::error_render_stage)),
    }
}

/// A panicking handler becomes an unclassified error.
fn panic_signal(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    error!(panic = %detail, "Handler panicked");
    ErrorSignal::default().into_response()
}
