//! Error-render stage: the single place error responses get their body.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, warn};

use super::context::RequestContext;
use crate::error::ErrorSignal;
use crate::views::{self, RenderedView};

/// Render the error view for any response that carries an [`ErrorSignal`]
/// or has an error status without a rendered view.
pub async fn error_render_stage(request: Request, next: Next) -> Response {
    let context = request
        .extensions()
        .get::<RequestContext>()
        .cloned()
        .unwrap_or_default();
    let method = request.method().clone();

    let response = next.run(request).await;

    if response.extensions().get::<RenderedView>().is_some() {
        return response;
    }

    let status = response.status();
    let signal = match response.extensions().get::<ErrorSignal>() {
        Some(signal) => signal.clone(),
        None if status.is_client_error() || status.is_server_error() => {
            ErrorSignal::from_status(status)
        }
        None => return response,
    };

    if signal.status.is_server_error() {
        warn!(method = %method, path = %context.path, status = signal.status.as_u16(), "Request failed");
    } else {
        debug!(method = %method, path = %context.path, status = signal.status.as_u16(), message = %signal.message, "Request rejected");
    }

    views::error::render(&context, &signal)
}
