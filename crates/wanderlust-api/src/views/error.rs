//! The error view.

use axum::response::Response;

use super::escape;
use crate::error::ErrorSignal;
use crate::pipeline::context::RequestContext;

/// Render `signal` with its status code and message.
pub fn render(ctx: &RequestContext, signal: &ErrorSignal) -> Response {
    let body = format!(
        r#"<div class="error-page">
<h2 class="error-status">{status}</h2>
<div class="alert alert-error" role="alert"><h4>{message}</h4></div>
<a class="btn" href="/listings">Back to listings</a>
</div>"#,
        status = signal.status.as_u16(),
        message = escape(&signal.message),
    );
    super::render(ctx, signal.status, "Error", &body)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    #[test]
    fn test_status_preserved() {
        let response = render(&RequestContext::default(), &ErrorSignal::not_found());
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
