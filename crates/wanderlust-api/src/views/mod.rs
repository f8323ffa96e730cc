//! Server-rendered HTML views.
//!
//! Every page shares [`layout::page`]: navigation with the current user,
//! then the flash messages drained for this request, then the page body.

pub mod error;
pub mod layout;
pub mod listings;
pub mod users;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::pipeline::context::RequestContext;

/// Response extension marking a response whose body is a finished view.
///
/// The error-render stage leaves such responses untouched.
#[derive(Debug, Clone, Copy)]
pub struct RenderedView;

/// Render `body` inside the shared layout.
pub fn render(ctx: &RequestContext, status: StatusCode, title: &str, body: &str) -> Response {
    let html = layout::page(ctx, title, body);
    let mut response = (status, Html(html)).into_response();
    response.extensions_mut().insert(RenderedView);
    response
}

/// Escape text for use in HTML content and quoted attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_render_marks_response() {
        let response = render(&RequestContext::default(), StatusCode::OK, "Home", "<p>hi</p>");
        assert!(response.extensions().get::<RenderedView>().is_some());
    }
}
