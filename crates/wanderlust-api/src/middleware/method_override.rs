//! `_method` query override, so HTML forms can issue `PUT` and `DELETE`.
//!
//! Must run before routing, which is why it wraps the whole [`axum::Router`]
//! instead of being a route layer.

use axum::extract::Request;
use axum::http::Method;

const OVERRIDE_PARAM: &str = "_method";

/// Rewrite the method of a `POST` carrying `?_method=PUT|PATCH|DELETE`.
pub fn method_override(mut request: Request) -> Request {
    if request.method() != Method::POST {
        return request;
    }

    let target = request
        .uri()
        .query()
        .and_then(|query| serde_urlencoded::from_str::<Vec<(String, String)>>(query).ok())
        .and_then(|pairs| {
            pairs
                .into_iter()
                .find(|(key, _)| key == OVERRIDE_PARAM)
                .map(|(_, value)| value.to_ascii_uppercase())
        });

    let method = match target.as_deref() {
        Some("PUT") => Method::PUT,
        Some("PATCH") => Method::PATCH,
        Some("DELETE") => Method::DELETE,
        _ => return request,
    };

    *request.method_mut() = method;
    request
}
