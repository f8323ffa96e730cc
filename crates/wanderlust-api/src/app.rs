//! Application builder: router plus the pre-routing request rewrites.
//!
//! Both rewrites must happen before routing, so they wrap the whole
//! [`Router`] instead of being route layers.

use axum::Router;
use axum::extract::Request;
use tower::Layer;
use tower::util::{MapRequest, MapRequestLayer};
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::middleware::method_override::method_override;
use crate::router::{Mount, build_router, default_mounts};
use crate::state::AppState;

/// The servable application.
pub type App = MapRequest<NormalizePath<Router>, fn(Request) -> Request>;

/// Builds the complete application with the default route groups.
pub fn build_app(state: AppState) -> App {
    build_app_with(state, default_mounts())
}

/// Builds the application with the given route groups.
///
/// `/listings/` routes like `/listings`, and a `POST` may name another
/// method in its `_method` query parameter.
pub fn build_app_with(state: AppState, mounts: Vec<Mount>) -> App {
    let router = build_router(state, mounts);
    let normalized = NormalizePathLayer::trim_trailing_slash().layer(router);
    MapRequestLayer::new(method_override as fn(Request) -> Request).layer(normalized)
}
