//! Route groups and their mount points.
//!
//! Groups are mounted in registration order. Groups sharing a prefix are
//! merged into one, and the `/` group is merged at the root. Anything no
//! group claims reaches the fallback.

use axum::Router;
use axum::middleware as axum_middleware;
use axum::routing::get;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::compression::build_compression_layer;
use crate::middleware::logging::request_logging;
use crate::pipeline;
use crate::state::AppState;

/// A route group and the path prefix it is mounted under.
#[derive(Debug)]
pub struct Mount {
    pub prefix: &'static str,
    pub routes: Router<AppState>,
}

impl Mount {
    pub fn new(prefix: &'static str, routes: Router<AppState>) -> Self {
        Self { prefix, routes }
    }
}

/// The application's mounts, in registration order.
pub fn default_mounts() -> Vec<Mount> {
    vec![
        Mount::new("/listings", listing_routes()),
        Mount::new("/listings", review_routes()),
        Mount::new("/", user_routes()),
    ]
}

/// Listing CRUD.
fn listing_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::listings::index).post(handlers::listings::create),
        )
        .route("/new", get(handlers::listings::new_form))
        .route(
            "/{id}",
            get(handlers::listings::show)
                .put(handlers::listings::update)
                .delete(handlers::listings::destroy),
        )
        .route("/{id}/edit", get(handlers::listings::edit_form))
}

/// Reviews nested under a listing.
fn review_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}/reviews",
            axum::routing::post(handlers::reviews::create),
        )
        .route(
            "/{id}/reviews/{review_id}",
            axum::routing::delete(handlers::reviews::destroy),
        )
}

/// Signup, login, logout and profile.
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/signup",
            get(handlers::users::signup_form).post(handlers::users::signup),
        )
        .route(
            "/login",
            get(handlers::users::login_form).post(handlers::users::login),
        )
        .route("/logout", get(handlers::users::logout))
        .route("/profile", get(handlers::users::profile))
}

/// Combine mounts into one dispatch router, merging groups per prefix.
pub fn dispatch_router(mounts: Vec<Mount>) -> Router<AppState> {
    let mut groups: Vec<(&'static str, Router<AppState>)> = Vec::new();
    for mount in mounts {
        match groups.iter_mut().find(|(prefix, _)| *prefix == mount.prefix) {
            Some((_, group)) => {
                let merged = std::mem::replace(group, Router::new()).merge(mount.routes);
                *group = merged;
            }
            None => groups.push((mount.prefix, mount.routes)),
        }
    }

    groups
        .into_iter()
        .fold(Router::new(), |router, (prefix, group)| {
            if prefix == "/" {
                router.merge(group)
            } else {
                router.nest(prefix, group)
            }
        })
}

/// Build the complete router: pipeline-wrapped dispatch, static assets
/// under `/public`, and the outer logging, tracing and compression layers.
pub fn build_router(state: AppState, mounts: Vec<Mount>) -> Router {
    let static_dir = state.config.server.static_dir.clone();

    pipeline::apply(dispatch_router(mounts), state.clone())
        .nest_service("/public", ServeDir::new(static_dir))
        .layer(build_compression_layer())
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(request_logging))
        .with_state(state)
}
