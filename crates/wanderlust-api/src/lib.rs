//! # wanderlust-api
//!
//! HTTP layer for Wanderlust built on Axum.
//!
//! Every request runs through the same ordered pipeline (see [`pipeline`]):
//! session, auth, context, dispatch, fallback and error rendering. Route
//! groups are mounted by [`router`]; handlers render server-side HTML views.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod pipeline;
pub mod router;
pub mod state;
pub mod views;

pub use app::{App, build_app, build_app_with};
pub use error::ErrorSignal;
pub use state::AppState;
