//! Custom Axum extractors.

pub mod form;
pub mod logged_in;

pub use form::ValidatedForm;
pub use logged_in::LoggedIn;

pub use crate::pipeline::auth::Identity;
pub use crate::pipeline::context::RequestContext;
pub use crate::pipeline::session::SessionHandle;
