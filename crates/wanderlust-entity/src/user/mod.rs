//! User entity and the identity token stored in sessions.

pub mod identity;
pub mod model;

pub use identity::IdentityToken;
pub use model::{CreateUser, User};
