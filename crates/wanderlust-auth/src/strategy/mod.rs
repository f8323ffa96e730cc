//! Credential verification strategies.
//!
//! Exactly one strategy is active per [`crate::AuthService`]. A strategy
//! only answers "who is this?"; storing the answer in the session is the
//! service's job.

pub mod local;

use async_trait::async_trait;

use wanderlust_core::result::AppResult;
use wanderlust_entity::user::User;

pub use local::LocalStrategy;

/// Message shown for every failed credential check, whatever the cause.
pub const INVALID_CREDENTIALS: &str = "Password or username is incorrect";

/// A pluggable credential check.
#[async_trait]
pub trait AuthStrategy: Send + Sync + std::fmt::Debug + 'static {
    /// Short identifier, used in log events.
    fn name(&self) -> &'static str;

    /// Resolve credentials to a user.
    ///
    /// Bad credentials yield an `Authentication` error carrying
    /// [`INVALID_CREDENTIALS`]; other kinds signal infrastructure failures.
    async fn verify(&self, username: &str, password: &str) -> AppResult<User>;
}
