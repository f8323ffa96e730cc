//! Authentication service: credential checks, identity serialization and
//! the session side of login, logout and signup.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use wanderlust_core::config::AuthConfig;
use wanderlust_core::error::AppError;
use wanderlust_core::result::AppResult;
use wanderlust_database::repositories::UserRepository;
use wanderlust_entity::user::{CreateUser, IdentityToken, User};

use crate::password::{PasswordHasher, PasswordValidator};
use crate::session::Session;
use crate::strategy::AuthStrategy;

/// Couples the active [`AuthStrategy`] with the user repository.
#[derive(Debug, Clone)]
pub struct AuthService {
    strategy: Arc<dyn AuthStrategy>,
    users: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
    validator: PasswordValidator,
}

impl AuthService {
    pub fn new(
        strategy: Arc<dyn AuthStrategy>,
        users: Arc<dyn UserRepository>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            strategy,
            users,
            hasher: PasswordHasher::new(),
            validator: PasswordValidator::new(config),
        }
    }

    /// Verify credentials with the active strategy.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<User> {
        self.strategy.verify(username, password).await
    }

    /// The value stored in the session for a logged-in user.
    pub fn serialize(&self, user: &User) -> IdentityToken {
        IdentityToken::from_user_id(user.id)
    }

    /// Materialize the user a session refers to.
    ///
    /// `NotFound` when the token is malformed or the user no longer exists.
    pub async fn deserialize(&self, token: &IdentityToken) -> AppResult<User> {
        let id = token.user_id()?;
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User no longer exists"))
    }

    /// Create an account. The password is checked against policy and hashed.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> AppResult<User> {
        self.validator.validate(password)?;
        let password_hash = self.hasher.hash_password(password)?;

        let user = self
            .users
            .create(CreateUser {
                username: username.trim().to_string(),
                email: email.trim().to_string(),
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Bind a user to the session under a freshly generated session id.
    pub fn login(&self, session: &mut Session, user: &User) {
        session.regenerate(Utc::now());
        session.set_user(Some(self.serialize(user)));
        info!(user_id = %user.id, strategy = self.strategy.name(), "User logged in");
    }

    /// Drop the identity and every other value held by the session.
    pub fn logout(&self, session: &mut Session) {
        session.set_user(None);
        session.regenerate(Utc::now());
    }
}
