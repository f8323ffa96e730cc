//! Username and password checked against stored Argon2 hashes.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use wanderlust_core::error::AppError;
use wanderlust_core::result::AppResult;
use wanderlust_database::repositories::UserRepository;
use wanderlust_entity::user::User;

use super::{AuthStrategy, INVALID_CREDENTIALS};
use crate::password::PasswordHasher;

/// Local username/password strategy.
#[derive(Debug, Clone)]
pub struct LocalStrategy {
    users: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
}

impl LocalStrategy {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self {
            users,
            hasher: PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl AuthStrategy for LocalStrategy {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn verify(&self, username: &str, password: &str) -> AppResult<User> {
        let Some(user) = self.users.find_by_username(username.trim()).await? else {
            debug!(username = %username, "Login attempt for unknown user");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            debug!(user_id = %user.id, "Login attempt with wrong password");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wanderlust_core::error::ErrorKind;
    use wanderlust_database::MemoryDatabase;
    use wanderlust_entity::user::CreateUser;

    async fn strategy_with_user() -> LocalStrategy {
        let db = Arc::new(MemoryDatabase::new());
        let hash = PasswordHasher::new().hash_password("s3cret!").unwrap();
        UserRepository::create(
            db.as_ref(),
            CreateUser {
                username: "carol".to_string(),
                email: "carol@example.com".to_string(),
                password_hash: hash,
            },
        )
        .await
        .unwrap();
        LocalStrategy::new(db)
    }

    #[tokio::test]
    async fn test_valid_credentials() {
        let strategy = strategy_with_user().await;
        let user = strategy.verify("carol", "s3cret!").await.unwrap();
        assert_eq!(user.username, "carol");
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_look_the_same() {
        let strategy = strategy_with_user().await;

        let wrong = strategy.verify("carol", "nope").await.unwrap_err();
        let unknown = strategy.verify("mallory", "s3cret!").await.unwrap_err();

        assert_eq!(wrong.kind, ErrorKind::Authentication);
        assert_eq!(wrong.message, unknown.message);
        assert_eq!(wrong.message, INVALID_CREDENTIALS);
    }
}
