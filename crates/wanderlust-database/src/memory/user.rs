use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use wanderlust_core::error::AppError;
use wanderlust_core::result::AppResult;
use wanderlust_entity::user::{CreateUser, User};

use super::MemoryDatabase;
use crate::repositories::UserRepository;

#[async_trait]
impl UserRepository for MemoryDatabase {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let id = match self.usernames.get(&username.to_lowercase()) {
            Some(id) => *id,
            None => return Ok(None),
        };
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn create(&self, input: CreateUser) -> AppResult<User> {
        let user = input.into_user();
        match self.usernames.entry(user.username.to_lowercase()) {
            Entry::Occupied(_) => Err(AppError::conflict(
                "A user with the given username is already registered",
            )),
            Entry::Vacant(slot) => {
                slot.insert(user.id);
                self.users.insert(user.id, user.clone());
                Ok(user)
            }
        }
    }
}
