use async_trait::async_trait;
use chrono::{DateTime, Utc};

use wanderlust_core::result::AppResult;
use wanderlust_entity::session::StoredSession;

use super::MemoryDatabase;
use crate::repositories::SessionBackend;

#[async_trait]
impl SessionBackend for MemoryDatabase {
    async fn load(&self, id: &str) -> AppResult<Option<StoredSession>> {
        Ok(self.sessions.get(id).map(|s| s.clone()))
    }

    async fn save(&self, record: &StoredSession) -> AppResult<()> {
        self.sessions.insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn touch(&self, id: &str, at: DateTime<Utc>) -> AppResult<()> {
        if let Some(mut record) = self.sessions.get_mut(id) {
            record.touched_at = at;
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.sessions.remove(id);
        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let before = self.sessions.len();
        self.sessions.retain(|_, s| !s.is_expired_at(now));
        Ok((before - self.sessions.len()) as u64)
    }
}
