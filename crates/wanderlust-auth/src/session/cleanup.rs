//! Periodic removal of expired session records.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use wanderlust_core::result::AppResult;

use super::store::SessionStore;

/// Deletes expired session records on a fixed interval.
#[derive(Debug, Clone)]
pub struct SessionCleanup {
    store: Arc<SessionStore>,
    interval: Duration,
}

impl SessionCleanup {
    pub fn new(store: Arc<SessionStore>, interval_minutes: u64) -> Self {
        Self {
            store,
            interval: Duration::from_secs(interval_minutes.max(1) * 60),
        }
    }

    /// Runs one cleanup cycle. Returns the number of records removed.
    pub async fn run_cleanup(&self) -> AppResult<u64> {
        let removed = self.store.purge_expired().await?;
        if removed > 0 {
            info!(count = removed, "Removed expired sessions");
        } else {
            debug!("No expired sessions to remove");
        }
        Ok(removed)
    }

    /// Run cleanup cycles on a background task until `shutdown` fires.
    ///
    /// Failures are already reported by the store's observer; the loop
    /// simply waits for the next tick. A cycle in progress is finished
    /// before the task exits.
    pub fn spawn(self, mut shutdown: broadcast::Receiver<()>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let _ = self.run_cleanup().await;
                    }
                    _ = shutdown.recv() => {
                        debug!("Session cleanup stopped");
                        break;
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration as ChronoDuration, Utc};
    use wanderlust_core::config::AppConfig;
    use wanderlust_database::MemoryDatabase;
    use wanderlust_database::repositories::SessionBackend;
    use wanderlust_entity::session::StoredSession;

    use super::*;
    use crate::session::LoggingObserver;

    #[tokio::test]
    async fn test_run_cleanup_removes_only_expired() {
        let db = Arc::new(MemoryDatabase::new());
        let now = Utc::now();
        for (id, offset) in [("expired", -60), ("live", 3600)] {
            db.save(&StoredSession {
                id: id.to_string(),
                payload: String::new(),
                created_at: now,
                expires_at: now + ChronoDuration::seconds(offset),
                touched_at: now,
            })
            .await
            .unwrap();
        }

        let store = SessionStore::new(
            db.clone(),
            &AppConfig::for_testing().session,
            Arc::new(LoggingObserver),
        )
        .unwrap();
        let cleanup = SessionCleanup::new(Arc::new(store), 60);

        assert_eq!(cleanup.run_cleanup().await.unwrap(), 1);
        assert_eq!(db.session_count(), 1);
        assert!(db.load("live").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_spawned_cleanup_stops_on_shutdown() {
        let db = Arc::new(MemoryDatabase::new());
        let store = SessionStore::new(
            db,
            &AppConfig::for_testing().session,
            Arc::new(LoggingObserver),
        )
        .unwrap();
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let handle = SessionCleanup::new(Arc::new(store), 60).spawn(shutdown_rx);

        shutdown_tx.send(()).unwrap();
        let joined = tokio::time::timeout(Duration::from_secs(5), handle).await;
        assert!(matches!(joined, Ok(Ok(()))));
    }
}
