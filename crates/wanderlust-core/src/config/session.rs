//! Session and cookie configuration.

use serde::{Deserialize, Serialize};

/// Backend holding session records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreProvider {
    /// PostgreSQL `sessions` table.
    Postgres,
    /// Process-local map; records are lost on restart.
    Memory,
}

impl Default for StoreProvider {
    fn default() -> Self {
        Self::Postgres
    }
}

impl std::fmt::Display for StoreProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreProvider::Postgres => write!(f, "postgres"),
            StoreProvider::Memory => write!(f, "memory"),
        }
    }
}

/// Session management configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Secret used to sign the session cookie and encrypt stored payloads.
    #[serde(default)]
    pub secret: String,
    /// Which backend persists session records.
    #[serde(default)]
    pub store: StoreProvider,
    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Absolute session lifetime in days, counted from creation.
    #[serde(default = "default_max_age_days")]
    pub max_age_days: u64,
    /// Minimum seconds between two touches of an unmodified session.
    #[serde(default = "default_touch_after")]
    pub touch_after_seconds: u64,
    /// Persist new sessions even when nothing was written to them.
    #[serde(default = "default_true")]
    pub save_uninitialized: bool,
    /// Interval for expired session cleanup in minutes.
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_minutes: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            store: StoreProvider::default(),
            cookie_name: default_cookie_name(),
            max_age_days: default_max_age_days(),
            touch_after_seconds: default_touch_after(),
            save_uninitialized: true,
            cleanup_interval_minutes: default_cleanup_interval(),
        }
    }
}

impl SessionConfig {
    /// Absolute session lifetime in seconds.
    pub fn max_age_seconds(&self) -> i64 {
        (self.max_age_days as i64) * 24 * 60 * 60
    }
}

fn default_cookie_name() -> String {
    "wanderlust.sid".to_string()
}

fn default_max_age_days() -> u64 {
    7
}

fn default_touch_after() -> u64 {
    24 * 3600
}

fn default_cleanup_interval() -> u64 {
    60
}

fn default_true() -> bool {
    true
}
