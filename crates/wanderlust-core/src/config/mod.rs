//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! TOML files layered with environment variables. Each sub-module represents
//! a logical configuration section.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;
pub mod session;

use serde::{Deserialize, Serialize};

pub use self::app::ServerConfig;
pub use self::auth::AuthConfig;
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::session::{SessionConfig, StoreProvider};

use crate::error::AppError;

/// Minimum length accepted for the session secret.
pub const MIN_SECRET_LENGTH: usize = 32;

/// Root application configuration.
///
/// Top-level deserialization target for the merged configuration
/// (default.toml + environment overlay + `WANDERLUST__*` variables).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Session and cookie settings.
    pub session: SessionConfig,
    /// Credential settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration for the given environment name.
    ///
    /// Merges `config/default.toml`, `config/{env}.toml` and environment
    /// variables prefixed with `WANDERLUST__` (double underscore separates
    /// nested keys, e.g. `WANDERLUST__SESSION__SECRET`).
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("WANDERLUST")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Check cross-field constraints that serde defaults cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.session.secret.len() < MIN_SECRET_LENGTH {
            return Err(AppError::configuration(format!(
                "session.secret must be at least {MIN_SECRET_LENGTH} characters"
            )));
        }

        if self.session.store == StoreProvider::Postgres && self.database.url.trim().is_empty() {
            return Err(AppError::configuration(
                "database.url is required when session.store = \"postgres\"",
            ));
        }

        if self.session.max_age_days == 0 {
            return Err(AppError::configuration(
                "session.max_age_days must be greater than zero",
            ));
        }

        Ok(())
    }

    /// Configuration suitable for tests: in-memory store, fixed secret.
    pub fn for_testing() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            session: SessionConfig {
                secret: "test-secret-test-secret-test-secret-0123".to_string(),
                store: StoreProvider::Memory,
                ..SessionConfig::default()
            },
            auth: AuthConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
