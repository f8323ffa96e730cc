//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use wanderlust_auth::session::{SessionStore, StoreObserver};
use wanderlust_auth::strategy::LocalStrategy;
use wanderlust_auth::AuthService;
use wanderlust_core::config::AppConfig;
use wanderlust_core::result::AppResult;
use wanderlust_database::repositories::{
    ListingRepository, PgListingRepository, PgReviewRepository, PgSessionBackend,
    PgUserRepository, ReviewRepository, SessionBackend, UserRepository,
};
use wanderlust_database::{DatabasePool, MemoryDatabase};

use crate::pipeline::session::SessionCookies;

/// The storage backends the application runs on.
#[derive(Debug, Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub listings: Arc<dyn ListingRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub sessions: Arc<dyn SessionBackend>,
}

impl Repositories {
    /// Every repository backed by PostgreSQL.
    pub fn postgres(db: &DatabasePool) -> Self {
        let pool = db.pool().clone();
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            listings: Arc::new(PgListingRepository::new(pool.clone())),
            reviews: Arc::new(PgReviewRepository::new(pool.clone())),
            sessions: Arc::new(PgSessionBackend::new(pool)),
        }
    }

    /// Every repository backed by one process-local database.
    pub fn in_memory(db: Arc<MemoryDatabase>) -> Self {
        Self {
            users: db.clone(),
            listings: db.clone(),
            reviews: db.clone(),
            sessions: db,
        }
    }
}

/// Application state, passed to handlers via `State<AppState>`.
///
/// All fields are `Arc`-wrapped or cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Session & auth ───────────────────────────────────────
    /// Session persistence
    pub session_store: Arc<SessionStore>,
    /// Session cookie name and signing key
    pub cookies: SessionCookies,
    /// Credential checks, identity (de)serialization, login/logout
    pub auth: Arc<AuthService>,

    // ── Repositories ─────────────────────────────────────────
    pub users: Arc<dyn UserRepository>,
    pub listings: Arc<dyn ListingRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
}

impl AppState {
    /// Wire the session store, auth service and repositories together.
    pub fn new(
        config: AppConfig,
        repos: Repositories,
        observer: Arc<dyn StoreObserver>,
    ) -> AppResult<Self> {
        let session_store = Arc::new(SessionStore::new(
            repos.sessions,
            &config.session,
            observer,
        )?);

        let strategy = Arc::new(LocalStrategy::new(Arc::clone(&repos.users)));
        let auth = Arc::new(AuthService::new(
            strategy,
            Arc::clone(&repos.users),
            &config.auth,
        ));

        Ok(Self {
            cookies: SessionCookies::new(&config.session),
            config: Arc::new(config),
            session_store,
            auth,
            users: repos.users,
            listings: repos.listings,
            reviews: repos.reviews,
        })
    }
}
