//! # wanderlust-auth
//!
//! Everything that sits between a raw request and a known user:
//!
//! - `password`: Argon2id hashing and the signup password policy
//! - `strategy`: pluggable credential verification (local username/password)
//! - `service`: identity serialization plus login, logout and registration
//! - `session`: encrypted session records, the store adapter with its
//!   failure observer, flash messages and expired-record cleanup

pub mod password;
pub mod service;
pub mod session;
pub mod strategy;

pub use password::{PasswordHasher, PasswordValidator};
pub use service::AuthService;
pub use session::{
    CommitOutcome, LoggingObserver, Session, SessionCleanup, SessionStore, StoreObserver,
    StoreOperation,
};
pub use strategy::{AuthStrategy, LocalStrategy};
