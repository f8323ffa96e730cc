//! # wanderlust-entity
//!
//! Domain entity models for Wanderlust. Database entities derive
//! `sqlx::FromRow`; session state types are plain serde values that the
//! session store encrypts before persisting.

pub mod flash;
pub mod listing;
pub mod session;
pub mod user;
