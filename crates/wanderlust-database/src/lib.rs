//! # wanderlust-database
//!
//! PostgreSQL connection management and repository implementations for
//! every Wanderlust entity, plus an in-memory backend implementing the same
//! repository traits for tests and single-process development.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use memory::MemoryDatabase;
