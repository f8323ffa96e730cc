//! Session lifecycle: the per-request [`Session`], the [`SessionStore`]
//! adapter that persists it, and background cleanup of expired records.

pub mod cipher;
pub mod cleanup;
pub mod flash;
pub mod model;
pub mod observer;
pub mod store;

pub use cipher::PayloadCipher;
pub use cleanup::SessionCleanup;
pub use model::Session;
pub use observer::{LoggingObserver, StoreObserver, StoreOperation};
pub use store::{CommitOutcome, SessionStore};
