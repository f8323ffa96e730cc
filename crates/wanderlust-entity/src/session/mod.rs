//! Session identifiers, decrypted session state, and stored records.

pub mod data;
pub mod record;
pub mod token;

pub use data::SessionData;
pub use record::StoredSession;
pub use token::SessionId;
