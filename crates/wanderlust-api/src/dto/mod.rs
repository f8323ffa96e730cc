//! Form bodies accepted by the handlers.

pub mod request;
