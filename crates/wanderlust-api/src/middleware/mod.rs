//! Outer middleware that is not part of the session pipeline.

pub mod compression;
pub mod logging;
pub mod method_override;
