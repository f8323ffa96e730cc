//! Convenience result type alias for Wanderlust.

use crate::error::AppError;

/// A specialized `Result` type for Wanderlust operations.
pub type AppResult<T> = Result<T, AppError>;
