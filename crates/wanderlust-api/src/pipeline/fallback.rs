//! Fallback for requests no route group claims.

use crate::error::ErrorSignal;

/// Unmatched path, or a known path with an unsupported method.
pub async fn not_found() -> ErrorSignal {
    ErrorSignal::not_found()
}
