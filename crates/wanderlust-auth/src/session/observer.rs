//! Reporting of session store failures.

use std::fmt;

use tracing::error;

use wanderlust_core::error::AppError;

/// The store operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    Load,
    Save,
    Touch,
    Destroy,
    Purge,
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Load => "load",
            Self::Save => "save",
            Self::Touch => "touch",
            Self::Destroy => "destroy",
            Self::Purge => "purge",
        };
        f.write_str(name)
    }
}

/// Receives every failure of the session store.
///
/// Failures never abort a request; this is the only place they surface.
pub trait StoreObserver: Send + Sync + fmt::Debug + 'static {
    fn store_error(&self, operation: StoreOperation, error: &AppError);
}

/// Observer that logs failures at `error` level.
#[derive(Debug, Clone, Default)]
pub struct LoggingObserver;

impl StoreObserver for LoggingObserver {
    fn store_error(&self, operation: StoreOperation, err: &AppError) {
        error!(
            operation = %operation,
            kind = %err.kind,
            error = %err.message,
            "Error in session store"
        );
    }
}
