//! The error signal every failed request is normalized to.

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use wanderlust_core::error::{AppError, ErrorKind};

/// Message shown for every error whose details must stay private.
pub const DEFAULT_ERROR_MESSAGE: &str = "Something Went Wrong...";

/// Message shown when no route matches.
pub const NOT_FOUND_MESSAGE: &str = "Page Not Found !!!";

/// A `(status, message)` pair forwarded to the error-render stage.
///
/// Turning a signal into a response produces no body: the response only
/// carries the signal in its extensions, and the error-render stage
/// replaces it with the error view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSignal {
    pub status: StatusCode,
    pub message: String,
}

impl ErrorSignal {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Signal for an error status that reached the error stage without one.
    ///
    /// Server errors get the generic message; client errors their reason phrase.
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::NOT_FOUND | StatusCode::METHOD_NOT_ALLOWED => Self::not_found(),
            s if s.is_client_error() => {
                Self::new(s, s.canonical_reason().unwrap_or(DEFAULT_ERROR_MESSAGE))
            }
            s => Self::new(s, DEFAULT_ERROR_MESSAGE),
        }
    }
}

impl Default for ErrorSignal {
    fn default() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, DEFAULT_ERROR_MESSAGE)
    }
}

impl fmt::Display for ErrorSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status.as_u16(), self.message)
    }
}

impl std::error::Error for ErrorSignal {}

impl From<AppError> for ErrorSignal {
    fn from(err: AppError) -> Self {
        let status = match err.kind {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
            ErrorKind::Authorization => StatusCode::FORBIDDEN,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            _ => {
                error!(kind = %err.kind, error = %err, "Unhandled application error");
                return Self::default();
            }
        };
        Self::new(status, err.message)
    }
}

impl IntoResponse for ErrorSignal {
    fn into_response(self) -> Response {
        let mut response = self.status.into_response();
        response.extensions_mut().insert(self);
        response
    }
}
