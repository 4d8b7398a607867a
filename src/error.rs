// src/error.rs
//! Application error types with structured error handling.
//!
//! The variants mirror how the watch loop and the one-shot commands react:
//! a rate limit is waited out, a failed request is reported, invalid input
//! aborts the single operation, and notification failures are swallowed.

use std::fmt;
use thiserror::Error;

/// X API error classes as a typed vocabulary.
///
/// Built from the HTTP status of a failed response so callers can match
/// on meaning instead of raw numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Credentials missing, invalid or expired
    Unauthorized,
    /// The app or tier lacks access to this endpoint
    Forbidden,
    /// Tweet or user does not exist
    NotFound,
    /// Request parameters rejected
    BadRequest,
    /// Platform-side failure
    ServerError,
    /// Any other status
    Other(u16),
}

impl ApiErrorKind {
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            500..=599 => Self::ServerError,
            other => Self::Other(other),
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::Forbidden => write!(f, "forbidden"),
            Self::NotFound => write!(f, "not_found"),
            Self::BadRequest => write!(f, "bad_request"),
            Self::ServerError => write!(f, "server_error"),
            Self::Other(code) => write!(f, "http_{}", code),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Rate limited. Resets at {reset_at}.")]
    RateLimited { reset_at: String },

    #[error("API error (HTTP {status}): {message}")]
    RequestFailed { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Notification failed: {0}")]
    NotificationFailure(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    Render(#[from] fmt::Error),

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),
}

impl AppError {
    /// Classifies a failed API response, if this is one.
    pub fn api_kind(&self) -> Option<ApiErrorKind> {
        match self {
            Self::RequestFailed { status, .. } => Some(ApiErrorKind::from_http_status(*status)),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ValidationError;

    #[test]
    fn test_error_messages() {
        let err = AppError::RateLimited {
            reset_at: "1700000000".to_string(),
        };
        assert_eq!(err.to_string(), "Rate limited. Resets at 1700000000.");

        let err = AppError::RequestFailed {
            status: 403,
            message: "Forbidden".to_string(),
        };
        assert_eq!(err.to_string(), "API error (HTTP 403): Forbidden");
        assert_eq!(err.api_kind(), Some(ApiErrorKind::Forbidden));
    }

    #[test]
    fn test_validation_errors_are_transparent() {
        let err: AppError = ValidationError::InvalidTweetId("abc".to_string()).into();
        assert_eq!(err.to_string(), "Invalid tweet ID or URL: abc");
    }

    #[test]
    fn test_api_kind_from_status() {
        assert_eq!(ApiErrorKind::from_http_status(401), ApiErrorKind::Unauthorized);
        assert_eq!(ApiErrorKind::from_http_status(503), ApiErrorKind::ServerError);
        assert_eq!(ApiErrorKind::from_http_status(418), ApiErrorKind::Other(418));
        assert_eq!(ApiErrorKind::Other(418).to_string(), "http_418");
    }
}
