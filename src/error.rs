//! Error types for event-reports
//!
//! This module provides the error handling for the service, including:
//! - A single crate-wide error enum covering fetch, packaging and persistence failures
//! - HTTP status code mapping for API integration
//! - Structured error responses with machine-readable error codes

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Result type alias for event-reports operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for event-reports
///
/// Every failure during report generation aborts the whole call; there is no partial
/// document and no retry. Each variant carries enough context to tell the caller which
/// step failed.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "PORT")
        key: Option<String>,
    },

    /// I/O error (report directory, temporary file, rename)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network error raised by the HTTP client
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A referenced image could not be retrieved
    #[error("failed to fetch image '{label}' from {reference}: {reason}")]
    ImageFetch {
        /// The remote reference (URL or path) that was requested
        reference: String,
        /// The label the composer attached to the image
        label: String,
        /// Why the fetch failed
        reason: String,
    },

    /// The document package could not be written
    #[error("document packaging error: {0}")]
    Package(#[from] zip::result::ZipError),

    /// Inbound payload does not have the shape the record adapters need
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// Request is missing or carries an unusable parameter
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Requested report does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// API server error
    #[error("API server error: {0}")]
    ApiServerError(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// API error response format
///
/// This structure is returned by API endpoints when an error occurs.
///
/// # Example JSON Response
///
/// ```json
/// {
///   "error": {
///     "code": "image_fetch_failed",
///     "message": "failed to fetch image 'evento-7-imagen' from http://cdn/x.jpg: HTTP 404",
///     "details": {
///       "reference": "http://cdn/x.jpg",
///       "label": "evento-7-imagen"
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// The error details
    pub error: ErrorDetail,
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "not_found", "invalid_request")
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional context about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error with code and message
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    /// Create an API error with additional details
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: Some(details),
            },
        }
    }
}

/// Convert errors to HTTP status codes for API responses
pub trait ToHttpStatus {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> u16;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToHttpStatus for Error {
    fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - Client error (missing parameter)
            Error::InvalidRequest(_) => 400,

            // 404 Not Found
            Error::NotFound(_) => 404,

            // 422 Unprocessable Entity - payload does not match the record shapes
            Error::InvalidPayload(_) => 422,

            // 502 Bad Gateway - remote image host failed
            Error::ImageFetch { .. } => 502,
            Error::Network(_) => 502,

            // 500 Internal Server Error - Server-side issues
            Error::Config { .. } => 500,
            Error::Io(_) => 500,
            Error::Package(_) => 500,
            Error::ApiServerError(_) => 500,
            Error::Other(_) => 500,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Config { .. } => "config_error",
            Error::Io(_) => "io_error",
            Error::Network(_) => "network_error",
            Error::ImageFetch { .. } => "image_fetch_failed",
            Error::Package(_) => "package_error",
            Error::InvalidPayload(_) => "invalid_payload",
            Error::InvalidRequest(_) => "invalid_request",
            Error::NotFound(_) => "not_found",
            Error::ApiServerError(_) => "api_server_error",
            Error::Other(_) => "internal_error",
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        let code = error.error_code().to_string();
        let message = error.to_string();

        let details = match &error {
            Error::ImageFetch {
                reference, label, ..
            } => Some(serde_json::json!({
                "reference": reference,
                "label": label,
            })),
            Error::Config { key: Some(key), .. } => Some(serde_json::json!({
                "key": key,
            })),
            _ => None,
        };

        match details {
            Some(details) => ApiError::with_details(code, message, details),
            None => ApiError::new(code, message),
        }
    }
}
