//! Error types for ARM operations.
//!
//! This module provides the error hierarchy for Azure Resource Manager
//! operations, including the structured `CloudError` payload that ARM
//! endpoints return alongside undeclared status codes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for ARM operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A required parameter was absent or empty; raised before any network call
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The service answered with a status code outside the endpoint's declared set
    #[error("Service error {status}: {error}")]
    Cloud {
        /// HTTP status code returned by the service
        status: u16,
        /// Structured error payload from the response body
        error: CloudError,
    },

    /// HTTP request failed at the transport level
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Transport-level timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The endpoint could not be reached
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// A declared status code arrived with a body that does not match its schema
    #[error("Failed to deserialize response: {0}")]
    Deserialize(String),

    /// A long-running operation was still pending when the wait bound expired
    #[error("Long-running operation interrupted: {0}")]
    PollingInterrupted(String),

    /// Request body failed validation before dispatch
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid endpoint or malformed URL
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Invalid identifier (subscription id is not a UUID)
    #[error("Invalid identifier: {0}")]
    InvalidId(String),
}

/// Specialized result type for ARM operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Structured error payload returned by ARM endpoints.
///
/// Most management-plane errors carry this body under an `error` envelope;
/// some older providers return it bare, and a few return plain text. The
/// parsing in [`CloudError::from_body`] tolerates all three.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CloudError {
    /// Error code for programmatic handling (e.g. `ResourceNotFound`)
    #[serde(default)]
    pub code: String,
    /// Human-readable message, localized per the request's accept-language
    #[serde(default)]
    pub message: String,
    /// The property or resource the error refers to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Nested detail entries
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<CloudError>,
}

impl CloudError {
    /// Parse a `CloudError` from a raw response body.
    ///
    /// Accepts the `{"error": {...}}` envelope, a bare error object, or
    /// plain text (which becomes the message with an empty code).
    #[must_use]
    pub fn from_body(body: &[u8]) -> Self {
        #[derive(Deserialize)]
        struct Envelope {
            error: CloudError,
        }

        if let Ok(envelope) = serde_json::from_slice::<Envelope>(body) {
            return envelope.error;
        }
        if let Ok(bare) = serde_json::from_slice::<CloudError>(body) {
            if !bare.code.is_empty() || !bare.message.is_empty() {
                return bare;
            }
        }
        Self {
            code: String::new(),
            message: String::from_utf8_lossy(body).into_owned(),
            target: None,
            details: Vec::new(),
        }
    }
}

impl std::fmt::Display for CloudError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.code.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::Cloud { .. } => "CLOUD_ERROR",
            Self::Http(_) => "HTTP_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::Deserialize(_) => "DESERIALIZE_ERROR",
            Self::PollingInterrupted(_) => "POLLING_INTERRUPTED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
            Self::InvalidId(_) => "INVALID_ID",
        }
    }

    /// Returns the HTTP status code carried by a service error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Cloud { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Build a service error from a status code and raw body.
    #[must_use]
    pub fn cloud(status: u16, body: &[u8]) -> Self {
        Self::Cloud {
            status,
            error: CloudError::from_body(body),
        }
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ServiceUnavailable(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Deserialize(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<uuid::Error> for Error {
    fn from(err: uuid::Error) -> Self {
        Self::InvalidId(err.to_string())
    }
}
