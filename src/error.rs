//! Error types for Paddock.
//!
//! This module defines `RacingError`, the unified error type returned by the
//! SDK and consumed by the tool bindings.
//!
//! # Security
//!
//! Error messages may embed response bodies from the remote API. Use
//! `sanitized_display()` before logging or returning them so that the
//! bearer token can never leak.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// A single field-level complaint from a 422 response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// Dotted location of the offending field (e.g. `body.lap_time`).
    pub location: String,
    /// Human-readable message from the server.
    pub message: String,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.location.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.location, self.message)
        }
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    if issues.is_empty() {
        return "no details provided".to_string();
    }
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Unified error type for all Paddock operations.
#[derive(Error, Debug)]
pub enum RacingError {
    /// Configuration error - missing or invalid environment variables.
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP request failed during transmission.
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// Non-success status code with a body we could not classify.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// The HTTP status code returned.
        status: reqwest::StatusCode,
        /// The response body (sanitized and truncated).
        body: String,
    },

    /// Request timed out.
    #[error("request timed out after {duration:?} - the API may be slow or unreachable")]
    Timeout {
        /// How long we waited before timing out.
        duration: Duration,
        /// The operation that timed out.
        operation: String,
    },

    /// The API reported that a driver or lap does not exist.
    #[error("not found: {detail}")]
    NotFound {
        /// The `detail` message from the API (e.g. "Driver not found").
        detail: String,
    },

    /// The API rejected the request shape (HTTP 422).
    #[error("request rejected by API: {}", join_issues(.issues))]
    Unprocessable {
        /// Field-level issues reported by the server.
        issues: Vec<FieldIssue>,
    },

    /// The API returned an error carrying a `detail` message.
    #[error("API error {status}: {detail}")]
    Api {
        /// The HTTP status code returned.
        status: reqwest::StatusCode,
        /// The `detail` message from the response body.
        detail: String,
    },

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Client-side input validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// Connection test failed.
    #[error("connection test failed: {message}")]
    ConnectionTest {
        /// Details about why the connection test failed.
        message: String,
    },
}

impl RacingError {
    /// Creates a configuration error for a missing environment variable.
    pub fn missing_env(var_name: &str) -> Self {
        RacingError::Config(format!(
            "missing required environment variable: {}",
            var_name
        ))
    }

    /// Creates a configuration error for an invalid value.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        RacingError::Config(message.into())
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        RacingError::Validation(message.into())
    }

    /// Creates a not found error.
    pub fn not_found(detail: impl Into<String>) -> Self {
        RacingError::NotFound {
            detail: detail.into(),
        }
    }

    /// Creates a timeout error.
    pub fn timeout(duration: Duration, operation: impl Into<String>) -> Self {
        RacingError::Timeout {
            duration,
            operation: operation.into(),
        }
    }

    /// Creates an API error from a status and `detail` message.
    pub fn api(status: reqwest::StatusCode, detail: impl Into<String>) -> Self {
        RacingError::Api {
            status,
            detail: detail.into(),
        }
    }

    /// Creates a connection test error.
    pub fn connection_test(message: impl Into<String>) -> Self {
        RacingError::ConnectionTest {
            message: message.into(),
        }
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, RacingError::NotFound { .. })
    }

    /// Returns true if the failure is transient and the caller may try again.
    ///
    /// The SDK never retries on its own; this is purely a classification.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            RacingError::Timeout { .. } => true,
            RacingError::Http(e) => e.is_timeout() || e.is_connect(),
            RacingError::HttpStatus { status, .. } | RacingError::Api { status, .. } => {
                status.as_u16() == 429 || status.is_server_error()
            }
            _ => false,
        }
    }

    /// Replaces every occurrence of `secret` in `message` with `[REDACTED]`.
    #[must_use]
    pub fn sanitize_message(message: &str, secret: &str) -> String {
        if secret.is_empty() {
            return message.to_string();
        }
        message.replace(secret, "[REDACTED]")
    }

    /// Returns this error's display message with `secret` redacted.
    #[must_use]
    pub fn sanitized_display(&self, secret: &str) -> String {
        Self::sanitize_message(&self.to_string(), secret)
    }
}
