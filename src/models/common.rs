//! Response envelopes shared across endpoints.
//!
//! The API answers successes with the bare resource and failures with a
//! `{"detail": ...}` body, where `detail` is either a message string or a
//! list of field errors (HTTP 422). [`ApiResponse::into_result`] is the
//! single place where a raw response turns into a typed value or a
//! [`RacingError`].

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{FieldIssue, RacingError};

/// Maximum length for unclassified error bodies carried in errors.
const MAX_ERROR_BODY_LEN: usize = 500;

/// Message used when a 404 carries no usable detail.
const NOT_FOUND_FALLBACK: &str = "resource not found";

/// Message used when a 422 carries no usable detail.
const UNPROCESSABLE_FALLBACK: &str = "request rejected without details";

/// Body returned by the delete endpoints, e.g. `{"detail": "Driver deleted"}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeleteResponse {
    /// Confirmation message from the server.
    pub detail: String,
}

/// Error body returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    /// Either a message or a list of field errors.
    pub detail: ErrorDetail,
}

/// The `detail` member of an error body.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    /// Plain message such as "Driver not found".
    Message(String),
    /// Field-level validation errors.
    Fields(Vec<FieldError>),
    /// Anything else; kept verbatim.
    Other(serde_json::Value),
}

/// One entry of a 422 `detail` list.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldError {
    /// Path to the offending value, e.g. `["body", "lap_time"]`.
    #[serde(default)]
    pub loc: Vec<serde_json::Value>,

    /// Human-readable message.
    #[serde(default)]
    pub msg: String,

    /// Machine-readable error type.
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
}

impl From<FieldError> for FieldIssue {
    fn from(err: FieldError) -> Self {
        let location = err
            .loc
            .iter()
            .map(|part| match part {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(".");
        FieldIssue {
            location,
            message: err.msg,
        }
    }
}

impl ErrorDetail {
    /// Renders the detail as a single message.
    pub fn message(&self) -> String {
        match self {
            ErrorDetail::Message(m) => m.clone(),
            ErrorDetail::Fields(fields) => fields
                .iter()
                .cloned()
                .map(|f| FieldIssue::from(f).to_string())
                .collect::<Vec<_>>()
                .join("; "),
            ErrorDetail::Other(v) => v.to_string(),
        }
    }
}

/// A raw HTTP response waiting to be decoded.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response body, already sanitized by the caller.
    pub body: String,
}

impl ApiResponse {
    /// Creates a response from its status and body.
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Converts the response into the expected value or a classified error.
    pub fn into_result<T>(self) -> Result<T, RacingError>
    where
        T: DeserializeOwned,
    {
        if self.status.is_success() {
            return serde_json::from_str(&self.body).map_err(RacingError::Serialization);
        }
        Err(self.into_error())
    }

    /// Classifies a non-success response.
    fn into_error(self) -> RacingError {
        let parsed: Option<ErrorBody> = serde_json::from_str(&self.body).ok();

        match (self.status, parsed) {
            (StatusCode::NOT_FOUND, Some(ErrorBody { detail })) => {
                let message = detail.message();
                if message.trim().is_empty() {
                    RacingError::not_found(NOT_FOUND_FALLBACK)
                } else {
                    RacingError::not_found(message)
                }
            }
            (StatusCode::NOT_FOUND, None) => RacingError::not_found(NOT_FOUND_FALLBACK),
            (StatusCode::UNPROCESSABLE_ENTITY, Some(ErrorBody { detail })) => match detail {
                ErrorDetail::Fields(fields) if !fields.is_empty() => RacingError::Unprocessable {
                    issues: fields.into_iter().map(FieldIssue::from).collect(),
                },
                other => {
                    let message = other.message();
                    let message = if message.trim().is_empty() {
                        UNPROCESSABLE_FALLBACK.to_string()
                    } else {
                        message
                    };
                    RacingError::Unprocessable {
                        issues: vec![FieldIssue {
                            location: String::new(),
                            message,
                        }],
                    }
                }
            },
            (status, Some(ErrorBody { detail })) => RacingError::api(status, detail.message()),
            (status, None) => RacingError::HttpStatus {
                status,
                body: truncate_body(self.body),
            },
        }
    }
}

fn truncate_body(body: String) -> String {
    if body.len() <= MAX_ERROR_BODY_LEN {
        return body;
    }
    let mut end = MAX_ERROR_BODY_LEN;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}
