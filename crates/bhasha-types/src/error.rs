//! Error type shared by every bhasha operation.
//!
//! [`ApiError`] buckets a failure by where it originated. The numeric
//! [`status_code`](ApiError::status_code) mirrors the remote convention:
//! the HTTP status for remote errors, `0` when no response arrived and
//! `-1` for anything that failed locally before a request went out.

use serde_json::Value;
use thiserror::Error;

/// Message used when a remote error response carries no `message` field.
pub const GENERIC_REMOTE_MESSAGE: &str = "API request failed";

/// Message used when a request was sent but nothing came back.
pub const NO_RESPONSE_MESSAGE: &str = "Network error - no response received";

/// Errors returned by the pipeline adapter and the service layer.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ApiError {
    /// Required local input is missing or malformed (empty text, empty
    /// token, rating out of range). Raised before any network call.
    #[error("{0}")]
    Validation(String),

    /// The remote service answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Remote {
        /// HTTP status code.
        status: u16,
        /// `message` from the response body, or [`GENERIC_REMOTE_MESSAGE`].
        message: String,
        /// Parsed response body (JSON, or the raw text as a JSON string).
        body: Option<Value>,
    },

    /// The request went out but no response was received (connect
    /// failure, timeout, connection dropped mid-body).
    #[error("{0}")]
    Network(String),

    /// The request could not be constructed or sent at all.
    #[error("request failed locally: {0}")]
    Local(String),
}

impl ApiError {
    /// Build a [`ApiError::Remote`] from a status code and raw body text.
    ///
    /// The message comes from a top-level string `message` field when the
    /// body is a JSON object that has one; otherwise the generic message
    /// is used. Non-JSON bodies are kept as a JSON string.
    pub fn remote(status: u16, body_text: &str) -> Self {
        let body = if body_text.trim().is_empty() {
            None
        } else {
            Some(
                serde_json::from_str::<Value>(body_text)
                    .unwrap_or_else(|_| Value::String(body_text.to_string())),
            )
        };

        let message = body
            .as_ref()
            .and_then(|b| b.get("message"))
            .and_then(Value::as_str)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(GENERIC_REMOTE_MESSAGE)
            .to_string();

        ApiError::Remote {
            status,
            message,
            body,
        }
    }

    /// Numeric origin code: HTTP status, `0` (no response) or `-1` (local).
    pub fn status_code(&self) -> i32 {
        match self {
            ApiError::Remote { status, .. } => i32::from(*status),
            ApiError::Network(_) => 0,
            ApiError::Validation(_) | ApiError::Local(_) => -1,
        }
    }

    /// The human-readable message, without the origin prefix.
    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation(m) | ApiError::Network(m) | ApiError::Local(m) => m,
            ApiError::Remote { message, .. } => message,
        }
    }

    /// The remote response body, when there was one.
    pub fn raw_body(&self) -> Option<&Value> {
        match self {
            ApiError::Remote { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// Returns `true` for errors raised before any network call.
    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }
}

/// A convenience type alias for bhasha operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Failures while reading or parsing a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
