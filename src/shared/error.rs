//! API Error Types
//!
//! This module defines the error taxonomy for remote API calls. Every
//! non-2xx response and every transport failure is translated into an
//! [`ApiError`] at the API client boundary; nothing deeper in the
//! application inspects HTTP statuses.
//!
//! # Error Kinds
//!
//! - `Network` - transport failure, no response was received
//! - `Unauthorized` - session missing, expired, or invalid for the action
//! - `Validation` - the server rejected the request data (4xx)
//! - `NotFound` - the target resource is absent (e.g. already deleted)
//! - `Unknown` - unclassified non-2xx response
use thiserror::Error;

/// Classification of an API failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Transport failure, no response received
    Network,
    /// Session missing, expired, or rejected
    Unauthorized,
    /// Request data rejected by the server
    Validation,
    /// Target resource does not exist
    NotFound,
    /// Anything else
    Unknown,
}

/// Error returned by every remote operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    /// What class of failure this is
    pub kind: ApiErrorKind,
    /// Human-readable message, suitable for display
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Create a new network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Network, message)
    }

    /// Create a new unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Unauthorized, message)
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Validation, message)
    }

    /// Create a new not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::NotFound, message)
    }

    /// Create a new unclassified error
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Unknown, message)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Translate a non-2xx response into a typed error.
    ///
    /// The message is taken from the body's `error` or `detail` key (the
    /// two shapes the remote API produces), with the raw body or the
    /// status line as fallback.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .get("error")
                    .or_else(|| value.get("detail"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    format!("request failed with status {status}")
                } else {
                    trimmed.to_string()
                }
            });

        let kind = match status {
            401 | 403 => ApiErrorKind::Unauthorized,
            404 => ApiErrorKind::NotFound,
            400..=499 => ApiErrorKind::Validation,
            _ => ApiErrorKind::Unknown,
        };

        Self::new(kind, message)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() || err.is_request() {
            Self::network(format!("Network error: {err}"))
        } else {
            Self::unknown(err.to_string())
        }
    }
}
