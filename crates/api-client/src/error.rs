//! Error types for the API client

use bankkaro_core::validation::ValidationResult;
use bankkaro_core::{Error as CoreError, ErrorCode};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API client errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Outgoing payload failed its schema before any network call
    #[error("Invalid payload: {0}")]
    Validation(String),

    /// Connection refused/reset, DNS failure and similar
    #[error("Transport error: {0}")]
    Transport(String),

    /// Deadline exceeded; the in-flight request was aborted
    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    /// Endpoint answered with a non-2xx status
    #[error("HTTP error! status: {status}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Response body, truncated
        message: String,
    },

    /// Body did not match the expected response schema
    #[error("Unexpected response shape: {0}")]
    ResponseShape(String),

    /// Client-side limiter refused the call
    #[error("Rate limited locally for key '{0}'")]
    RateLimited(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            message: message.into(),
        }
    }

    /// Create a response shape error
    pub fn response_shape(msg: impl Into<String>) -> Self {
        Self::ResponseShape(msg.into())
    }

    /// Only network-level failures are worth another attempt
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout(_) => true,
            Self::Validation(_)
            | Self::HttpStatus { .. }
            | Self::ResponseShape(_)
            | Self::RateLimited(_)
            | Self::Config(_) => false,
        }
    }

    /// HTTP status carried by the error, if any
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Bucket used to pick the user-facing message
    #[must_use]
    pub fn category(&self) -> FailureCategory {
        match self {
            Self::HttpStatus { status: 429, .. } | Self::RateLimited(_) => {
                FailureCategory::RateLimited
            }
            Self::HttpStatus { status, .. } if *status >= 500 => {
                FailureCategory::ServiceUnavailable
            }
            Self::Timeout(_) => FailureCategory::Timeout,
            _ => FailureCategory::Other,
        }
    }
}

/// Coded form used by CLI reports; the HTTP body, if any, becomes context
impl From<ApiError> for CoreError {
    fn from(err: ApiError) -> Self {
        let message = err.to_string();
        match err {
            ApiError::Validation(_) => CoreError::validation(message)
                .with_suggestion("Check the filters and spends sent with the request"),
            ApiError::Transport(_) => CoreError::new(ErrorCode::ConnectionFailed, message)
                .with_suggestion("Check your network connection and the endpoint URL"),
            ApiError::Timeout(_) => CoreError::new(ErrorCode::Timeout, message)
                .with_suggestion("Retry later or raise BANKKARO_TIMEOUT_MS"),
            ApiError::HttpStatus { status, message: body } => {
                let code = if status == 429 {
                    ErrorCode::RateLimited
                } else {
                    ErrorCode::HttpStatus
                };
                let mut report = CoreError::new(code, message);
                if !body.is_empty() {
                    report = report.with_context(body);
                }
                if status == 429 {
                    report.with_suggestion("Wait a minute before retrying")
                } else if status >= 500 {
                    report.with_suggestion("The service is having trouble; try again later")
                } else {
                    report
                }
            }
            ApiError::ResponseShape(_) => CoreError::new(ErrorCode::ResponseShape, message)
                .with_suggestion("The endpoint may have changed its response format"),
            ApiError::RateLimited(_) => CoreError::new(ErrorCode::RateLimited, message)
                .with_suggestion("Wait a minute before retrying"),
            ApiError::Config(_) => CoreError::config(message)
                .with_suggestion("Check bankkaro.toml and the BANKKARO_* environment"),
        }
    }
}

impl From<ValidationResult> for ApiError {
    fn from(result: ValidationResult) -> Self {
        Self::Validation(result.summary())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::ResponseShape(err.to_string())
    }
}

/// Failure buckets surfaced to users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureCategory {
    /// HTTP 429 or local throttling
    RateLimited,
    /// HTTP 5xx
    ServiceUnavailable,
    /// Deadline exceeded
    Timeout,
    /// Anything else
    Other,
}

impl FailureCategory {
    /// Message shown when the card list cannot be loaded
    #[must_use]
    pub fn cards_message(self) -> &'static str {
        match self {
            Self::RateLimited => "Too many requests. Please wait and try again.",
            Self::ServiceUnavailable => "Service temporarily unavailable. Please try again later.",
            Self::Timeout => "Request timed out. Please check your connection.",
            Self::Other => "Unable to load cards. Please try again.",
        }
    }
}

impl fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RateLimited => "rate_limited",
            Self::ServiceUnavailable => "service_unavailable",
            Self::Timeout => "timeout",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}
