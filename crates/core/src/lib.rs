//! Core utilities shared by the BankKaro gateway crates
//!
//! This crate provides:
//!
//! - **Error handling**: Coded errors with context and recovery suggestions
//! - **Validation**: Fluent validator, input sanitizers and slider clamping
//! - **Rate limiting**: Fixed-window per-key limiter passed in as a value
//! - **Retry policy**: Exponential backoff schedule for transient failures
//! - **Configuration**: Optional `bankkaro.toml` with defaults for every field
//!
//! # Example
//!
//! ```rust
//! use bankkaro_core::validation::validate_and_sanitize_search;
//!
//! assert_eq!(validate_and_sanitize_search("  fuel <cards> "), "fuel cards");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod rate_limit;
pub mod retry;
pub mod validation;

pub use error::{Error, ErrorCode, ErrorReport, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema, GatewaySettings, RateLimitSettings};
    pub use crate::error::{Error, ErrorCode, Result, ResultExt};
    pub use crate::rate_limit::{RateLimitConfig, RateLimiter};
    pub use crate::retry::RetryConfig;
    pub use crate::validation::{ValidationResult, Validator};
}
