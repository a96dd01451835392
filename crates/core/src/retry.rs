//! Retry policy with exponential backoff
//!
//! The policy only describes *when* to try again; the async caller owns the
//! sleeping so it can suspend without blocking a thread.
//!
//! # Example
//!
//! ```rust
//! use bankkaro_core::retry::RetryConfig;
//! use std::time::Duration;
//!
//! let policy = RetryConfig::default();
//! assert_eq!(policy.max_attempts(), 3);
//! assert_eq!(policy.delay_for_attempt(1), Duration::from_secs(1));
//! assert_eq!(policy.delay_for_attempt(2), Duration::from_secs(2));
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Additional attempts after the first one fails
    pub max_retries: u32,
    /// Delay before the first retry
    #[serde(with = "crate::config::serde_millis")]
    pub initial_delay: Duration,
    /// Upper bound on any single delay
    #[serde(with = "crate::config::serde_millis")]
    pub max_delay: Duration,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    /// Two retries, waiting 1s then 2s
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// Create a config with no retries
    #[must_use]
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            backoff_multiplier: 1.0,
        }
    }

    /// Total attempts including the first one
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Whether another attempt is allowed after `attempts_made` attempts
    #[must_use]
    pub fn should_retry(&self, attempts_made: u32) -> bool {
        attempts_made < self.max_attempts()
    }

    /// Delay to wait before retry number `retry` (1-based); zero for 0
    #[must_use]
    pub fn delay_for_attempt(&self, retry: u32) -> Duration {
        if retry == 0 {
            return Duration::ZERO;
        }

        let exponent = i32::try_from(retry - 1).unwrap_or(i32::MAX);
        let base = self.initial_delay.as_secs_f64() * self.backoff_multiplier.powi(exponent);
        let capped = base.min(self.max_delay.as_secs_f64());

        Duration::try_from_secs_f64(capped).unwrap_or(self.max_delay)
    }
}
