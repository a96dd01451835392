//! Client-side request throttling
//!
//! A fixed-window limiter keyed by caller-chosen strings (endpoint name,
//! search box id, ...). The limiter is an explicit value handed to whoever
//! needs it, never ambient state.
//!
//! # Example
//!
//! ```rust
//! use bankkaro_core::rate_limit::{RateLimitConfig, RateLimiter};
//!
//! let limiter = RateLimiter::new(RateLimitConfig::search());
//!
//! if limiter.try_acquire("all-cards-search") {
//!     // Proceed with the request
//! } else {
//!     // Rate limited, ask the user to slow down
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Rate limiter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum requests per window
    pub max_requests: u32,
    /// Window length
    #[serde(with = "crate::config::serde_millis")]
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::api()
    }
}

impl RateLimitConfig {
    /// Limit for free-text search: 10 requests per minute
    #[must_use]
    pub fn search() -> Self {
        Self::per_minute(10)
    }

    /// Limit for backend API calls: 20 requests per minute
    #[must_use]
    pub fn api() -> Self {
        Self::per_minute(20)
    }

    /// Per-minute rate limit
    #[must_use]
    pub fn per_minute(max: u32) -> Self {
        Self {
            max_requests: max,
            window: Duration::from_secs(60),
        }
    }

    /// Arbitrary window
    #[must_use]
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
        }
    }
}

/// State of one key's current window
#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    reset_at: Instant,
}

/// Fixed-window rate limiter with one window per key
#[derive(Debug)]
pub struct RateLimiter {
    windows: RwLock<HashMap<String, Window>>,
    config: RateLimitConfig,
}

impl RateLimiter {
    /// Create a new rate limiter
    #[must_use]
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            windows: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Configuration in use
    #[must_use]
    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Try to take one request slot for `key`
    #[must_use]
    pub fn try_acquire(&self, key: &str) -> bool {
        self.try_acquire_at(key, Instant::now())
    }

    fn try_acquire_at(&self, key: &str, now: Instant) -> bool {
        // A poisoned map is still consistent; every write is a single insert
        let mut windows = self.windows.write().unwrap_or_else(|e| e.into_inner());

        if let Some(window) = windows.get_mut(key).filter(|w| now <= w.reset_at) {
            if window.count >= self.config.max_requests {
                return false;
            }
            window.count += 1;
            return true;
        }

        if self.config.max_requests == 0 {
            return false;
        }
        windows.insert(
            key.to_string(),
            Window {
                count: 1,
                reset_at: now + self.config.window,
            },
        );
        true
    }

    /// Forget the window for `key`
    pub fn reset(&self, key: &str) {
        let mut windows = self.windows.write().unwrap_or_else(|e| e.into_inner());
        windows.remove(key);
    }

    /// Forget every window
    pub fn reset_all(&self) {
        let mut windows = self.windows.write().unwrap_or_else(|e| e.into_inner());
        windows.clear();
    }

    /// Current status for `key`
    #[must_use]
    pub fn status(&self, key: &str) -> RateLimitStatus {
        self.status_at(key, Instant::now())
    }

    fn status_at(&self, key: &str, now: Instant) -> RateLimitStatus {
        let windows = self.windows.read().unwrap_or_else(|e| e.into_inner());
        let max = self.config.max_requests;

        match windows.get(key) {
            Some(window) if now <= window.reset_at => RateLimitStatus {
                available: max.saturating_sub(window.count),
                max,
                reset_in: window.reset_at.saturating_duration_since(now),
            },
            _ => RateLimitStatus {
                available: max,
                max,
                reset_in: Duration::ZERO,
            },
        }
    }
}

/// Rate limit status
#[derive(Debug, Clone, Serialize)]
pub struct RateLimitStatus {
    /// Requests left in the current window
    pub available: u32,
    /// Requests allowed per window
    pub max: u32,
    /// Time until the current window closes
    pub reset_in: Duration,
}
