//! Configuration for the BankKaro API client
//!
//! Defaults point at the production endpoints; environment variables and
//! `bankkaro.toml` settings override them.

use crate::error::{ApiError, ApiResult};
use bankkaro_core::config::{
    GatewaySettings, RateLimitSettings, DEFAULT_CALCULATOR_URL, DEFAULT_CARDS_URL,
    DEFAULT_TIMEOUT_MS,
};
use bankkaro_core::rate_limit::RateLimitConfig;
use bankkaro_core::retry::RetryConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Card catalog endpoint
    pub cards_url: String,
    /// Reward calculator endpoint
    pub calculator_url: String,
    /// Deadline applied to every attempt
    #[serde(with = "bankkaro_core::config::serde_millis")]
    pub timeout: Duration,
    /// Retry policy for the card list
    pub cards_retry: RetryConfig,
    /// Retry policy for the calculator
    pub calculator_retry: RetryConfig,
    /// Client-side throttling; `None` disables it
    pub rate_limit: Option<RateLimitConfig>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            cards_url: DEFAULT_CARDS_URL.to_string(),
            calculator_url: DEFAULT_CALCULATOR_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            cards_retry: RetryConfig::default(),
            calculator_retry: RetryConfig::no_retry(),
            rate_limit: None,
        }
    }
}

impl ClientConfig {
    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `BANKKARO_CARDS_URL`: card catalog endpoint
    /// - `BANKKARO_CALCULATOR_URL`: reward calculator endpoint
    /// - `BANKKARO_TIMEOUT_MS`: per-request deadline in milliseconds
    pub fn from_env() -> ApiResult<Self> {
        let mut config = Self::default();

        if let Ok(url) = env::var("BANKKARO_CARDS_URL") {
            config.cards_url = url;
        }
        if let Ok(url) = env::var("BANKKARO_CALCULATOR_URL") {
            config.calculator_url = url;
        }
        if let Ok(raw) = env::var("BANKKARO_TIMEOUT_MS") {
            let millis: u64 = raw
                .parse()
                .map_err(|_| ApiError::config(format!("BANKKARO_TIMEOUT_MS is not a number: {raw}")))?;
            config.timeout = Duration::from_millis(millis);
        }

        config.validate()?;
        Ok(config)
    }

    /// Build from `bankkaro.toml` settings
    #[must_use]
    pub fn from_settings(gateway: &GatewaySettings, rate_limit: &RateLimitSettings) -> Self {
        Self {
            cards_url: gateway.cards_url.clone(),
            calculator_url: gateway.calculator_url.clone(),
            timeout: Duration::from_millis(gateway.timeout_ms),
            cards_retry: gateway.cards_retry.clone(),
            calculator_retry: gateway.calculator_retry.clone(),
            rate_limit: rate_limit.enabled.then(|| rate_limit.api.clone()),
        }
    }

    /// Builder-style method to set the card catalog URL
    #[must_use]
    pub fn with_cards_url(mut self, url: impl Into<String>) -> Self {
        self.cards_url = url.into();
        self
    }

    /// Builder-style method to set the calculator URL
    #[must_use]
    pub fn with_calculator_url(mut self, url: impl Into<String>) -> Self {
        self.calculator_url = url.into();
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set the card list retry policy
    #[must_use]
    pub fn with_cards_retry(mut self, retry: RetryConfig) -> Self {
        self.cards_retry = retry;
        self
    }

    /// Builder-style method to set the calculator retry policy
    #[must_use]
    pub fn with_calculator_retry(mut self, retry: RetryConfig) -> Self {
        self.calculator_retry = retry;
        self
    }

    /// Builder-style method to enable client-side throttling
    #[must_use]
    pub fn with_rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.rate_limit = Some(rate_limit);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        for (name, url) in [
            ("cards_url", &self.cards_url),
            ("calculator_url", &self.calculator_url),
        ] {
            if url.is_empty() {
                return Err(ApiError::config(format!("{name} cannot be empty")));
            }
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ApiError::config(format!(
                    "{name} must start with http:// or https://"
                )));
            }
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        Ok(())
    }
}
