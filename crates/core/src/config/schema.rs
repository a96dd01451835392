//! Configuration schema definitions

use crate::rate_limit::RateLimitConfig;
use crate::retry::RetryConfig;
use serde::{Deserialize, Serialize};

/// Default card catalog endpoint
pub const DEFAULT_CARDS_URL: &str = "https://bk-api.bankkaro.com/sp/api/cards";

/// Default reward calculator endpoint
pub const DEFAULT_CALCULATOR_URL: &str =
    "https://card-recommendation-api-v2.bankkaro.com/cg/api/pro";

/// Default per-request deadline in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Root configuration schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// `[gateway]` table
    #[serde(default)]
    pub gateway: GatewaySettings,

    /// `[rate_limit]` table
    #[serde(default)]
    pub rate_limit: RateLimitSettings,
}

/// Endpoint and resilience settings for the request gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewaySettings {
    /// Card catalog endpoint
    #[serde(default = "default_cards_url")]
    pub cards_url: String,

    /// Reward calculator endpoint
    #[serde(default = "default_calculator_url")]
    pub calculator_url: String,

    /// Per-request deadline
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Retry policy for the card list
    #[serde(default)]
    pub cards_retry: RetryConfig,

    /// Retry policy for the calculator
    #[serde(default = "RetryConfig::no_retry")]
    pub calculator_retry: RetryConfig,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            cards_url: default_cards_url(),
            calculator_url: default_calculator_url(),
            timeout_ms: default_timeout_ms(),
            cards_retry: RetryConfig::default(),
            calculator_retry: RetryConfig::no_retry(),
        }
    }
}

fn default_cards_url() -> String {
    DEFAULT_CARDS_URL.to_string()
}

fn default_calculator_url() -> String {
    DEFAULT_CALCULATOR_URL.to_string()
}

const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Client-side throttling settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitSettings {
    /// Whether the gateway throttles itself before calling out
    #[serde(default)]
    pub enabled: bool,

    /// Limit applied to backend calls
    #[serde(default = "RateLimitConfig::api")]
    pub api: RateLimitConfig,

    /// Limit applied to search boxes
    #[serde(default = "RateLimitConfig::search")]
    pub search: RateLimitConfig,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            api: RateLimitConfig::api(),
            search: RateLimitConfig::search(),
        }
    }
}
