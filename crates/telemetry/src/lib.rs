//! Logging setup for BankKaro tools
//!
//! This crate owns the process-wide tracing subscriber:
//! - Structured logging with tracing
//! - `RUST_LOG` overrides through `EnvFilter`
//! - A session id stamped on startup for correlating log lines
//! - Lightweight timing of operations

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

/// Global session ID for correlating logs
static SESSION_ID: Lazy<String> = Lazy::new(|| Uuid::new_v4().to_string());

/// Install the global subscriber
///
/// `RUST_LOG` wins over `config.log_level` when set. Fails if a global
/// subscriber is already installed.
pub fn init_with_config(config: TelemetryConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| anyhow::anyhow!("Invalid log filter {:?}: {}", config.log_level, e))?;

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(config.show_target)
                .with_thread_ids(config.show_thread_ids)
                .with_file(config.show_file)
                .with_line_number(config.show_line_number)
                .compact(),
        );

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    tracing::debug!(
        session_id = %session_id(),
        version = env!("CARGO_PKG_VERSION"),
        "Telemetry initialized"
    );

    Ok(())
}

/// Get the current session ID
pub fn session_id() -> &'static str {
    &SESSION_ID
}

/// Telemetry configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// `EnvFilter` directives, e.g. `warn,bankkaro_api_client=debug`
    pub log_level: String,
    /// Print the event target
    pub show_target: bool,
    /// Print thread ids
    pub show_thread_ids: bool,
    /// Print the source file
    pub show_file: bool,
    /// Print the source line
    pub show_line_number: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            show_target: false,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
        }
    }
}

impl TelemetryConfig {
    /// Debug output for the gateway crates, targets shown
    #[must_use]
    pub fn verbose() -> Self {
        Self {
            log_level: "warn,bankkaro_api_client=debug,bankkaro_cli=debug,bankkaro_telemetry=debug".to_string(),
            show_target: true,
            ..Self::default()
        }
    }
}

/// Timer for measuring operation duration
pub struct Timer {
    name: String,
    start: Instant,
}

impl Timer {
    /// Start a new timer
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: Instant::now(),
        }
    }

    /// Time elapsed so far
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and log the duration
    pub fn stop(self) -> Duration {
        let duration = self.start.elapsed();
        tracing::debug!(
            operation = %self.name,
            duration_ms = duration.as_millis(),
            "Timer completed"
        );
        duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer() {
        let timer = Timer::start("test_operation");
        std::thread::sleep(Duration::from_millis(10));
        assert!(timer.elapsed() >= Duration::from_millis(10));
        let duration = timer.stop();
        assert!(duration.as_millis() >= 10);
    }

    #[test]
    fn test_session_id() {
        let id = session_id();
        assert!(!id.is_empty());
        // Should be a valid UUID
        assert!(Uuid::parse_str(id).is_ok());
        assert_eq!(id, session_id());
    }

    #[test]
    fn test_config_partial_deserialize() {
        let config: TelemetryConfig =
            serde_json::from_str(r#"{"log_level": "debug", "show_file": true}"#).unwrap();
        assert_eq!(config.log_level, "debug");
        assert!(config.show_file);
        assert!(!config.show_target);
    }

    #[test]
    fn test_verbose_filter_parses() {
        let config = TelemetryConfig::verbose();
        assert!(EnvFilter::try_new(&config.log_level).is_ok());
        assert!(config.show_target);
    }

    #[test]
    fn test_double_init_fails() {
        // Only the first installer in a process may succeed
        let first = init_with_config(TelemetryConfig::default());
        let second = init_with_config(TelemetryConfig::default());
        assert!(first.is_ok());
        assert!(second.is_err());
    }
}
