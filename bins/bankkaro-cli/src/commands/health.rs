//! Health command - hit both endpoints and report raw failures
//!
//! Uses the error-returning calls, so nothing is retried into a
//! notification: each endpoint reports its coded error directly.

use crate::output::{format_count, format_duration, print_json, OutputFormat, Status};
use crate::session::Session;
use anyhow::{bail, Result};
use bankkaro_api_client::{ApiResult, CalculatorPayload, CardQueryPayload, Endpoint};
use bankkaro_core::{Error, ErrorReport};
use bankkaro_telemetry::Timer;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct EndpointHealth {
    name: &'static str,
    url: String,
    status: &'static str,
    response_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorReport>,
}

impl EndpointHealth {
    fn new(endpoint: Endpoint, url: &str, outcome: ApiResult<String>, elapsed: Duration) -> Self {
        let (status, detail, error) = match outcome {
            Ok(detail) => ("ok", Some(detail), None),
            Err(e) => ("error", None, Some(Error::from(e).to_report())),
        };
        Self {
            name: endpoint.key(),
            url: url.to_string(),
            status,
            response_time_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            detail,
            error,
        }
    }

    fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Serialize)]
struct JsonHealthOutput<'a> {
    endpoints: &'a [EndpointHealth],
    overall: &'static str,
}

/// Run health check for both endpoints
pub async fn run(session: &Session, format: OutputFormat) -> Result<()> {
    let config = session.client.config().clone();

    let timer = Timer::start("health.cards");
    let cards = session
        .client
        .try_fetch_cards(&CardQueryPayload::new())
        .await
        .map(|cards| format_count(cards.len(), "card", "cards"));
    let cards = EndpointHealth::new(Endpoint::Cards, &config.cards_url, cards, timer.stop());

    let timer = Timer::start("health.calculator");
    let calculator = session
        .client
        .try_fetch_calculator_result(&CalculatorPayload::with_defaults())
        .await
        .map(|_| "result received".to_string());
    let calculator = EndpointHealth::new(
        Endpoint::Calculator,
        &config.calculator_url,
        calculator,
        timer.stop(),
    );

    let endpoints = [cards, calculator];
    let failed = endpoints.iter().filter(|e| !e.is_ok()).count();

    match format {
        OutputFormat::Json => print_json(&JsonHealthOutput {
            endpoints: &endpoints,
            overall: if failed == 0 { "healthy" } else { "degraded" },
        })?,
        OutputFormat::Text => print_text(&endpoints),
    }

    if failed > 0 {
        bail!("{failed} of {} endpoints unhealthy", endpoints.len());
    }
    Ok(())
}

fn print_text(endpoints: &[EndpointHealth]) {
    Status::header("Endpoint health");

    for endpoint in endpoints {
        let elapsed = format_duration(Duration::from_millis(endpoint.response_time_ms));
        match &endpoint.error {
            None => println!(
                "  {:<12} {} {} {}",
                endpoint.name,
                "✓ OK".green(),
                endpoint.detail.as_deref().unwrap_or_default(),
                format!("({elapsed})").dimmed()
            ),
            Some(report) => {
                println!(
                    "  {:<12} {} [{}] {}",
                    endpoint.name,
                    "✗".red(),
                    report.code_str,
                    report.message
                );
                if let Some(context) = &report.context {
                    println!("    {} {}", "└─".dimmed(), context.dimmed());
                }
                if let Some(suggestion) = &report.suggestion {
                    println!("    {} {}", "└─".dimmed(), suggestion.yellow());
                }
            }
        }
        println!("    {}", endpoint.url.dimmed());
    }

    println!();
    if endpoints.iter().all(EndpointHealth::is_ok) {
        Status::success("All endpoints healthy");
    } else {
        Status::warning("Some endpoints have issues");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bankkaro_api_client::ApiError;

    #[test]
    fn test_failed_endpoint_carries_report() {
        let health = EndpointHealth::new(
            Endpoint::Cards,
            "https://example.test/cards",
            Err(ApiError::http_status(503, "maintenance")),
            Duration::from_millis(42),
        );

        assert!(!health.is_ok());
        let json = serde_json::to_value(&health).unwrap();
        assert_eq!(json["name"], "cards");
        assert_eq!(json["status"], "error");
        assert_eq!(json["response_time_ms"], 42);
        assert_eq!(json["error"]["code"], "HTTP_STATUS");
        assert_eq!(json["error"]["code_str"], "E4002");
        assert_eq!(json["error"]["category"], "Network");
        assert_eq!(json["error"]["context"], "maintenance");
        assert!(json.get("detail").is_none());
    }

    #[test]
    fn test_healthy_endpoint_has_no_error() {
        let health = EndpointHealth::new(
            Endpoint::Calculator,
            "https://example.test/pro",
            Ok("result received".to_string()),
            Duration::ZERO,
        );

        assert!(health.is_ok());
        let json = serde_json::to_value(&health).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["detail"], "result received");
        assert!(json.get("error").is_none());
    }
}
