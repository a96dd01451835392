//! Calculate command - score a spending profile

use super::fail_on_notifications;
use crate::output::{format_duration, format_rupees, print_json, OutputFormat, Status};
use crate::session::Session;
use anyhow::{anyhow, Result};
use bankkaro_api_client::{
    CalculatorCategory, CalculatorPayload, CalculatorResult, Notification, SpendingQuestion,
};
use bankkaro_telemetry::Timer;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Inputs accepted by `bankkaro calculate`
#[derive(Debug, Clone)]
pub struct CalculateArgs {
    pub category: CalculatorCategory,
    pub spends: Vec<(String, f64)>,
    pub card: Option<String>,
}

/// Parse a `key=value` spend override
pub fn parse_spend(raw: &str) -> Result<(String, f64), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {raw:?}"))?;
    let value = value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("spend for {key:?} is not a number: {value:?}"))?;
    Ok((key.trim().to_string(), value))
}

impl CalculateArgs {
    /// Slider defaults for the category (the full profile for `all`), then
    /// overrides; catalog keys are clamped into their slider range
    fn payload(&self) -> (CalculatorPayload, Vec<String>) {
        let mut payload = if self.category == CalculatorCategory::All {
            CalculatorPayload::with_defaults()
        } else {
            CalculatorPayload::from_questions(self.category.questions())
        };
        let mut adjusted = Vec::new();

        for (key, value) in &self.spends {
            match SpendingQuestion::find(key) {
                Some(question) => {
                    let stored = payload.set_spend(question, *value);
                    if stored != *value {
                        adjusted.push(format!("{key} adjusted to {stored}"));
                    }
                }
                None => payload = payload.with_spend(key.clone(), *value),
            }
        }

        if let Some(card) = &self.card {
            payload = payload.with_selected_card(card.clone());
        }

        (payload, adjusted)
    }
}

#[derive(Debug, Serialize)]
struct JsonCalculateOutput<'a> {
    category: CalculatorCategory,
    payload: &'a CalculatorPayload,
    result: Option<&'a CalculatorResult>,
    notifications: &'a [Notification],
}

/// Run calculate command
pub async fn run(session: &mut Session, args: CalculateArgs, format: OutputFormat) -> Result<()> {
    let (payload, adjusted) = args.payload();

    if format == OutputFormat::Text {
        for note in &adjusted {
            Status::warning(note);
        }
    }

    let timer = Timer::start("calculate");
    let result = session.client.fetch_calculator_result(&payload).await;
    let elapsed = timer.stop();
    let notifications = session.drain_notifications();

    match format {
        OutputFormat::Json => print_json(&JsonCalculateOutput {
            category: args.category,
            payload: &payload,
            result: result.as_ref(),
            notifications: &notifications,
        })?,
        OutputFormat::Text => {
            print_profile(&payload);
            if let Some(result) = &result {
                Status::subheader("Result");
                let pretty = serde_json::to_string_pretty(result)
                    .map_err(|e| anyhow!("Failed to render result: {e}"))?;
                println!("{pretty}");
                println!();
                Status::success(&format!("Calculated in {}", format_duration(elapsed)));
            }
        }
    }

    fail_on_notifications(&notifications, format)
}

fn print_profile(payload: &CalculatorPayload) {
    Status::header("Spending profile");

    for (key, value) in &payload.spends {
        let label = SpendingQuestion::find(key).map_or(key.as_str(), |q| q.label);
        println!("  {:<40} {}", label, format_rupees(*value).cyan());
    }
    if let Some(card) = &payload.selected_card_id {
        println!("  {:<40} {}", "Selected card", card.bold());
    }
    println!("  {:<40} {}", "Total".bold(), format_rupees(payload.total()).bold());
}
