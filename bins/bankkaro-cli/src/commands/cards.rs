//! Cards command - list cards for a category page

use super::fail_on_notifications;
use crate::output::{format_count, format_duration, print_json, OutputFormat, Status};
use crate::session::Session;
use anyhow::Result;
use bankkaro_api_client::{Card, CardNetwork, CardQueryPayload, Notification};
use bankkaro_core::validation::validate_and_sanitize_search;
use bankkaro_telemetry::Timer;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Filters accepted by `bankkaro cards`
#[derive(Debug, Clone, Default)]
pub struct CardsArgs {
    pub slug: String,
    pub banks: Vec<String>,
    pub networks: Vec<CardNetwork>,
    pub annual_fees: String,
    pub credit_score: String,
    pub sort_by: String,
    pub free_cards: bool,
    pub search: Option<String>,
    pub limit: Option<usize>,
}

impl CardsArgs {
    fn payload(&self) -> CardQueryPayload {
        CardQueryPayload::for_slug(self.slug.clone())
            .with_bank_ids(self.banks.iter().cloned())
            .with_card_networks(self.networks.iter().map(|n| n.label()))
            .with_annual_fees(self.annual_fees.clone())
            .with_credit_score(self.credit_score.clone())
            .with_sort_by(self.sort_by.clone())
            .with_free_cards_flag(if self.free_cards { "true" } else { "" })
    }
}

#[derive(Debug, Serialize)]
struct JsonCardsOutput<'a> {
    slug: &'a str,
    count: usize,
    cards: &'a [Card],
    notifications: &'a [Notification],
}

/// Run cards command
pub async fn run(session: &mut Session, args: CardsArgs, format: OutputFormat) -> Result<()> {
    let payload = args.payload();

    let timer = Timer::start("cards");
    let mut cards = session.client.fetch_cards(&payload).await;
    let elapsed = timer.stop();
    let notifications = session.drain_notifications();

    if let Some(raw) = &args.search {
        let query = validate_and_sanitize_search(raw);
        if query.is_empty() {
            if format == OutputFormat::Text {
                Status::warning(&format!("Ignoring unsupported search query {raw:?}"));
            }
        } else {
            cards.retain(|card| card.matches(&query));
        }
    }
    if let Some(limit) = args.limit {
        cards.truncate(limit);
    }

    match format {
        OutputFormat::Json => print_json(&JsonCardsOutput {
            slug: &payload.slug,
            count: cards.len(),
            cards: &cards,
            notifications: &notifications,
        })?,
        OutputFormat::Text if notifications.is_empty() => print_text(&payload.slug, &cards, elapsed),
        OutputFormat::Text => {}
    }

    fail_on_notifications(&notifications, format)
}

fn print_text(slug: &str, cards: &[Card], elapsed: std::time::Duration) {
    let title = if slug.is_empty() {
        "Cards".to_string()
    } else {
        format!("Cards for {slug}")
    };
    Status::header(&title);

    if cards.is_empty() {
        println!("  {}", "No cards matched".dimmed());
    }

    for card in cards {
        println!("  {} {}", card.name.bold(), format!("({})", card.id).dimmed());

        let mut details = Vec::new();
        if let Some(bank) = &card.bank_name {
            details.push(bank.clone());
        }
        if let Some(network) = &card.card_network {
            details.push(network.clone());
        }
        if let Some(fee) = &card.annual_fee {
            details.push(format!("fee {fee}"));
        }
        if let Some(rating) = &card.rating {
            details.push(format!("★ {rating}"));
        }
        if !details.is_empty() {
            println!("    {}", details.join(" · "));
        }

        for feature in card.key_features.iter().flatten() {
            println!("    {} {}", "•".cyan(), feature);
        }
    }

    println!();
    Status::success(&format!(
        "{} in {}",
        format_count(cards.len(), "card", "cards"),
        format_duration(elapsed)
    ));
}
