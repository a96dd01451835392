//! End-to-end gateway behavior against a local HTTP server

use bankkaro_api_client::notify::RecordingNotifier;
use bankkaro_api_client::{BankKaroClient, CalculatorPayload, ClientConfig, CardQueryPayload};
use bankkaro_core::retry::RetryConfig;
use httpmock::prelude::*;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn fast_retry() -> RetryConfig {
    RetryConfig {
        initial_delay: Duration::from_millis(10),
        max_delay: Duration::from_millis(50),
        ..RetryConfig::default()
    }
}

fn client_for(server: &MockServer) -> (BankKaroClient, Arc<RecordingNotifier>) {
    let config = ClientConfig::default()
        .with_cards_url(server.url("/sp/api/cards"))
        .with_calculator_url(server.url("/cg/api/pro"))
        .with_cards_retry(fast_retry());
    let notifier = Arc::new(RecordingNotifier::new());
    let client = BankKaroClient::builder(config)
        .notifier(notifier.clone())
        .build()
        .unwrap();
    (client, notifier)
}

#[tokio::test]
async fn test_cards_round_trip() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/sp/api/cards")
                .header("content-type", "application/json")
                .header_exists("x-request-id")
                .json_body_partial(r#"{"slug": "best-fuel-credit-card"}"#);
            then.status(200).json_body(json!({
                "cards": [
                    {"id": "1", "name": "Fuel Card", "bank_name": "BPCL", "rating": 4.5},
                    {"id": "2", "name": "IndianOil Citi", "annual_fee": 1000}
                ]
            }));
        })
        .await;

    let (client, notifier) = client_for(&server);
    let cards = client
        .fetch_cards(&CardQueryPayload::for_slug("best-fuel-credit-card"))
        .await;

    mock.assert_async().await;
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].name, "Fuel Card");
    assert_eq!(cards[1].id, "2");
    assert!(notifier.is_empty());
}

#[tokio::test]
async fn test_cards_429_is_not_retried() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/sp/api/cards");
            then.status(429).body("slow down");
        })
        .await;

    let (client, notifier) = client_for(&server);
    let cards = client.fetch_cards(&CardQueryPayload::new()).await;

    assert!(cards.is_empty());
    mock.assert_hits_async(1).await;
    let seen = notifier.notifications();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].description, "Too many requests. Please wait and try again.");
}

#[tokio::test]
async fn test_cards_500_is_not_retried() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/sp/api/cards");
            then.status(500);
        })
        .await;

    let (client, notifier) = client_for(&server);
    assert!(client.fetch_cards(&CardQueryPayload::new()).await.is_empty());

    mock.assert_hits_async(1).await;
    assert_eq!(
        notifier.notifications()[0].description,
        "Service temporarily unavailable. Please try again later."
    );
}

#[tokio::test]
async fn test_cards_non_json_body_degrades_to_empty() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/sp/api/cards");
            then.status(200).body("<!doctype html>");
        })
        .await;

    let (client, notifier) = client_for(&server);
    assert!(client.fetch_cards(&CardQueryPayload::new()).await.is_empty());
    assert_eq!(
        notifier.notifications()[0].description,
        "Unable to load cards. Please try again."
    );
}

#[tokio::test]
async fn test_cards_slow_server_times_out_on_every_attempt() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/sp/api/cards");
            then.status(200)
                .delay(Duration::from_millis(500))
                .json_body(json!({"cards": []}));
        })
        .await;

    let config = ClientConfig::default()
        .with_cards_url(server.url("/sp/api/cards"))
        .with_timeout(Duration::from_millis(100))
        .with_cards_retry(fast_retry());
    let notifier = Arc::new(RecordingNotifier::new());
    let client = BankKaroClient::builder(config)
        .notifier(notifier.clone())
        .build()
        .unwrap();

    assert!(client.fetch_cards(&CardQueryPayload::new()).await.is_empty());
    mock.assert_hits_async(3).await;
    assert_eq!(
        notifier.notifications()[0].description,
        "Request timed out. Please check your connection."
    );
}

#[tokio::test]
async fn test_unreachable_host_notifies_once() {
    let config = ClientConfig::default()
        .with_cards_url("http://127.0.0.1:9/sp/api/cards")
        .with_cards_retry(fast_retry());
    let notifier = Arc::new(RecordingNotifier::new());
    let client = BankKaroClient::builder(config)
        .notifier(notifier.clone())
        .build()
        .unwrap();

    assert!(client.fetch_cards(&CardQueryPayload::new()).await.is_empty());
    assert_eq!(notifier.len(), 1);
}

#[tokio::test]
async fn test_calculator_round_trip() {
    let server = MockServer::start_async().await;
    let answer = json!({"savings": [{"card_alias": "regalia", "total_savings": 18000}]});
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/cg/api/pro")
                .json_body_partial(r#"{"fuel": 4000.0, "selectedCardId": "regalia"}"#);
            then.status(200).json_body(answer.clone());
        })
        .await;

    let (client, notifier) = client_for(&server);
    let payload = CalculatorPayload::new()
        .with_spend("fuel", 4000.0)
        .with_selected_card("regalia");

    let result = client.fetch_calculator_result(&payload).await;

    mock.assert_async().await;
    assert_eq!(result, Some(answer));
    assert!(notifier.is_empty());
}

#[tokio::test]
async fn test_calculator_failure_single_attempt() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/cg/api/pro");
            then.status(502);
        })
        .await;

    let (client, notifier) = client_for(&server);
    let result = client
        .fetch_calculator_result(&CalculatorPayload::with_defaults())
        .await;

    assert!(result.is_none());
    mock.assert_hits_async(1).await;
    let seen = notifier.notifications();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].title, "Calculation Error");
    assert_eq!(
        seen[0].description,
        "Unable to calculate rewards. Please try again."
    );
}
