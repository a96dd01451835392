//! Request gateway for the BankKaro card catalog and reward calculator
//!
//! Pages never talk to the upstream services directly; they go through this
//! crate, which owns the defensive rules for every call.
//!
//! # Features
//!
//! - **Fail-closed validation**: malformed payloads never reach the network
//! - **Deadline per attempt**: every request is bounded by the configured timeout
//! - **Retry with exponential backoff**: network failures on the card list are retried
//! - **Optional rate limiting**: fixed-window throttling per endpoint
//! - **Categorized notifications**: every failure produces exactly one user-facing message
//! - **Request correlation**: each call carries a unique `X-Request-Id`
//!
//! # Example
//!
//! ```rust,no_run
//! use bankkaro_api_client::{BankKaroClient, CardQueryPayload};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BankKaroClient::new()?;
//!
//!     let payload = CardQueryPayload::for_slug("best-fuel-credit-card");
//!     for card in client.fetch_cards(&payload).await {
//!         println!("{} ({})", card.name, card.id);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod notify;
pub mod transport;

#[cfg(test)]
mod testing;

pub use client::{BankKaroClient, ClientBuilder, Endpoint};
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult, FailureCategory};
pub use models::{
    CalculatorCategory, CalculatorPayload, CalculatorResult, Card, CardCategory, CardNetwork,
    CardQueryPayload, SpendingQuestion,
};
pub use notify::{Notification, Notifier, Variant};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::BankKaroClient;
    pub use crate::config::ClientConfig;
    pub use crate::endpoints::{CalculatorApi, CardsApi};
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::models::{CalculatorPayload, CalculatorResult, Card, CardQueryPayload};
    pub use crate::notify::{ChannelNotifier, Notification, Notifier, RecordingNotifier};
}
