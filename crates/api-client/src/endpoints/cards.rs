//! Card catalog endpoint
//!
//! `fetch` is the page-facing call: it never fails, it degrades to an empty
//! list and tells the user why. `try_fetch` is the same pipeline with the
//! error handed back instead.

use crate::client::{BankKaroClient, Endpoint};
use crate::error::{ApiError, ApiResult};
use crate::models::{Card, CardListResponse, CardQueryPayload};
use crate::notify::Notification;
use tracing::{instrument, warn};

/// Title of every card-list failure notification
pub const CARDS_ERROR_TITLE: &str = "Error";

/// Card catalog API interface
#[derive(Clone, Debug)]
pub struct CardsApi {
    client: BankKaroClient,
}

impl CardsApi {
    pub(crate) fn new(client: BankKaroClient) -> Self {
        Self { client }
    }

    /// List cards matching `payload`
    ///
    /// Returns the cards in the order the service sent them. Any failure
    /// yields an empty list plus exactly one notification; invalid payloads
    /// fail before any network I/O.
    #[instrument(skip(self, payload), fields(slug = %payload.slug))]
    pub async fn fetch(&self, payload: &CardQueryPayload) -> Vec<Card> {
        match self.try_fetch(payload).await {
            Ok(cards) => cards,
            Err(e) => {
                let category = e.category();
                warn!(error = %e, %category, "Card list request failed");
                self.client.notify(Notification::error(
                    CARDS_ERROR_TITLE,
                    category.cards_message(),
                ));
                Vec::new()
            }
        }
    }

    /// List cards, returning the error instead of notifying
    pub async fn try_fetch(&self, payload: &CardQueryPayload) -> ApiResult<Vec<Card>> {
        let validation = payload.validate();
        if !validation.is_valid() {
            return Err(validation.into());
        }

        let body =
            serde_json::to_value(payload).map_err(|e| ApiError::Validation(e.to_string()))?;
        let response = self.client.post(Endpoint::Cards, &body).await?;

        Ok(CardListResponse::parse(&response.body)?.into_cards())
    }
}

impl BankKaroClient {
    /// Shorthand for `self.cards().fetch(payload)`
    pub async fn fetch_cards(&self, payload: &CardQueryPayload) -> Vec<Card> {
        self.cards().fetch(payload).await
    }

    /// Shorthand for `self.cards().try_fetch(payload)`
    pub async fn try_fetch_cards(&self, payload: &CardQueryPayload) -> ApiResult<Vec<Card>> {
        self.cards().try_fetch(payload).await
    }
}
