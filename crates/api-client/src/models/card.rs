//! Card catalog request/response types

use crate::error::{ApiError, ApiResult};
use bankkaro_core::validation::{ValidationResult, Validator};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;

/// Longest accepted slug
pub const SLUG_MAX_LEN: usize = 100;

/// Longest accepted value for the short filter strings
pub const FILTER_MAX_LEN: usize = 50;

/// Body of the "list cards" request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardQueryPayload {
    /// Category page slug, e.g. `best-fuel-credit-card`
    pub slug: String,
    /// Issuing bank ids
    #[serde(rename = "banks_ids")]
    pub bank_ids: Vec<String>,
    /// Network display names, e.g. `Visa`
    pub card_networks: Vec<String>,
    /// Annual fee bucket
    #[serde(rename = "annualFees")]
    pub annual_fees: String,
    /// Credit score bucket
    pub credit_score: String,
    /// Sort order understood by the catalog
    pub sort_by: String,
    /// `"true"` for lifetime-free cards only, blank otherwise
    #[serde(rename = "free_cards")]
    pub free_cards_flag: String,
    /// Eligibility answers; the wire key keeps the service's spelling
    #[serde(rename = "eligiblityPayload")]
    pub eligibility_payload: Map<String, Value>,
    /// Card Genius answers
    #[serde(rename = "cardGeniusPayload")]
    pub card_genius_payload: Map<String, Value>,
}

impl CardQueryPayload {
    /// Empty query (every filter blank)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty query for one category page
    pub fn for_slug(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            ..Self::default()
        }
    }

    /// Filter by bank ids
    #[must_use]
    pub fn with_bank_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bank_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Filter by card networks
    #[must_use]
    pub fn with_card_networks<I, S>(mut self, networks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.card_networks = networks.into_iter().map(Into::into).collect();
        self
    }

    /// Annual fee bucket
    #[must_use]
    pub fn with_annual_fees(mut self, fees: impl Into<String>) -> Self {
        self.annual_fees = fees.into();
        self
    }

    /// Credit score bucket
    #[must_use]
    pub fn with_credit_score(mut self, score: impl Into<String>) -> Self {
        self.credit_score = score.into();
        self
    }

    /// Sort order
    #[must_use]
    pub fn with_sort_by(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = sort_by.into();
        self
    }

    /// Lifetime-free filter flag
    #[must_use]
    pub fn with_free_cards_flag(mut self, flag: impl Into<String>) -> Self {
        self.free_cards_flag = flag.into();
        self
    }

    /// Eligibility answers forwarded verbatim
    #[must_use]
    pub fn with_eligibility(mut self, payload: Map<String, Value>) -> Self {
        self.eligibility_payload = payload;
        self
    }

    /// Card Genius answers forwarded verbatim
    #[must_use]
    pub fn with_card_genius(mut self, payload: Map<String, Value>) -> Self {
        self.card_genius_payload = payload;
        self
    }

    /// Check string ceilings
    #[must_use]
    pub fn validate(&self) -> ValidationResult {
        Validator::new()
            .max_length("slug", &self.slug, SLUG_MAX_LEN)
            .max_length("annualFees", &self.annual_fees, FILTER_MAX_LEN)
            .max_length("credit_score", &self.credit_score, FILTER_MAX_LEN)
            .max_length("sort_by", &self.sort_by, FILTER_MAX_LEN)
            .max_length("free_cards", &self.free_cards_flag, FILTER_MAX_LEN)
            .validate()
    }
}

/// A value the backend sends either as a string or as a number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextOrNumber {
    /// Numeric form
    Number(serde_json::Number),
    /// Text form, e.g. `"₹500 + GST"`
    Text(String),
}

impl fmt::Display for TextOrNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for TextOrNumber {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<u64> for TextOrNumber {
    fn from(n: u64) -> Self {
        Self::Number(n.into())
    }
}

/// Deserialize an optional field that may be omitted but never `null`
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// One card in a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Catalog id, unique within a response
    pub id: String,
    /// Display name
    pub name: String,
    /// Issuing bank
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    /// Payment network
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub card_network: Option<String>,
    /// Annual fee, as text or a number
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub annual_fee: Option<TextOrNumber>,
    /// Editorial rating
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub rating: Option<TextOrNumber>,
    /// Bullet-point highlights
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub key_features: Option<Vec<String>>,
}

impl Card {
    /// Card with only the required fields
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            bank_name: None,
            card_network: None,
            annual_fee: None,
            rating: None,
            key_features: None,
        }
    }

    /// Case-insensitive match on card or bank name
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self
                .bank_name
                .as_deref()
                .is_some_and(|bank| bank.to_lowercase().contains(&query))
    }
}

/// Body of the "list cards" response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardListResponse {
    /// Absent when the category has no cards; `null` is rejected
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub cards: Option<Vec<Card>>,
}

impl CardListResponse {
    /// Parse and check a raw response body
    ///
    /// The top level must be a JSON object. A single malformed card rejects
    /// the whole response, as do two cards sharing an `id`. Optional fields
    /// may be left out but an explicit `null` is malformed.
    pub fn parse(body: &[u8]) -> ApiResult<Self> {
        let value: Value = serde_json::from_slice(body)?;
        if !value.is_object() {
            return Err(ApiError::response_shape("expected a JSON object"));
        }

        let response: Self = serde_json::from_value(value)?;

        if let Some(cards) = &response.cards {
            let mut seen = HashSet::with_capacity(cards.len());
            for card in cards {
                if !seen.insert(card.id.as_str()) {
                    return Err(ApiError::response_shape(format!(
                        "duplicate card id '{}'",
                        card.id
                    )));
                }
            }
        }

        Ok(response)
    }

    /// The cards, or nothing when the field was absent
    #[must_use]
    pub fn into_cards(self) -> Vec<Card> {
        self.cards.unwrap_or_default()
    }
}
