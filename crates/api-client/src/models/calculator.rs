//! Reward calculator request/response types and the slider catalog

use bankkaro_core::validation::{validate_spending_value, ValidationResult, Validator, SPENDING_VALUE_MAX};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Opaque result of the reward calculator, passed through untouched
pub type CalculatorResult = serde_json::Value;

/// Longest accepted spend key or selected card id
pub const CALCULATOR_KEY_MAX_LEN: usize = 100;

/// Question groups offered by the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[allow(missing_docs)]
pub enum CalculatorCategory {
    All,
    Shopping,
    Utility,
    Grocery,
    Fuel,
    Dining,
    FoodOrdering,
    Travel,
}

impl CalculatorCategory {
    /// Every category
    pub const ALL: [Self; 8] = [
        Self::All,
        Self::Shopping,
        Self::Utility,
        Self::Grocery,
        Self::Fuel,
        Self::Dining,
        Self::FoodOrdering,
        Self::Travel,
    ];

    /// Identifier used in URLs and on the command line
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Shopping => "shopping",
            Self::Utility => "utility",
            Self::Grocery => "grocery",
            Self::Fuel => "fuel",
            Self::Dining => "dining",
            Self::FoodOrdering => "food-ordering",
            Self::Travel => "travel",
        }
    }

    /// Questions shown for this category, in catalog order
    pub fn questions(self) -> impl Iterator<Item = &'static SpendingQuestion> {
        SPENDING_QUESTIONS
            .iter()
            .filter(move |q| q.categories.contains(&self))
    }
}

impl fmt::Display for CalculatorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalculatorCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown calculator category: {s}"))
    }
}

/// One slider in the calculator flow
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpendingQuestion {
    /// Key sent to the calculator
    pub key: &'static str,
    /// Question text
    pub label: &'static str,
    /// Lowest slider value
    pub min: f64,
    /// Highest slider value
    pub max: f64,
    /// Slider increment
    pub step: f64,
    /// Starting position of the slider
    pub default_value: f64,
    /// Groups this question appears in
    pub categories: &'static [CalculatorCategory],
}

impl SpendingQuestion {
    /// Look a question up by key
    #[must_use]
    pub fn find(key: &str) -> Option<&'static Self> {
        SPENDING_QUESTIONS.iter().find(|q| q.key == key)
    }

    /// Clamp `value` into this slider's range
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        validate_spending_value(value, self.min, self.max)
    }
}

use CalculatorCategory as C;

const fn question(
    key: &'static str,
    label: &'static str,
    max: f64,
    step: f64,
    default_value: f64,
    categories: &'static [CalculatorCategory],
) -> SpendingQuestion {
    SpendingQuestion {
        key,
        label,
        min: 0.0,
        max,
        step,
        default_value,
        categories,
    }
}

/// Every calculator slider, in the order the flow asks them
pub static SPENDING_QUESTIONS: [SpendingQuestion; 19] = [
    question("amazon_spends", "Amazon Monthly Spending", 50_000.0, 500.0, 5_000.0, &[C::All, C::Shopping]),
    question("flipkart_spends", "Flipkart Monthly Spending", 50_000.0, 500.0, 3_000.0, &[C::All, C::Shopping]),
    question("other_online_spends", "Other Online Shopping", 30_000.0, 500.0, 2_000.0, &[C::All, C::Shopping]),
    question("other_offline_spends", "Offline Shopping", 30_000.0, 500.0, 3_000.0, &[C::All, C::Shopping]),
    question("grocery_spends_online", "Online Grocery Shopping", 20_000.0, 500.0, 4_000.0, &[C::All, C::Grocery]),
    question("online_food_ordering", "Food Delivery Apps", 15_000.0, 250.0, 2_500.0, &[C::All, C::Dining]),
    question("dining_or_going_out", "Dining & Entertainment", 20_000.0, 500.0, 3_500.0, &[C::All, C::Dining]),
    question("fuel", "Monthly Fuel Expenses", 15_000.0, 500.0, 4_000.0, &[C::All, C::Fuel]),
    question("rent", "Monthly Rent", 100_000.0, 1_000.0, 25_000.0, &[C::All, C::Utility]),
    question("mobile_phone_bills", "Mobile Bills", 5_000.0, 100.0, 1_000.0, &[C::All, C::Utility]),
    question("electricity_bills", "Electricity Bills", 10_000.0, 200.0, 3_000.0, &[C::All, C::Utility]),
    question("water_bills", "Water Bills", 5_000.0, 100.0, 1_500.0, &[C::All, C::Utility]),
    question("ott_channels", "OTT Subscriptions", 2_000.0, 50.0, 800.0, &[C::All, C::Utility]),
    question("insurance_health_annual", "Health Insurance (Annual)", 100_000.0, 2_000.0, 25_000.0, &[C::All, C::Utility]),
    question("insurance_car_or_bike_annual", "Vehicle Insurance (Annual)", 50_000.0, 1_000.0, 15_000.0, &[C::All, C::Utility]),
    question("hotels_annual", "Hotels (Annual)", 200_000.0, 5_000.0, 30_000.0, &[C::All, C::Travel]),
    question("flights_annual", "Flights (Annual)", 300_000.0, 5_000.0, 40_000.0, &[C::All, C::Travel]),
    question("domestic_lounge_usage_quarterly", "Domestic Lounge Usage (Quarterly)", 50.0, 1.0, 4.0, &[C::All, C::Travel]),
    question("international_lounge_usage_quarterly", "International Lounge Usage (Quarterly)", 20.0, 1.0, 0.0, &[C::All, C::Travel]),
];

/// Spends the calculator always sends but never asks about
pub const UNASKED_SPENDS: [(&str, f64); 2] = [
    ("school_fees", 0.0),
    ("large_electronics_purchase_like_mobile_tv_etc", 50_000.0),
];

/// Body of the "compute calculator result" request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculatorPayload {
    /// Spend per category key
    #[serde(flatten)]
    pub spends: BTreeMap<String, f64>,
    /// Card to score against, if any
    #[serde(
        rename = "selectedCardId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub selected_card_id: Option<String>,
}

impl CalculatorPayload {
    /// Empty payload
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every slider at its starting position, plus the unasked spends
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut payload = Self::from_questions(SPENDING_QUESTIONS.iter());
        for (key, value) in UNASKED_SPENDS {
            payload.spends.insert(key.to_string(), value);
        }
        payload
    }

    /// Starting positions for a subset of sliders
    pub fn from_questions<'a>(questions: impl IntoIterator<Item = &'a SpendingQuestion>) -> Self {
        Self {
            spends: questions
                .into_iter()
                .map(|q| (q.key.to_string(), q.default_value))
                .collect(),
            selected_card_id: None,
        }
    }

    /// Store a slider value, clamped into the slider's range; returns the
    /// stored value
    pub fn set_spend(&mut self, question: &SpendingQuestion, value: f64) -> f64 {
        let clamped = question.clamp(value);
        self.spends.insert(question.key.to_string(), clamped);
        clamped
    }

    /// Store a raw value for a key outside the catalog
    #[must_use]
    pub fn with_spend(mut self, key: impl Into<String>, value: f64) -> Self {
        self.spends.insert(key.into(), value);
        self
    }

    /// Card to score the spends against
    #[must_use]
    pub fn with_selected_card(mut self, card_id: impl Into<String>) -> Self {
        self.selected_card_id = Some(card_id.into());
        self
    }

    /// Sum of every spend value
    #[must_use]
    pub fn total(&self) -> f64 {
        self.spends.values().sum()
    }

    /// Check keys, value bounds and the selected card id
    #[must_use]
    pub fn validate(&self) -> ValidationResult {
        let mut validator = Validator::new();

        for (key, value) in &self.spends {
            validator = validator
                .required("spend key", key)
                .max_length(key, key, CALCULATOR_KEY_MAX_LEN)
                .range(key, *value, 0.0, SPENDING_VALUE_MAX);
        }

        if let Some(id) = &self.selected_card_id {
            validator = validator
                .required("selectedCardId", id)
                .max_length("selectedCardId", id, CALCULATOR_KEY_MAX_LEN);
        }

        validator.validate()
    }
}
