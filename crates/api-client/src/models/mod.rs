//! Typed request and response records for the two endpoints
//!
//! Wire names follow the external services exactly, including their
//! misspellings; Rust field names are the corrected forms.

pub mod calculator;
pub mod card;
pub mod filters;

pub use calculator::{
    CalculatorCategory, CalculatorPayload, CalculatorResult, SpendingQuestion, SPENDING_QUESTIONS,
    UNASKED_SPENDS,
};
pub use card::{Card, CardListResponse, CardQueryPayload, TextOrNumber};
pub use filters::{CardCategory, CardNetwork};
