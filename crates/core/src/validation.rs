//! Payload and user input validation
//!
//! Provides:
//! - A fluent [`Validator`] that collects field errors
//! - Input sanitizers for free-text search boxes
//! - Range clamping for calculator slider values
//!
//! # Example
//!
//! ```rust
//! use bankkaro_core::validation::Validator;
//!
//! let result = Validator::new()
//!     .max_length("slug", "best-fuel-credit-card", 100)
//!     .max_length("sort_by", "", 50)
//!     .validate();
//!
//! assert!(result.is_valid());
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Maximum length of a sanitized input string
pub const SANITIZED_MAX_LEN: usize = 200;

/// Maximum length of a search query after sanitizing
pub const SEARCH_QUERY_MAX_LEN: usize = 100;

/// Upper bound accepted for any single spending value
pub const SPENDING_VALUE_MAX: f64 = 1_000_000.0;

static SEARCH_QUERY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9\s\-_]*$").expect("search pattern is valid"));

/// Validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field that failed validation
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
    /// Expected value (if applicable)
    pub expected: Option<String>,
    /// Actual value (if applicable)
    pub actual: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a new empty result
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get all errors
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Add an error
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Join all error messages into one line
    #[must_use]
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Fluent validator builder
#[derive(Debug, Default)]
pub struct Validator {
    result: ValidationResult,
}

impl Validator {
    /// Create a new validator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn fail(
        mut self,
        field: &str,
        message: String,
        code: &str,
        expected: Option<String>,
        actual: Option<String>,
    ) -> Self {
        self.result.add_error(ValidationError {
            field: field.to_string(),
            message,
            code: code.to_string(),
            expected,
            actual,
        });
        self
    }

    /// Validate that a field is not blank
    #[must_use]
    pub fn required(self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            return self.fail(
                field,
                "Field is required".to_string(),
                "REQUIRED",
                Some("non-empty value".to_string()),
                Some("empty".to_string()),
            );
        }
        self
    }

    /// Validate maximum length, counted in characters
    #[must_use]
    pub fn max_length(self, field: &str, value: &str, max: usize) -> Self {
        let len = value.chars().count();
        if len > max {
            return self.fail(
                field,
                format!("Must be at most {max} characters"),
                "MAX_LENGTH",
                Some(format!("<= {max} chars")),
                Some(format!("{len} chars")),
            );
        }
        self
    }

    /// Validate against a precompiled regex
    #[must_use]
    pub fn pattern(self, field: &str, value: &str, pattern: &Regex, description: &str) -> Self {
        if !pattern.is_match(value) {
            return self.fail(
                field,
                format!("Must match {description}"),
                "PATTERN",
                Some(description.to_string()),
                Some(value.to_string()),
            );
        }
        self
    }

    /// Validate a numeric range (inclusive); NaN never passes
    #[must_use]
    pub fn range<T: PartialOrd + std::fmt::Display>(
        self,
        field: &str,
        value: T,
        min: T,
        max: T,
    ) -> Self {
        let in_range = value >= min && value <= max;
        if !in_range {
            return self.fail(
                field,
                format!("Must be between {min} and {max}"),
                "RANGE",
                Some(format!("{min} - {max}")),
                Some(value.to_string()),
            );
        }
        self
    }

    /// Complete validation and return result
    #[must_use]
    pub fn validate(self) -> ValidationResult {
        self.result
    }
}

/// Strip markup-significant characters, trim and cap the length
///
/// `&` is left alone; the search rules reject it afterwards, so a query
/// containing one is dropped rather than silently rewritten.
#[must_use]
pub fn sanitize_input(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '"' | '\''))
        .take(SANITIZED_MAX_LEN)
        .collect()
}

/// Sanitize a search box query; anything that still fails the search
/// rules collapses to an empty query
#[must_use]
pub fn validate_and_sanitize_search(query: &str) -> String {
    let sanitized = sanitize_input(query);
    let result = Validator::new()
        .max_length("query", &sanitized, SEARCH_QUERY_MAX_LEN)
        .pattern(
            "query",
            &sanitized,
            &SEARCH_QUERY_PATTERN,
            "letters, digits, spaces, '-' or '_'",
        )
        .validate();

    if result.is_valid() {
        sanitized
    } else {
        String::new()
    }
}

/// Clamp a slider value into `[min, max]`; values outside the global
/// spending bounds fall back to `min`, as does NaN
#[must_use]
pub fn validate_spending_value(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    let clamped = value.min(max).max(min);
    let result = Validator::new()
        .range("spending", clamped, 0.0, SPENDING_VALUE_MAX)
        .validate();

    if result.is_valid() { clamped } else { min }
}
