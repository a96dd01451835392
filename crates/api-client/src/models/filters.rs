//! Fixed filter vocabularies used by listing pages

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category tabs on the card listing pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum CardCategory {
    #[serde(rename = "All Cards")]
    AllCards,
    Shopping,
    Travel,
    Dining,
    Fuel,
    Grocery,
    Utility,
    Premium,
}

impl CardCategory {
    /// Every category in display order
    pub const ALL: [Self; 8] = [
        Self::AllCards,
        Self::Shopping,
        Self::Travel,
        Self::Dining,
        Self::Fuel,
        Self::Grocery,
        Self::Utility,
        Self::Premium,
    ];

    /// Label shown on the tab
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::AllCards => "All Cards",
            Self::Shopping => "Shopping",
            Self::Travel => "Travel",
            Self::Dining => "Dining",
            Self::Fuel => "Fuel",
            Self::Grocery => "Grocery",
            Self::Utility => "Utility",
            Self::Premium => "Premium",
        }
    }
}

impl fmt::Display for CardCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CardCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown card category: {s}"))
    }
}

/// Payment networks a card can run on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum CardNetwork {
    Visa,
    Mastercard,
    #[serde(rename = "American Express")]
    AmericanExpress,
    RuPay,
}

impl CardNetwork {
    /// Every network
    pub const ALL: [Self; 4] = [
        Self::Visa,
        Self::Mastercard,
        Self::AmericanExpress,
        Self::RuPay,
    ];

    /// Name as sent in `card_networks`
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Visa => "Visa",
            Self::Mastercard => "Mastercard",
            Self::AmericanExpress => "American Express",
            Self::RuPay => "RuPay",
        }
    }
}

impl fmt::Display for CardNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CardNetwork {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("amex") {
            return Ok(Self::AmericanExpress);
        }
        Self::ALL
            .into_iter()
            .find(|n| n.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown card network: {s}"))
    }
}
