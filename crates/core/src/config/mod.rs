//! Configuration loading and schema definitions
//!
//! Settings live in an optional `bankkaro.toml`; every field has a default so
//! an absent file is the same as an empty one.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;

/// Serde adapter storing a [`std::time::Duration`] as whole milliseconds
///
/// Use with `#[serde(with = "bankkaro_core::config::serde_millis")]`.
pub mod serde_millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    /// Write the duration as a millisecond count, saturating at `u64::MAX`
    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        u64::try_from(d.as_millis()).unwrap_or(u64::MAX).serialize(s)
    }

    /// Read a millisecond count
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }

}
