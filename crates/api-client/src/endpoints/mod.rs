//! Endpoint-specific API implementations
//!
//! | Module | Endpoint | Description |
//! |--------|----------|-------------|
//! | `cards` | `POST /sp/api/cards` | Card catalog listing with filters |
//! | `calculator` | `POST /cg/api/pro` | Reward estimate for a spending profile |

pub mod calculator;
pub mod cards;

pub use calculator::CalculatorApi;
pub use cards::CardsApi;
