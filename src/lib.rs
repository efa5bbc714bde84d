//! Tiered Elo - an Elo rating engine with variable K-factors
//!
//! The K-factor depends on a player's experience and peak rating: novices
//! move fast, established players slower, and masters slowest. Ratings are
//! updated by replaying ordered batches of pairwise match results.

pub mod config;
pub mod error;
pub mod rating;
pub mod season;
pub mod types;

// Re-export commonly used types
pub use config::RatingConfig;
pub use error::{ConfigError, ConfigErrorKind, Result};
pub use rating::{expected_score, RatingEngine};
pub use types::*;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
