//! Elo rating with tiered K-factors
//!
//! This module provides the rating math and the engine that applies match
//! results to players.

pub mod elo;
pub mod engine;

// Re-export commonly used items
pub use elo::expected_score;
pub use engine::RatingEngine;
