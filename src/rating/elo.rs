//! Elo rating math
//!
//! Expected score and K-tier selection. These functions hold no state; the
//! engine combines them with its configured K-factors.

use crate::types::{KTier, Player};
use skillratings::elo::EloRating;

/// Default initial rating for new players
pub const DEFAULT_RATING: f64 = 1200.0;

/// Default K-factors for the novice, mid and master tiers
pub const DEFAULT_K_FACTORS: [f64; 3] = [40.0, 20.0, 10.0];

/// Players with fewer rated games than this are novices
pub const NOVICE_GAMES_THRESHOLD: u32 = 30;

/// Peak rating at or above which an experienced player is a master
pub const MASTER_RATING_THRESHOLD: f64 = 2400.0;

/// Expected score of a player rated `rating_a` against one rated `rating_b`
///
/// `1 / (1 + 10^((rating_b - rating_a) / 400))`, always in (0, 1) for finite
/// inputs, and `expected_score(a, b) + expected_score(b, a) == 1`.
pub fn expected_score(rating_a: f64, rating_b: f64) -> f64 {
    let (expected_a, _) = skillratings::elo::expected_score(
        &EloRating { rating: rating_a },
        &EloRating { rating: rating_b },
    );
    expected_a
}

/// K-tier for a player with the given experience and peak rating
pub fn tier_for(games_played: u32, peak_rating: f64) -> KTier {
    if games_played < NOVICE_GAMES_THRESHOLD {
        KTier::Novice
    } else if peak_rating >= MASTER_RATING_THRESHOLD {
        // A former master keeps the master factor after dropping below the
        // threshold.
        KTier::Master
    } else {
        KTier::Mid
    }
}

/// K-tier for a player
pub fn tier_of(player: &Player) -> KTier {
    tier_for(player.games_played, player.peak_rating())
}

/// Rating after one match with factor `k` and actual score `result`
pub fn rating_after(rating: f64, opponent_rating: f64, k: f64, result: f64) -> f64 {
    rating + k * (result - expected_score(rating, opponent_rating))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_score_equal_ratings() {
        assert!((expected_score(1500.0, 1500.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_expected_score_matches_formula() {
        let expected = 1.0 / (1.0 + 10f64.powf((1500.0 - 1200.0) / 400.0));
        assert!((expected_score(1200.0, 1500.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_expected_score_higher_rated() {
        let expected = expected_score(1700.0, 1500.0);
        assert!(expected > 0.7);
        assert!(expected < 0.8);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(tier_for(0, 3000.0), KTier::Novice);
        assert_eq!(tier_for(29, 2390.0), KTier::Novice);
        assert_eq!(tier_for(30, 2400.0), KTier::Master);
        assert_eq!(tier_for(30, 2399.99), KTier::Mid);
        assert_eq!(tier_for(500, 1200.0), KTier::Mid);
    }

    #[test]
    fn test_tier_of_uses_historical_peak() {
        let player = Player {
            rating: 2300.0,
            games_played: 40,
            highest_rating: 2450.0,
            name: String::new(),
        };
        assert_eq!(tier_of(&player), KTier::Master);
    }

    #[test]
    fn test_rating_after_win_and_loss() {
        assert!((rating_after(1500.0, 1500.0, 32.0, 1.0) - 1516.0).abs() < 1e-9);
        assert!((rating_after(1500.0, 1500.0, 32.0, 0.0) - 1484.0).abs() < 1e-9);
        assert!((rating_after(1500.0, 1500.0, 32.0, 0.5) - 1500.0).abs() < 1e-9);
    }
}
