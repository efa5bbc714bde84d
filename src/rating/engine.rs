//! Rating engine
//!
//! [`RatingEngine`] owns a validated configuration and the list of players it
//! created, and applies batches of match results to them in order.

use crate::config::RatingConfig;
use crate::error::ConfigError;
use crate::rating::elo::{rating_after, tier_of, DEFAULT_K_FACTORS};
use crate::types::{KTier, Match, NewPlayer, Player, PlayerId};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Elo rating engine with experience and peak-rating based K-factors
#[derive(Debug, Clone)]
pub struct RatingEngine {
    config: RatingConfig,
    k: [f64; 3],
    players: Vec<Player>,
}

impl Default for RatingEngine {
    fn default() -> Self {
        Self {
            config: RatingConfig::default(),
            k: DEFAULT_K_FACTORS,
            players: Vec::new(),
        }
    }
}

impl RatingEngine {
    /// Create a new engine, validating the configuration once
    pub fn new(config: RatingConfig) -> Result<Self, ConfigError> {
        let k = config.k_factors()?;

        info!(
            "Rating engine created: default rating {}, k = {:?}",
            config.rating, k
        );

        Ok(Self {
            config,
            k,
            players: Vec::new(),
        })
    }

    /// Create an engine from loosely typed configuration input
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        Self::new(RatingConfig::from_value(value)?)
    }

    pub fn config(&self) -> &RatingConfig {
        &self.config
    }

    /// Rating given to players created without one
    pub fn default_rating(&self) -> f64 {
        self.config.rating
    }

    pub fn k_factors(&self) -> [f64; 3] {
        self.k
    }

    /// Create a player and append it to this engine's list
    ///
    /// Never fails; see [`NewPlayer`] for how missing values are filled in.
    pub fn create_player(&mut self, options: NewPlayer) -> PlayerId {
        let rating = options
            .rating
            .filter(|rating| rating.is_finite())
            .unwrap_or(self.config.rating);
        let highest_rating = options
            .highest_rating
            .filter(|highest| *highest > rating)
            .unwrap_or(rating);

        let id = PlayerId(self.players.len());
        self.players.push(Player {
            rating,
            games_played: options.games_played.unwrap_or(0),
            highest_rating,
            name: options.name.unwrap_or_default(),
        });

        debug!("Created player {} with rating {}", id, rating);
        id
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.0)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id.0)
    }

    /// Players in creation order
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// K-tier currently applying to a player
    pub fn tier(&self, player: &Player) -> KTier {
        tier_of(player)
    }

    /// K-factor currently applying to a player
    pub fn get_k(&self, player: &Player) -> f64 {
        self.k[self.tier(player).index()]
    }

    /// New rating for `player_a` after scoring `result` against `player_b`
    ///
    /// Reads both players' current ratings and mutates nothing.
    pub fn calculate_rating(&self, player_a: &Player, player_b: &Player, result: f64) -> f64 {
        rating_after(
            player_a.rating,
            player_b.rating,
            self.get_k(player_a),
            result,
        )
    }

    /// Apply one match to two players held outside the engine
    pub fn apply_match(&self, player_a: &mut Player, player_b: &mut Player, result: f64) {
        let new_rating_a = self.calculate_rating(player_a, player_b, result);
        let new_rating_b = self.calculate_rating(player_b, player_a, 1.0 - result);

        player_a.record_result(new_rating_a);
        player_b.record_result(new_rating_b);
    }

    /// Apply a batch of matches to this engine's players, strictly in order
    ///
    /// Both sides of a match are computed from their ratings before that
    /// match, and each match sees the effect of every earlier one. Matches
    /// naming a handle this engine did not issue are skipped.
    pub fn update_ratings(&mut self, matches: &[Match]) {
        let mut applied = 0usize;

        for m in matches {
            let (Some(player_a), Some(player_b)) =
                (self.player(m.player_a), self.player(m.player_b))
            else {
                warn!(
                    "Skipping match {} vs {}: unknown player",
                    m.player_a, m.player_b
                );
                continue;
            };

            let new_rating_a = self.calculate_rating(player_a, player_b, m.result);
            let new_rating_b = self.calculate_rating(player_b, player_a, 1.0 - m.result);

            debug!(
                "Match {} vs {} ({}): {:.2} -> {:.2} (k={}), {:.2} -> {:.2} (k={})",
                m.player_a,
                m.player_b,
                m.result,
                player_a.rating,
                new_rating_a,
                self.get_k(player_a),
                player_b.rating,
                new_rating_b,
                self.get_k(player_b),
            );

            self.players[m.player_a.0].record_result(new_rating_a);
            self.players[m.player_b.0].record_result(new_rating_b);
            applied += 1;
        }

        info!(
            "Applied {} of {} matches across {} players",
            applied,
            matches.len(),
            self.players.len()
        );
    }
}
