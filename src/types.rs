//! Common types used throughout the rating engine

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Handle to a player held by a [`crate::RatingEngine`]
///
/// Handles are insertion indices and are only meaningful for the engine that
/// issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub usize);

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Rating record for a single player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Current skill estimate
    pub rating: f64,
    /// Number of rated matches completed
    pub games_played: u32,
    /// Highest rating ever held
    pub highest_rating: f64,
    /// Display label, empty when none was given
    pub name: String,
}

impl Player {
    /// Higher of the current and the historical peak rating
    pub fn peak_rating(&self) -> f64 {
        self.highest_rating.max(self.rating)
    }

    /// Record the outcome of one rated match
    pub(crate) fn record_result(&mut self, new_rating: f64) {
        self.rating = new_rating;
        self.games_played = self.games_played.saturating_add(1);

        if new_rating >= self.highest_rating {
            self.highest_rating = new_rating;
        }
    }
}

/// K-factor tier a player falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KTier {
    Novice,
    Mid,
    Master,
}

impl KTier {
    /// Position of this tier's factor in the configured `k` triple
    pub fn index(self) -> usize {
        match self {
            KTier::Novice => 0,
            KTier::Mid => 1,
            KTier::Master => 2,
        }
    }
}

impl std::fmt::Display for KTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KTier::Novice => write!(f, "novice"),
            KTier::Mid => write!(f, "mid"),
            KTier::Master => write!(f, "master"),
        }
    }
}

/// A rated pairing. `result` is player A's score: 1 win, 0 loss, 0.5 draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub player_a: PlayerId,
    pub player_b: PlayerId,
    pub result: f64,
}

impl Match {
    pub fn new(player_a: PlayerId, player_b: PlayerId, result: f64) -> Self {
        Self {
            player_a,
            player_b,
            result,
        }
    }
}

impl From<(PlayerId, PlayerId, f64)> for Match {
    fn from((player_a, player_b, result): (PlayerId, PlayerId, f64)) -> Self {
        Self::new(player_a, player_b, result)
    }
}

/// Options for creating a player
///
/// Every field is optional. Missing or unusable values fall back to the
/// engine defaults when the player is created:
/// * `rating`: the engine's default rating (also used for NaN/infinite input)
/// * `games_played`: 0
/// * `highest_rating`: the resolved rating, unless strictly greater than it
/// * `name`: empty string
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewPlayer {
    pub rating: Option<f64>,
    pub games_played: Option<u32>,
    pub highest_rating: Option<f64>,
    pub name: Option<String>,
}

impl NewPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn games_played(mut self, games_played: u32) -> Self {
        self.games_played = Some(games_played);
        self
    }

    pub fn highest_rating(mut self, highest_rating: f64) -> Self {
        self.highest_rating = Some(highest_rating);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Read options from a loosely typed table, dropping malformed fields
    ///
    /// Never fails: a field of the wrong type is treated as absent. Games
    /// played must be a non-negative whole number that fits in `u32`; it may
    /// be written as an integer or a float such as `40.0`.
    pub fn from_value(value: &Value) -> Self {
        Self {
            rating: value.get("rating").and_then(Value::as_f64),
            games_played: value.get("games_played").and_then(as_games_count),
            highest_rating: value.get("highest_rating").and_then(Value::as_f64),
            name: value
                .get("name")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }
}

fn as_games_count(value: &Value) -> Option<u32> {
    if let Some(games) = value.as_u64() {
        return u32::try_from(games).ok();
    }

    value
        .as_f64()
        .filter(|games| games.is_finite() && *games >= 0.0 && games.fract() == 0.0)
        .filter(|games| *games <= f64::from(u32::MAX))
        .map(|games| games as u32)
}
