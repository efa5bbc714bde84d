//! Season replay
//!
//! A season file is a TOML document with an optional `[engine]` table, a
//! `[[players]]` roster and an ordered `[[matches]]` log referencing players
//! by name:
//!
//! ```toml
//! [engine]
//! k = [40, 20, 10]
//!
//! [[players]]
//! name = "alice"
//! rating = 1450
//! games_played = 12
//!
//! [[players]]
//! name = "bob"
//!
//! [[matches]]
//! a = "alice"
//! b = "bob"
//! result = 1.0
//! ```
//!
//! Player fields other than `name` are read permissively, exactly like
//! [`NewPlayer::from_value`].

use crate::config::RatingConfig;
use crate::error::Result;
use crate::rating::RatingEngine;
use crate::types::{KTier, Match, NewPlayer, PlayerId};
use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// One entry of the match log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Name of player A
    pub a: String,
    /// Name of player B
    pub b: String,
    /// Player A's score
    pub result: f64,
}

/// Parsed season file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeasonFile {
    /// Engine configuration, overriding the application's when present
    #[serde(default)]
    pub engine: Option<RatingConfig>,
    #[serde(default)]
    pub players: Vec<Value>,
    #[serde(default)]
    pub matches: Vec<MatchRecord>,
}

/// Final position of a player after a replay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing {
    pub rank: usize,
    pub name: String,
    pub rating: f64,
    pub games_played: u32,
    pub highest_rating: f64,
    pub tier: KTier,
    pub k: f64,
}

impl SeasonFile {
    /// Parse a season from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Read and parse a season file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read season file {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Invalid season file {}", path.display()))
    }

    /// Create an engine holding the roster
    ///
    /// Uses the season's `[engine]` table if present, else `fallback`.
    pub fn build_engine(
        &self,
        fallback: &RatingConfig,
    ) -> Result<(RatingEngine, HashMap<String, PlayerId>)> {
        let config = self.engine.clone().unwrap_or_else(|| fallback.clone());
        let mut engine = RatingEngine::new(config)?;
        let mut roster = HashMap::new();

        for (index, entry) in self.players.iter().enumerate() {
            let options = NewPlayer::from_value(entry);
            let name = match options.name.as_deref() {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => return Err(anyhow!("Player entry {} has no name", index + 1)),
            };
            if roster.contains_key(&name) {
                return Err(anyhow!("Duplicate player name: {}", name));
            }

            let id = engine.create_player(options);
            roster.insert(name, id);
        }

        Ok((engine, roster))
    }

    /// Resolve the match log against a roster
    pub fn resolve_matches(&self, roster: &HashMap<String, PlayerId>) -> Result<Vec<Match>> {
        self.matches
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let lookup = |name: &str| {
                    roster
                        .get(name)
                        .copied()
                        .ok_or_else(|| anyhow!("Match {} references unknown player {}", index + 1, name))
                };

                if !(0.0..=1.0).contains(&record.result) {
                    return Err(anyhow!(
                        "Match {} has result {} outside [0, 1]",
                        index + 1,
                        record.result
                    ));
                }

                Ok(Match::new(lookup(&record.a)?, lookup(&record.b)?, record.result))
            })
            .collect()
    }

    /// Build the engine and apply every match in order
    pub fn replay(&self, fallback: &RatingConfig) -> Result<RatingEngine> {
        let (mut engine, roster) = self.build_engine(fallback)?;
        let matches = self.resolve_matches(&roster)?;

        info!(
            "Replaying {} matches for {} players",
            matches.len(),
            engine.len()
        );
        engine.update_ratings(&matches);

        Ok(engine)
    }
}

/// Players ordered by rating, highest first
pub fn standings(engine: &RatingEngine) -> Vec<Standing> {
    let mut players: Vec<_> = engine.players().iter().collect();
    players.sort_by(|a, b| {
        b.rating
            .partial_cmp(&a.rating)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    players
        .into_iter()
        .enumerate()
        .map(|(index, player)| Standing {
            rank: index + 1,
            name: player.name.clone(),
            rating: player.rating,
            games_played: player.games_played,
            highest_rating: player.highest_rating,
            tier: engine.tier(player),
            k: engine.get_k(player),
        })
        .collect()
}
