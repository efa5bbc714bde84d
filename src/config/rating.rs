//! Rating engine configuration
//!
//! A [`RatingConfig`] carries the default rating for new players and the
//! three K-factors `[novice, mid, master]`. It can be built in code and
//! checked with [`RatingConfig::validate`], or read from loosely typed
//! input with [`RatingConfig::from_value`], which overlays the provided
//! fields onto the defaults and reports the first violated rule.

use crate::error::ConfigError;
use crate::rating::elo::{DEFAULT_K_FACTORS, DEFAULT_RATING};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Configuration for a [`crate::RatingEngine`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct RatingConfig {
    /// Initial rating for players created without one
    pub rating: f64,
    /// K-factors for the novice, mid and master tiers
    pub k: Vec<f64>,
    /// Unrecognized fields, kept verbatim and ignored by the engine
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            rating: DEFAULT_RATING,
            k: DEFAULT_K_FACTORS.to_vec(),
            extra: Map::new(),
        }
    }
}

impl RatingConfig {
    pub fn new(rating: f64, k: [f64; 3]) -> Self {
        Self {
            rating,
            k: k.to_vec(),
            extra: Map::new(),
        }
    }

    /// Validate configuration parameters
    ///
    /// NaN and infinite values do not count as numbers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.rating.is_finite() {
            return Err(ConfigError::RatingType);
        }

        if self.k.len() != 3 {
            return Err(ConfigError::KShape { len: self.k.len() });
        }

        if let Some(index) = self.k.iter().position(|k| !k.is_finite()) {
            return Err(ConfigError::KElementType { index });
        }

        Ok(())
    }

    /// The validated K-factor triple
    pub fn k_factors(&self) -> Result<[f64; 3], ConfigError> {
        self.validate()?;
        Ok([self.k[0], self.k[1], self.k[2]])
    }

    /// Build a configuration from loosely typed input
    ///
    /// Provided fields are overlaid onto the defaults. Checks run in order:
    /// `rating` is a number, `k` is an array, `k` has three elements, every
    /// element of `k` is a number. Anything that is not a table (including
    /// `null`) yields the defaults.
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let Some(table) = value.as_object() else {
            return Ok(config);
        };

        if let Some(rating) = table.get("rating") {
            config.rating = as_number(rating).ok_or(ConfigError::RatingType)?;
        }

        if let Some(k) = table.get("k") {
            let factors = k.as_array().ok_or(ConfigError::KType)?;
            if factors.len() != 3 {
                return Err(ConfigError::KShape { len: factors.len() });
            }

            config.k = factors
                .iter()
                .enumerate()
                .map(|(index, factor)| as_number(factor).ok_or(ConfigError::KElementType { index }))
                .collect::<Result<Vec<_>, _>>()?;
        }

        config.extra = table
            .iter()
            .filter(|(key, _)| key.as_str() != "rating" && key.as_str() != "k")
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok(config)
    }
}

impl TryFrom<Value> for RatingConfig {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(&value)
    }
}

fn as_number(value: &Value) -> Option<f64> {
    value.as_f64().filter(|number| number.is_finite())
}
