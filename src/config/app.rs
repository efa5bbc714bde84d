//! Application configuration for the `tiered-elo` binary
//!
//! Settings come from an optional TOML file, then environment variable
//! overrides, and are validated before use.

use crate::config::RatingConfig;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub service: ServiceSettings,
    #[serde(default)]
    pub rating: RatingConfig,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Name used in log output
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "tiered-elo".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_overrides(|key| env::var(key).ok())?;

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config = Self::from_toml_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        config.apply_overrides(|key| env::var(key).ok())?;

        validate_config(&config)?;
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply `SERVICE_NAME`, `LOG_LEVEL`, `DEFAULT_RATING` and `K_FACTORS`
    /// overrides read through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Some(log_level) = lookup("LOG_LEVEL") {
            self.service.log_level = log_level;
        }
        if let Some(rating) = lookup("DEFAULT_RATING") {
            self.rating.rating = rating
                .trim()
                .parse()
                .map_err(|_| anyhow!("Invalid DEFAULT_RATING value: {}", rating))?;
        }
        if let Some(k) = lookup("K_FACTORS") {
            self.rating.k = parse_k_factors(&k)?;
        }

        Ok(())
    }
}

/// Parse a comma-separated list of K-factors such as `40,20,10`
pub fn parse_k_factors(value: &str) -> Result<Vec<f64>> {
    value
        .split(',')
        .map(|factor| {
            factor
                .trim()
                .parse::<f64>()
                .map_err(|_| anyhow!("Invalid K_FACTORS value: {}", value))
        })
        .collect()
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    config
        .rating
        .validate()
        .map_err(|e| anyhow!("Invalid rating configuration: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.service.log_level, "info");
        assert_eq!(config.rating, RatingConfig::default());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_from_toml_str() {
        let config = AppConfig::from_toml_str(
            r#"
            [service]
            log_level = "debug"

            [rating]
            rating = 1500
            k = [32, 24, 16]
            "#,
        )
        .unwrap();

        assert_eq!(config.service.log_level, "debug");
        assert_eq!(config.service.name, "tiered-elo");
        assert_eq!(config.rating.rating, 1500.0);
        assert_eq!(config.rating.k, vec![32.0, 24.0, 16.0]);
    }

    #[test]
    fn test_from_toml_str_reports_rating_errors() {
        let err = AppConfig::from_toml_str(
            r#"
            [rating]
            k = "fast"
            "#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("k must be an array"));
    }

    #[test]
    fn test_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(lookup_from(&[
                ("LOG_LEVEL", "warn"),
                ("DEFAULT_RATING", "1000"),
                ("K_FACTORS", "32, 16, 8"),
            ]))
            .unwrap();

        assert_eq!(config.service.log_level, "warn");
        assert_eq!(config.rating.rating, 1000.0);
        assert_eq!(config.rating.k, vec![32.0, 16.0, 8.0]);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_invalid_overrides() {
        let mut config = AppConfig::default();
        assert!(config
            .apply_overrides(lookup_from(&[("DEFAULT_RATING", "high")]))
            .is_err());
        assert!(config
            .apply_overrides(lookup_from(&[("K_FACTORS", "40,twenty,10")]))
            .is_err());
    }

    #[test]
    fn test_validate_config() {
        let mut config = AppConfig::default();
        config.service.log_level = "verbose".to_string();
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.rating.k = parse_k_factors("40,20").unwrap();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("k must have length 3"));
    }
}
