//! Runtime configuration for the duel engine
//!
//! Combat numbers (stamina costs, dice sizes, multipliers) live in
//! `combat::constants`. This file only holds the knobs a caller may
//! reasonably want to change between runs.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{DuelError, Result};

/// Configuration for a [`Game`](crate::game::Game)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuelConfig {
    /// Hard cap on rounds in a single fight
    ///
    /// Only a pathological pairing ever gets near this: both sides
    /// dealing zero net damage forever (e.g. zero base damage against
    /// a flat armor roll). Normal fights end in well under 50 rounds.
    pub max_rounds: u32,

    /// A `roll(100)` above this selects the greater-health builder
    ///
    /// At 90, roughly one character in ten gets the 1.5x health bonus.
    pub greater_health_threshold: u32,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            max_rounds: 10_000,
            greater_health_threshold: 90,
        }
    }
}

impl DuelConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.max_rounds == 0 {
            return Err(DuelError::Config("max_rounds must be at least 1".into()));
        }

        // 100 already switches the bonus builder off
        if self.greater_health_threshold > 100 {
            return Err(DuelError::Config(format!(
                "greater_health_threshold ({}) must be <= 100",
                self.greater_health_threshold
            )));
        }

        Ok(())
    }

    /// Parse and validate a config from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: DuelConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = DuelConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_rounds, 10_000);
        assert_eq!(config.greater_health_threshold, 90);
    }

    #[test]
    fn test_zero_rounds_rejected() {
        let config = DuelConfig {
            max_rounds: 0,
            ..DuelConfig::default()
        };
        assert!(matches!(config.validate(), Err(DuelError::Config(_))));
    }

    #[test]
    fn test_threshold_above_hundred_rejected() {
        let config = DuelConfig {
            greater_health_threshold: 101,
            ..DuelConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = DuelConfig::from_toml_str("max_rounds = 250\n").unwrap();
        assert_eq!(config.max_rounds, 250);
        assert_eq!(config.greater_health_threshold, 90);
    }

    #[test]
    fn test_invalid_toml_value_is_error() {
        let result = DuelConfig::from_toml_str("max_rounds = 0\n");
        assert!(result.is_err());
    }
}
