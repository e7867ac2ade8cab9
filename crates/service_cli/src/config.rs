//! Dashboard configuration management.
//!
//! Handles loading of `marketdash.toml` with environment variable override
//! support. Every field has a default, so a missing file is not an error.

use std::path::Path;

use market_synth::refresh::DEFAULT_REFRESH_VOLATILITY;
use market_synth::series::{
    StepDistribution, DEFAULT_CARD_VOLATILITY, DEFAULT_CHART_VOLATILITY, DEFAULT_HISTORY_LENGTH,
    MAX_VOLATILITY,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "MARKETDASH_";

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
/// Longest history a config or command may request.
pub const MAX_HISTORY_LENGTH: usize = 10_000;

/// Dashboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarketConfig {
    /// Points per generated history
    pub history_length: usize,

    /// Step bound (percent) for watchlist sparklines
    pub card_volatility: f64,

    /// Step bound (percent) for single-instrument series
    pub chart_volatility: f64,

    /// Step bound (percent) for each live refresh
    pub refresh_volatility: f64,

    /// Step distribution for all generators
    pub distribution: StepDistribution,

    /// Seed for reproducible output; thread RNG when absent
    pub seed: Option<u64>,

    /// Log level
    pub log_level: String,

    /// Number of stocks shown in the watchlist
    pub watchlist_size: usize,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            history_length: DEFAULT_HISTORY_LENGTH,
            card_volatility: DEFAULT_CARD_VOLATILITY,
            chart_volatility: DEFAULT_CHART_VOLATILITY,
            refresh_volatility: DEFAULT_REFRESH_VOLATILITY,
            distribution: StepDistribution::default(),
            seed: None,
            log_level: "info".to_string(),
            watchlist_size: 5,
        }
    }
}

impl MarketConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from `path`, or defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply `MARKETDASH_*` environment variable overrides
    pub fn with_env_override(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// Keys are the upper-case field names prefixed with [`ENV_PREFIX`].
    /// Unparseable values are logged and ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        if let Some(value) = var("HISTORY_LENGTH") {
            override_parsed(&mut self.history_length, "HISTORY_LENGTH", &value);
        }
        if let Some(value) = var("CARD_VOLATILITY") {
            override_parsed(&mut self.card_volatility, "CARD_VOLATILITY", &value);
        }
        if let Some(value) = var("CHART_VOLATILITY") {
            override_parsed(&mut self.chart_volatility, "CHART_VOLATILITY", &value);
        }
        if let Some(value) = var("REFRESH_VOLATILITY") {
            override_parsed(&mut self.refresh_volatility, "REFRESH_VOLATILITY", &value);
        }
        if let Some(value) = var("DISTRIBUTION") {
            override_parsed(&mut self.distribution, "DISTRIBUTION", &value);
        }
        if let Some(value) = var("SEED") {
            let mut seed = 0_u64;
            if override_parsed(&mut seed, "SEED", &value) {
                self.seed = Some(seed);
            }
        }
        if let Some(value) = var("LOG_LEVEL") {
            self.log_level = value;
        }
        if let Some(value) = var("WATCHLIST_SIZE") {
            override_parsed(&mut self.watchlist_size, "WATCHLIST_SIZE", &value);
        }

        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, VALID_LOG_LEVELS
            ));
        }

        if self.history_length == 0 {
            errors.push("history_length must be greater than 0".to_string());
        }
        if self.history_length > MAX_HISTORY_LENGTH {
            errors.push(format!(
                "history_length {} exceeds maximum allowed ({})",
                self.history_length, MAX_HISTORY_LENGTH
            ));
        }

        for (name, value) in [
            ("card_volatility", self.card_volatility),
            ("chart_volatility", self.chart_volatility),
            ("refresh_volatility", self.refresh_volatility),
        ] {
            if !value.is_finite() || !(0.0..=MAX_VOLATILITY).contains(&value) {
                errors.push(format!(
                    "{} must be between 0 and {}, got {}",
                    name, MAX_VOLATILITY, value
                ));
            }
        }

        if self.watchlist_size == 0 {
            errors.push("watchlist_size must be greater than 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from file (or defaults) with environment overrides and validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_or_default(path)?.with_env_override();
        config.validate()?;
        Ok(config)
    }
}

/// Parse `value` into `target`, returning whether it was applied.
fn override_parsed<T: std::str::FromStr>(target: &mut T, name: &str, value: &str) -> bool {
    match value.trim().parse() {
        Ok(parsed) => {
            *target = parsed;
            true
        }
        Err(_) => {
            warn!("Ignoring unparseable {}{}='{}'", ENV_PREFIX, name, value);
            false
        }
    }
}

/// Configuration error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),
    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),
    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
