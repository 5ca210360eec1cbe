//! Main application configuration
//!
//! This module defines the primary configuration structures for the league
//! service, including environment variable and TOML file loading and
//! validation.

use crate::config::balancer::BalancerSettings;
use crate::config::rating::RatingConfig;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub balancer: BalancerSettings,
    pub rating: RatingConfig,
}

/// Service-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "pickup-league".to_string(),
            log_level: "info".to_string(),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| anyhow!("Invalid {} value: {}", name, value))
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: AppConfig = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Balancer settings
        if let Ok(value) = env::var("SKILL_WEIGHT") {
            self.balancer.skill_weight = parse_var("SKILL_WEIGHT", &value)?;
        }
        if let Ok(value) = env::var("GENDER_WEIGHT") {
            self.balancer.gender_weight = parse_var("GENDER_WEIGHT", &value)?;
        }
        if let Ok(value) = env::var("SOCIAL_WEIGHT") {
            self.balancer.social_weight = parse_var("SOCIAL_WEIGHT", &value)?;
        }
        if let Ok(value) = env::var("GENDER_TOLERANCE") {
            self.balancer.gender_tolerance = parse_var("GENDER_TOLERANCE", &value)?;
        }
        if let Ok(value) = env::var("USE_SOCIAL") {
            self.balancer.use_social = parse_var("USE_SOCIAL", &value)?;
        }
        if let Ok(value) = env::var("SOCIAL_LOOKBACK_MONTHS") {
            self.balancer.social_lookback_months = parse_var("SOCIAL_LOOKBACK_MONTHS", &value)?;
        }
        if let Ok(value) = env::var("MAX_ROSTER_SIZE") {
            self.balancer.max_roster_size = parse_var("MAX_ROSTER_SIZE", &value)?;
        }

        // Rating settings
        if let Ok(value) = env::var("WIN_DELTA") {
            self.rating.win_delta = parse_var("WIN_DELTA", &value)?;
        }
        if let Ok(value) = env::var("DRAW_DELTA") {
            self.rating.draw_delta = parse_var("DRAW_DELTA", &value)?;
        }
        if let Ok(value) = env::var("LOSS_DELTA") {
            self.rating.loss_delta = parse_var("LOSS_DELTA", &value)?;
        }
        if let Ok(value) = env::var("MVP_BONUS") {
            self.rating.mvp_bonus = parse_var("MVP_BONUS", &value)?;
        }
        if let Ok(value) = env::var("RATING_FLOOR") {
            self.rating.rating_floor = parse_var("RATING_FLOOR", &value)?;
        }

        Ok(())
    }
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

    config.balancer.weights().validate()?;
    if config.balancer.social_lookback_months == 0 {
        return Err(anyhow!("Social lookback must be at least one month"));
    }

    config.rating.validate()?;

    Ok(())
}
