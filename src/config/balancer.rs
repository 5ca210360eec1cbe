//! Team balancer configuration

use crate::error::{LeagueError, LeagueResult};
use serde::{Deserialize, Serialize};

/// League-wide balancer defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalancerSettings {
    /// Weight of the per-player skill gap
    pub skill_weight: f64,
    /// Weight of the female count difference
    pub gender_weight: f64,
    /// Weight of the repeated pairing score
    pub social_weight: f64,
    /// Allowed female count difference in the strict pass
    pub gender_tolerance: u32,
    /// Whether social scoring is on unless overridden
    pub use_social: bool,
    /// Lookback window for pairing history, in months
    pub social_lookback_months: u32,
    /// Largest roster the exhaustive search accepts
    pub max_roster_size: usize,
}

impl Default for BalancerSettings {
    fn default() -> Self {
        Self {
            skill_weight: 1.0,
            gender_weight: 5.0,
            social_weight: 0.5,
            gender_tolerance: 1,
            use_social: true,
            social_lookback_months: 12,
            max_roster_size: 24,
        }
    }
}

impl BalancerSettings {
    /// Weights used when a request carries no overrides
    pub fn weights(&self) -> BalanceWeights {
        BalanceOptions::default().resolve(self)
    }
}

/// Resolved weights for a single balancing run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceWeights {
    pub skill: f64,
    pub gender: f64,
    pub social: f64,
    pub gender_tolerance: u32,
    pub use_social: bool,
    pub max_roster_size: usize,
}

impl Default for BalanceWeights {
    fn default() -> Self {
        BalancerSettings::default().weights()
    }
}

impl BalanceWeights {
    /// Weights that only look at the skill gap
    pub fn skill_only() -> Self {
        Self {
            skill: 1.0,
            gender: 0.0,
            social: 0.0,
            use_social: false,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> LeagueResult<()> {
        for (name, value) in [
            ("skill", self.skill),
            ("gender", self.gender),
            ("social", self.social),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(LeagueError::ConfigurationError {
                    message: format!("{} weight must be a non-negative number", name),
                });
            }
        }
        if !(2..=64).contains(&self.max_roster_size) {
            return Err(LeagueError::ConfigurationError {
                message: format!(
                    "Max roster size must be between 2 and 64, got {}",
                    self.max_roster_size
                ),
            });
        }
        Ok(())
    }
}

/// Per-request overrides; unset fields fall back to league defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceOptions {
    pub skill_weight: Option<f64>,
    pub gender_weight: Option<f64>,
    pub social_weight: Option<f64>,
    pub gender_tolerance: Option<u32>,
    pub use_social: Option<bool>,
    pub team_a_name: Option<String>,
    pub team_b_name: Option<String>,
}

impl BalanceOptions {
    pub fn resolve(&self, defaults: &BalancerSettings) -> BalanceWeights {
        BalanceWeights {
            skill: self.skill_weight.unwrap_or(defaults.skill_weight),
            gender: self.gender_weight.unwrap_or(defaults.gender_weight),
            social: self.social_weight.unwrap_or(defaults.social_weight),
            gender_tolerance: self.gender_tolerance.unwrap_or(defaults.gender_tolerance),
            use_social: self.use_social.unwrap_or(defaults.use_social),
            max_roster_size: defaults.max_roster_size,
        }
    }

    pub fn team_names(&self) -> (String, String) {
        (
            self.team_a_name
                .clone()
                .unwrap_or_else(|| "Team A".to_string()),
            self.team_b_name
                .clone()
                .unwrap_or_else(|| "Team B".to_string()),
        )
    }
}
