//! Rating replay configuration

use crate::error::{LeagueError, LeagueResult};
use serde::{Deserialize, Serialize};

/// Rating deltas and floor applied by the replay engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    pub win_delta: i32,
    pub draw_delta: i32,
    pub loss_delta: i32,
    pub mvp_bonus: i32,
    /// Ratings are clamped to this value after every match
    pub rating_floor: i32,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            win_delta: 100,
            draw_delta: 0,
            loss_delta: -100,
            mvp_bonus: 100,
            rating_floor: 100,
        }
    }
}

impl RatingConfig {
    pub fn validate(&self) -> LeagueResult<()> {
        if self.rating_floor < 0 {
            return Err(LeagueError::ConfigurationError {
                message: "Rating floor must be non-negative".to_string(),
            });
        }
        if self.win_delta < self.loss_delta {
            return Err(LeagueError::ConfigurationError {
                message: "Win delta cannot be smaller than loss delta".to_string(),
            });
        }
        Ok(())
    }
}
