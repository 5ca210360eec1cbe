//! Rating recalculation by full history replay
//!
//! This module rebuilds player ratings, win/loss counts and the rating
//! ledger from scratch, and derives rankings and player statistics from the
//! result.

pub mod replay;
pub mod standings;

// Re-export commonly used types
pub use replay::{validate_result, PlayerOutcome, RatingReplayEngine, RecalcOutcome};
pub use standings::{player_history, player_stats, ranking, PlayerStats, RankingRow};
