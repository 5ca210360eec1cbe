//! Pickup League - team balancing and rating replay for a pickup soccer league
//!
//! This crate provides an exhaustive team balancer with goalkeeper, gender
//! and repeat-pairing objectives, a deterministic full-replay rating engine,
//! and an in-memory league store that ties both to match history.

pub mod balancer;
pub mod config;
pub mod error;
pub mod league;
pub mod rating;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::{ErrorKind, LeagueError, LeagueResult, Result};
pub use types::*;

// Re-export key components
pub use balancer::{PairingCounts, TeamBalancer, TeamSplit};
pub use league::{InMemoryLeagueStore, LeagueSnapshot};
pub use rating::{RatingReplayEngine, RecalcOutcome};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
