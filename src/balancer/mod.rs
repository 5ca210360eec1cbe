//! Team balancing for pickup matches
//!
//! This module splits an even roster into two teams, trading off skill,
//! gender balance and how often players have recently been teammates.

pub mod combinations;
pub mod engine;
pub mod scoring;
pub mod social;

// Re-export commonly used types
pub use engine::{balance, select_roster, TeamBalancer, TeamSplit};
pub use scoring::{RosterArena, SplitScore};
pub use social::{social_pairs, PairCount, PairingCounts};
