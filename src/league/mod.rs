//! League state and the workflows that drive the balancer and the replay
//! engine

pub mod store;

pub use store::{InMemoryLeagueStore, LeagueSnapshot, RecalcSummary};
