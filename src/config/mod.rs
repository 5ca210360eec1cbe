//! Configuration management for the league service
//!
//! This module handles configuration loading from environment variables and
//! TOML files, validation, and default values for the balancer and the
//! rating replay engine.

pub mod app;
pub mod balancer;
pub mod rating;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings};
pub use balancer::{BalanceOptions, BalanceWeights, BalancerSettings};
pub use rating::RatingConfig;
