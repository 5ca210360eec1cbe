//! Error types for the league core
//!
//! Application code (configuration, CLI) works with `anyhow` through the
//! [`Result`] alias; the balancer, replay engine and store return the
//! structured [`LeagueError`] so callers can tell bad input from an
//! infeasible request.

use crate::types::{MatchId, PlayerId, TeamId};

/// Result type alias for application code
pub type Result<T> = anyhow::Result<T>;

/// Result type for core league operations
pub type LeagueResult<T> = std::result::Result<T, LeagueError>;

/// Broad category of a [`LeagueError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Structurally invalid input, never retried
    Validation,
    /// Well-formed input with no solution under the hard constraints
    Infeasible,
    NotFound,
    Conflict,
    Configuration,
    Internal,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LeagueError {
    #[error("Invalid roster: {reason}")]
    InvalidRoster { reason: String },

    #[error("Duplicate player in roster: {player_id}")]
    DuplicatePlayer { player_id: PlayerId },

    #[error("Unknown player: {player_id}")]
    UnknownPlayer { player_id: PlayerId },

    #[error("Invalid player {player_id}: {reason}")]
    InvalidPlayer { player_id: PlayerId, reason: String },

    #[error("Contradictory result for match {match_id}: {reason}")]
    ContradictoryResult { match_id: MatchId, reason: String },

    #[error("Invalid match {match_id}: {reason}")]
    InvalidMatch { match_id: MatchId, reason: String },

    #[error("Cannot generate teams: {reason}")]
    NoFeasibleSplit { reason: String },

    #[error("Player not found: {player_id}")]
    PlayerNotFound { player_id: PlayerId },

    #[error("Match not found: {match_id}")]
    MatchNotFound { match_id: MatchId },

    #[error("Teams already exist for match {match_id}")]
    TeamsAlreadyExist { match_id: MatchId },

    #[error("Result already exists for match {match_id}")]
    ResultAlreadyExists { match_id: MatchId },

    #[error("Result not found for match {match_id}")]
    ResultNotFound { match_id: MatchId },

    #[error("Team {team_id} does not belong to match {match_id}")]
    TeamNotInMatch { match_id: MatchId, team_id: TeamId },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl LeagueError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LeagueError::InvalidRoster { .. }
            | LeagueError::DuplicatePlayer { .. }
            | LeagueError::UnknownPlayer { .. }
            | LeagueError::InvalidPlayer { .. }
            | LeagueError::ContradictoryResult { .. }
            | LeagueError::InvalidMatch { .. }
            | LeagueError::TeamNotInMatch { .. } => ErrorKind::Validation,
            LeagueError::NoFeasibleSplit { .. } => ErrorKind::Infeasible,
            LeagueError::PlayerNotFound { .. }
            | LeagueError::MatchNotFound { .. }
            | LeagueError::ResultNotFound { .. } => ErrorKind::NotFound,
            LeagueError::TeamsAlreadyExist { .. } | LeagueError::ResultAlreadyExists { .. } => {
                ErrorKind::Conflict
            }
            LeagueError::ConfigurationError { .. } => ErrorKind::Configuration,
            LeagueError::InternalError { .. } => ErrorKind::Internal,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    pub fn is_infeasible(&self) -> bool {
        self.kind() == ErrorKind::Infeasible
    }
}
