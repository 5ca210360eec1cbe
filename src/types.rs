//! Common types used throughout the league core

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for players
pub type PlayerId = u64;

/// Unique identifier for matches
pub type MatchId = u64;

/// Unique identifier for teams
pub type TeamId = u64;

/// Gender category used by the gender balance constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

/// A league player
///
/// `rating`, `wins` and `losses` are derived state owned by the replay
/// engine; they are rebuilt from `initial_rating` and match history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub gender: Gender,
    #[serde(default)]
    pub is_goalkeeper: bool,
    pub rating: i32,
    pub initial_rating: i32,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Player {
    /// Create a new player whose reset rating equals the starting rating
    pub fn new(id: PlayerId, name: impl Into<String>, gender: Gender, rating: i32) -> Self {
        Self {
            id,
            name: name.into(),
            gender,
            is_goalkeeper: false,
            rating,
            initial_rating: rating,
            wins: 0,
            losses: 0,
            deleted_at: None,
        }
    }

    pub fn goalkeeper(mut self) -> Self {
        self.is_goalkeeper = true;
        self
    }

    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    pub fn is_female(&self) -> bool {
        self.gender == Gender::Female
    }
}

/// Match lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    #[default]
    Pending,
    Completed,
}

/// One side of a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub players: Vec<PlayerId>,
}

impl Team {
    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.players.contains(&player_id)
    }
}

/// Outcome of a completed match
///
/// Exactly one of `winning_team` and `is_draw` holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winning_team: Option<TeamId>,
    #[serde(default)]
    pub is_draw: bool,
    #[serde(default)]
    pub goal_diff: u32,
    #[serde(default)]
    pub mvp: Option<PlayerId>,
}

impl MatchResult {
    pub fn win(team_id: TeamId, goal_diff: u32) -> Self {
        Self {
            winning_team: Some(team_id),
            is_draw: false,
            goal_diff,
            mvp: None,
        }
    }

    pub fn draw() -> Self {
        Self {
            winning_team: None,
            is_draw: true,
            goal_diff: 0,
            mvp: None,
        }
    }

    pub fn with_mvp(mut self, player_id: PlayerId) -> Self {
        self.mvp = Some(player_id);
        self
    }
}

/// A scheduled or played match with its rosters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub date: NaiveDate,
    #[serde(default)]
    pub status: MatchStatus,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub result: Option<MatchResult>,
}

impl Match {
    pub fn new(id: MatchId, date: NaiveDate) -> Self {
        Self {
            id,
            date,
            status: MatchStatus::Pending,
            venue: None,
            notes: None,
            teams: Vec::new(),
            result: None,
        }
    }

    pub fn with_team(mut self, team: Team) -> Self {
        self.teams.push(team);
        self
    }

    /// Attach a result; the match becomes completed
    pub fn complete(mut self, result: MatchResult) -> Self {
        self.result = Some(result);
        self.status = MatchStatus::Completed;
        self
    }

    pub fn team(&self, team_id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == team_id)
    }
}

/// One player's rating change from a single replayed match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingLedgerEntry {
    pub match_id: MatchId,
    pub player_id: PlayerId,
    pub rating_before: i32,
    pub rating_after: i32,
    /// Applied delta including any MVP bonus, before the floor clamp
    pub delta: i32,
}

/// A per-match award (for example "mvp")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distinction {
    pub match_id: MatchId,
    pub player_id: PlayerId,
    pub kind: String,
    #[serde(default)]
    pub notes: Option<String>,
}
