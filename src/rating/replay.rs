//! Full-replay rating recalculation
//!
//! Ratings, win counts and loss counts are never patched incrementally. Every
//! run starts from each player's initial rating and replays the complete
//! history of completed matches in (date, id) order, regenerating the rating
//! ledger from scratch. The output is a pure function of its inputs.

use crate::config::RatingConfig;
use crate::error::{LeagueError, LeagueResult};
use crate::types::{Match, MatchResult, Player, PlayerId, RatingLedgerEntry};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// How a single match ended for one player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerOutcome {
    Win,
    Draw,
    Loss,
}

impl RatingConfig {
    /// Rating delta for one player in one match, including the MVP bonus
    pub fn delta_for(&self, outcome: PlayerOutcome, is_mvp: bool) -> i32 {
        let base = match outcome {
            PlayerOutcome::Win => self.win_delta,
            PlayerOutcome::Draw => self.draw_delta,
            PlayerOutcome::Loss => self.loss_delta,
        };
        if is_mvp {
            base.saturating_add(self.mvp_bonus)
        } else {
            base
        }
    }

    /// Apply `delta` to `before`, never dropping below the floor
    pub fn apply(&self, before: i32, delta: i32) -> i32 {
        before.saturating_add(delta).max(self.rating_floor)
    }
}

/// Check a result against the match it is attached to
///
/// Exactly one of winning team and draw must hold, and the winner must be
/// one of the match's teams.
pub fn validate_result(m: &Match, result: &MatchResult) -> LeagueResult<()> {
    match (result.is_draw, result.winning_team) {
        (true, Some(_)) => Err(LeagueError::ContradictoryResult {
            match_id: m.id,
            reason: "a draw cannot have a winning team".to_string(),
        }),
        (false, None) => Err(LeagueError::ContradictoryResult {
            match_id: m.id,
            reason: "a winning team is required unless the match is a draw".to_string(),
        }),
        (false, Some(team_id)) if m.team(team_id).is_none() => Err(LeagueError::TeamNotInMatch {
            match_id: m.id,
            team_id,
        }),
        _ => Ok(()),
    }
}

/// Output of a full replay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecalcOutcome {
    /// Input players with rating, wins and losses rebuilt, in input order
    pub players: Vec<Player>,
    /// Regenerated ledger in replay order
    pub ledger: Vec<RatingLedgerEntry>,
    pub matches_replayed: usize,
    /// Completed matches with fewer than two teams
    pub matches_skipped: usize,
}

/// Working state for one replay pass
struct ReplayState {
    index: HashMap<PlayerId, usize>,
    ratings: Vec<i32>,
    wins: Vec<u32>,
    losses: Vec<u32>,
}

impl ReplayState {
    fn new(players: &[Player], config: &RatingConfig) -> LeagueResult<Self> {
        let mut index = HashMap::with_capacity(players.len());
        for (i, player) in players.iter().enumerate() {
            if index.insert(player.id, i).is_some() {
                return Err(LeagueError::DuplicatePlayer {
                    player_id: player.id,
                });
            }
            if player.initial_rating < config.rating_floor {
                return Err(LeagueError::InvalidPlayer {
                    player_id: player.id,
                    reason: format!(
                        "initial rating {} is below the floor of {}",
                        player.initial_rating, config.rating_floor
                    ),
                });
            }
        }

        Ok(Self {
            index,
            ratings: players.iter().map(|p| p.initial_rating).collect(),
            wins: vec![0; players.len()],
            losses: vec![0; players.len()],
        })
    }

    fn slot(&self, player_id: PlayerId) -> LeagueResult<usize> {
        self.index
            .get(&player_id)
            .copied()
            .ok_or(LeagueError::UnknownPlayer { player_id })
    }
}

/// Replays match history into ratings and a rating ledger
#[derive(Debug, Clone)]
pub struct RatingReplayEngine {
    config: RatingConfig,
}

impl Default for RatingReplayEngine {
    fn default() -> Self {
        Self {
            config: RatingConfig::default(),
        }
    }
}

impl RatingReplayEngine {
    pub fn new(config: RatingConfig) -> LeagueResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RatingConfig {
        &self.config
    }

    /// Completed matches in replay order; rejects duplicate match ids
    fn replay_order(matches: &[Match]) -> LeagueResult<Vec<&Match>> {
        let mut seen = HashSet::with_capacity(matches.len());
        for m in matches {
            if !seen.insert(m.id) {
                return Err(LeagueError::InvalidMatch {
                    match_id: m.id,
                    reason: "duplicate match id in history".to_string(),
                });
            }
        }

        let mut completed: Vec<&Match> = matches.iter().filter(|m| m.result.is_some()).collect();
        completed.sort_by_key(|m| (m.date, m.id));
        Ok(completed)
    }

    fn replay_match(
        &self,
        m: &Match,
        result: &MatchResult,
        state: &mut ReplayState,
        ledger: &mut Vec<RatingLedgerEntry>,
    ) -> LeagueResult<()> {
        validate_result(m, result)?;

        if let Some(mvp) = result.mvp {
            state.slot(mvp)?;
        }

        let mut participants = HashSet::new();
        for team in &m.teams {
            for &player_id in &team.players {
                if !participants.insert(player_id) {
                    return Err(LeagueError::InvalidMatch {
                        match_id: m.id,
                        reason: format!("player {} appears more than once", player_id),
                    });
                }
            }
        }

        for team in &m.teams {
            let outcome = if result.is_draw {
                PlayerOutcome::Draw
            } else if result.winning_team == Some(team.id) {
                PlayerOutcome::Win
            } else {
                PlayerOutcome::Loss
            };

            for &player_id in &team.players {
                let slot = state.slot(player_id)?;
                let before = state.ratings[slot];
                let delta = self.config.delta_for(outcome, result.mvp == Some(player_id));
                let after = self.config.apply(before, delta);
                state.ratings[slot] = after;

                ledger.push(RatingLedgerEntry {
                    match_id: m.id,
                    player_id,
                    rating_before: before,
                    rating_after: after,
                    delta,
                });

                match outcome {
                    PlayerOutcome::Win => state.wins[slot] += 1,
                    PlayerOutcome::Loss => state.losses[slot] += 1,
                    PlayerOutcome::Draw => {}
                }
            }
        }

        Ok(())
    }

    /// Rebuild every player's rating, wins and losses from full history
    pub fn recalc(&self, players: &[Player], matches: &[Match]) -> LeagueResult<RecalcOutcome> {
        let mut state = ReplayState::new(players, &self.config)?;
        let mut ledger = Vec::new();
        let mut matches_replayed = 0;
        let mut matches_skipped = 0;

        for m in Self::replay_order(matches)? {
            let Some(result) = m.result.as_ref() else {
                continue;
            };

            if m.teams.len() < 2 {
                debug!("Skipping match {} with {} team(s)", m.id, m.teams.len());
                matches_skipped += 1;
                continue;
            }

            self.replay_match(m, result, &mut state, &mut ledger)?;
            matches_replayed += 1;
        }

        let players = players
            .iter()
            .enumerate()
            .map(|(i, player)| Player {
                rating: state.ratings[i],
                wins: state.wins[i],
                losses: state.losses[i],
                ..player.clone()
            })
            .collect();

        info!(
            "Replayed {} matches ({} skipped), {} ledger entries",
            matches_replayed,
            matches_skipped,
            ledger.len()
        );

        Ok(RecalcOutcome {
            players,
            ledger,
            matches_replayed,
            matches_skipped,
        })
    }
}
