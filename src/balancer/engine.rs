//! Exhaustive team balancing
//!
//! The balancer enumerates every way of picking half the roster as Team A,
//! discards splits that break the goalkeeper rule, and keeps the split with
//! the lowest weighted score. Gender tolerance is enforced on a first pass
//! and dropped on a second pass if nothing satisfied it.
//!
//! Scores and constraints are symmetric under swapping the two teams, so only
//! subsets containing roster index 0 are searched. Ties keep the earliest
//! subset in lexicographic index order.

use crate::balancer::combinations::{binomial, members, Combinations};
use crate::balancer::scoring::{RosterArena, SplitScore};
use crate::balancer::social::PairingCounts;
use crate::config::BalanceWeights;
use crate::error::{LeagueError, LeagueResult};
use crate::types::{Player, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Chosen split with its diagnostics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSplit {
    pub team_a: Vec<Player>,
    pub team_b: Vec<Player>,
    /// False when no split met the gender tolerance and it was relaxed
    pub used_strict_gender: bool,
    pub score: SplitScore,
}

impl TeamSplit {
    pub fn team_a_ids(&self) -> Vec<PlayerId> {
        self.team_a.iter().map(|p| p.id).collect()
    }

    pub fn team_b_ids(&self) -> Vec<PlayerId> {
        self.team_b.iter().map(|p| p.id).collect()
    }
}

/// Resolve requested ids against the league's players, keeping request order
///
/// Soft-deleted players are not selectable.
pub fn select_roster(players: &[Player], ids: &[PlayerId]) -> LeagueResult<Vec<Player>> {
    let mut seen = HashSet::with_capacity(ids.len());
    let mut roster = Vec::with_capacity(ids.len());

    for &id in ids {
        if !seen.insert(id) {
            return Err(LeagueError::DuplicatePlayer { player_id: id });
        }
        let player = players
            .iter()
            .find(|p| p.id == id && p.is_active())
            .ok_or(LeagueError::UnknownPlayer { player_id: id })?;
        roster.push(player.clone());
    }

    Ok(roster)
}

/// Team balancer bound to a set of weights
#[derive(Debug, Clone)]
pub struct TeamBalancer {
    weights: BalanceWeights,
}

impl TeamBalancer {
    pub fn new(weights: BalanceWeights) -> LeagueResult<Self> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &BalanceWeights {
        &self.weights
    }

    fn validate_roster(&self, roster: &[Player]) -> LeagueResult<()> {
        if roster.len() < 2 || roster.len() % 2 != 0 {
            return Err(LeagueError::InvalidRoster {
                reason: format!(
                    "roster must have an even number of players (at least 2), got {}",
                    roster.len()
                ),
            });
        }

        if roster.len() > self.weights.max_roster_size {
            return Err(LeagueError::InvalidRoster {
                reason: format!(
                    "roster of {} exceeds the maximum of {} players",
                    roster.len(),
                    self.weights.max_roster_size
                ),
            });
        }

        let mut seen = HashSet::with_capacity(roster.len());
        for player in roster {
            if !seen.insert(player.id) {
                return Err(LeagueError::DuplicatePlayer {
                    player_id: player.id,
                });
            }
        }

        Ok(())
    }

    /// Best goalkeeper-valid split, optionally within the gender tolerance
    fn search(&self, arena: &RosterArena, strict_gender: bool) -> Option<(u64, SplitScore)> {
        let half = arena.size() / 2;
        let mut best: Option<(u64, SplitScore)> = None;

        for team_a in Combinations::containing_first(arena.size(), half) {
            if !arena.goalkeepers_valid(team_a) {
                continue;
            }
            if strict_gender && arena.gender_gap(team_a) > self.weights.gender_tolerance {
                continue;
            }

            let score = arena.score(team_a, &self.weights);
            match &best {
                Some((_, best_score)) if score.total >= best_score.total => {}
                _ => best = Some((team_a, score)),
            }
        }

        best
    }

    /// Split `roster` into two equal teams
    pub fn balance(&self, roster: &[Player], pairings: &PairingCounts) -> LeagueResult<TeamSplit> {
        self.validate_roster(roster)?;

        let arena = RosterArena::new(roster, pairings, self.weights.use_social);
        debug!(
            "Balancing {} players ({} candidate splits, {} goalkeepers)",
            roster.len(),
            binomial(roster.len(), roster.len() / 2) / 2,
            arena.goalkeeper_count()
        );

        let (team_a, score, used_strict_gender) = match self.search(&arena, true) {
            Some((mask, score)) => (mask, score, true),
            None => {
                debug!(
                    "No split within gender tolerance {}, relaxing",
                    self.weights.gender_tolerance
                );
                match self.search(&arena, false) {
                    Some((mask, score)) => (mask, score, false),
                    None => {
                        warn!(
                            "No valid split for roster of {} players",
                            roster.len()
                        );
                        return Err(LeagueError::NoFeasibleSplit {
                            reason: "no split places exactly one goalkeeper on each team"
                                .to_string(),
                        });
                    }
                }
            }
        };

        let team_a_players: Vec<Player> = members(team_a).map(|i| roster[i].clone()).collect();
        let team_b_players: Vec<Player> = members(arena.other_side(team_a))
            .map(|i| roster[i].clone())
            .collect();

        debug!(
            "Selected split: skill gap {:.2}, gender gap {}, social {}, total {:.2}",
            score.skill_gap, score.gender_gap, score.social_score, score.total
        );

        Ok(TeamSplit {
            team_a: team_a_players,
            team_b: team_b_players,
            used_strict_gender,
            score,
        })
    }
}

/// Balance `roster` with the given weights
pub fn balance(
    roster: &[Player],
    pairings: &PairingCounts,
    weights: &BalanceWeights,
) -> LeagueResult<TeamSplit> {
    TeamBalancer::new(weights.clone())?.balance(roster, pairings)
}
