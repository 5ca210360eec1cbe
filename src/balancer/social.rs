//! Repeated-pairing history for social scoring
//!
//! Counts how often two players shared a team within a lookback window.
//! The balancer penalizes splits that put frequent teammates together again.

use crate::types::{Match, Player, PlayerId};
use crate::utils::lookback_cutoff;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

fn pair_key(a: PlayerId, b: PlayerId) -> (PlayerId, PlayerId) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Same-team occurrence counts keyed by unordered player pair
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairingCounts {
    counts: HashMap<(PlayerId, PlayerId), u32>,
}

impl PairingCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count pairings among `roster` in matches dated on or after
    /// `as_of - lookback_months`
    pub fn from_history(
        matches: &[Match],
        roster: &[PlayerId],
        as_of: NaiveDate,
        lookback_months: u32,
    ) -> Self {
        let since = lookback_cutoff(as_of, lookback_months);
        let targets: HashSet<PlayerId> = roster.iter().copied().collect();
        let mut counts = Self::new();

        for m in matches.iter().filter(|m| m.date >= since) {
            for team in &m.teams {
                let members: Vec<PlayerId> = team
                    .players
                    .iter()
                    .copied()
                    .filter(|id| targets.contains(id))
                    .collect();
                counts.record_team(&members);
            }
        }

        counts
    }

    /// Record one shared appearance for every pair in `team`
    pub fn record_team(&mut self, team: &[PlayerId]) {
        for (i, &a) in team.iter().enumerate() {
            for &b in &team[i + 1..] {
                if a != b {
                    self.record_pair(a, b, 1);
                }
            }
        }
    }

    pub fn record_pair(&mut self, a: PlayerId, b: PlayerId, times: u32) {
        *self.counts.entry(pair_key(a, b)).or_insert(0) += times;
    }

    /// Times `a` and `b` shared a team; symmetric
    pub fn count(&self, a: PlayerId, b: PlayerId) -> u32 {
        self.counts.get(&pair_key(a, b)).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// All pairs sorted by times descending, then by ids
    pub fn to_pairs(&self) -> Vec<PairCount> {
        let mut pairs: Vec<PairCount> = self
            .counts
            .iter()
            .map(|(&(player_a, player_b), &times)| PairCount {
                player_a,
                player_b,
                times,
            })
            .collect();
        pairs.sort_by(|x, y| {
            y.times
                .cmp(&x.times)
                .then(x.player_a.cmp(&y.player_a))
                .then(x.player_b.cmp(&y.player_b))
        });
        pairs
    }
}

/// How often two players were teammates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairCount {
    pub player_a: PlayerId,
    pub player_b: PlayerId,
    pub times: u32,
}

/// League-wide teammate report over the lookback window, ignoring
/// soft-deleted players
pub fn social_pairs(
    matches: &[Match],
    players: &[Player],
    as_of: NaiveDate,
    lookback_months: u32,
) -> Vec<PairCount> {
    let active: Vec<PlayerId> = players
        .iter()
        .filter(|p| p.is_active())
        .map(|p| p.id)
        .collect();
    PairingCounts::from_history(matches, &active, as_of, lookback_months).to_pairs()
}
