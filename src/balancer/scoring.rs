//! Split scoring over an index arena of the roster
//!
//! Lower scores are better. Each candidate split is a bitmask, so scoring
//! never clones players.

use crate::balancer::combinations::{full_mask, members};
use crate::balancer::social::PairingCounts;
use crate::config::BalanceWeights;
use crate::types::Player;
use crate::utils::rating_difference;
use serde::{Deserialize, Serialize};

/// Diagnostic breakdown of a split's unfairness
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitScore {
    /// |sum(rating A) - sum(rating B)| / roster size
    pub skill_gap: f64,
    /// |female A - female B|
    pub gender_gap: u32,
    /// Sum of same-team pairing counts over both teams
    pub social_score: u32,
    /// Weighted total used for selection
    pub total: f64,
}

/// Roster flattened into per-index arrays and masks
#[derive(Debug, Clone)]
pub struct RosterArena {
    size: usize,
    ratings: Vec<i64>,
    female: u64,
    goalkeepers: u64,
    /// Row-major `size * size` pairing counts; empty when social scoring is off
    pairings: Vec<u32>,
}

impl RosterArena {
    pub fn new(roster: &[Player], pairings: &PairingCounts, use_social: bool) -> Self {
        let size = roster.len();
        let mut female = 0u64;
        let mut goalkeepers = 0u64;
        for (i, player) in roster.iter().enumerate() {
            if player.is_female() {
                female |= 1 << i;
            }
            if player.is_goalkeeper {
                goalkeepers |= 1 << i;
            }
        }

        let pairings = if use_social && !pairings.is_empty() {
            let mut matrix = vec![0u32; size * size];
            for i in 0..size {
                for j in i + 1..size {
                    let times = pairings.count(roster[i].id, roster[j].id);
                    matrix[i * size + j] = times;
                    matrix[j * size + i] = times;
                }
            }
            matrix
        } else {
            Vec::new()
        };

        Self {
            size,
            ratings: roster.iter().map(|p| i64::from(p.rating)).collect(),
            female,
            goalkeepers,
            pairings,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Complement of `team_a` within the roster
    pub fn other_side(&self, team_a: u64) -> u64 {
        full_mask(self.size) & !team_a
    }

    pub fn goalkeeper_count(&self) -> u32 {
        self.goalkeepers.count_ones()
    }

    /// With two or more goalkeepers each team needs exactly one
    pub fn goalkeepers_valid(&self, team_a: u64) -> bool {
        if self.goalkeeper_count() < 2 {
            return true;
        }
        let team_b = self.other_side(team_a);
        (self.goalkeepers & team_a).count_ones() == 1
            && (self.goalkeepers & team_b).count_ones() == 1
    }

    pub fn gender_gap(&self, team_a: u64) -> u32 {
        let team_b = self.other_side(team_a);
        (self.female & team_a)
            .count_ones()
            .abs_diff((self.female & team_b).count_ones())
    }

    pub fn skill_gap(&self, team_a: u64) -> f64 {
        let team_b = self.other_side(team_a);
        let total = |mask: u64| members(mask).map(|i| self.ratings[i]).sum::<i64>();
        rating_difference(total(team_a), total(team_b)) as f64 / self.size as f64
    }

    fn team_social(&self, mask: u64) -> u32 {
        let indices: Vec<usize> = members(mask).collect();
        let mut score = 0;
        for (n, &i) in indices.iter().enumerate() {
            for &j in &indices[n + 1..] {
                score += self.pairings[i * self.size + j];
            }
        }
        score
    }

    pub fn social_score(&self, team_a: u64) -> u32 {
        if self.pairings.is_empty() {
            return 0;
        }
        self.team_social(team_a) + self.team_social(self.other_side(team_a))
    }

    pub fn score(&self, team_a: u64, weights: &BalanceWeights) -> SplitScore {
        let skill_gap = self.skill_gap(team_a);
        let gender_gap = self.gender_gap(team_a);
        let social_score = if weights.use_social {
            self.social_score(team_a)
        } else {
            0
        };

        let total = weights.skill * skill_gap
            + weights.gender * f64::from(gender_gap)
            + weights.social * f64::from(social_score);

        SplitScore {
            skill_gap,
            gender_gap,
            social_score,
            total,
        }
    }
}
