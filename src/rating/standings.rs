//! Rankings and per-player statistics derived from replayed state

use crate::types::{Distinction, Player, PlayerId, RatingLedgerEntry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Distinction kind counted as an MVP award
pub const MVP_DISTINCTION: &str = "mvp";

/// One row of the league table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingRow {
    pub player_id: PlayerId,
    pub name: String,
    pub rating: i32,
    pub wins: u32,
    pub losses: u32,
    pub distinctions: BTreeMap<String, u32>,
}

/// Aggregate statistics for a single player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub player_id: PlayerId,
    pub rating: i32,
    pub wins: u32,
    pub losses: u32,
    pub matches_played: usize,
    pub mvp_count: u32,
    pub distinctions: BTreeMap<String, u32>,
}

fn distinctions_by_kind(distinctions: &[Distinction], player_id: PlayerId) -> BTreeMap<String, u32> {
    let mut by_kind = BTreeMap::new();
    for d in distinctions.iter().filter(|d| d.player_id == player_id) {
        *by_kind.entry(d.kind.clone()).or_insert(0) += 1;
    }
    by_kind
}

/// Active players ordered by rating (highest first), then by id
pub fn ranking(players: &[Player], distinctions: &[Distinction], limit: usize) -> Vec<RankingRow> {
    let mut active: Vec<&Player> = players.iter().filter(|p| p.is_active()).collect();
    active.sort_by(|a, b| b.rating.cmp(&a.rating).then(a.id.cmp(&b.id)));

    active
        .into_iter()
        .take(limit)
        .map(|p| RankingRow {
            player_id: p.id,
            name: p.name.clone(),
            rating: p.rating,
            wins: p.wins,
            losses: p.losses,
            distinctions: distinctions_by_kind(distinctions, p.id),
        })
        .collect()
}

pub fn player_stats(
    player: &Player,
    ledger: &[RatingLedgerEntry],
    distinctions: &[Distinction],
) -> PlayerStats {
    let by_kind = distinctions_by_kind(distinctions, player.id);
    PlayerStats {
        player_id: player.id,
        rating: player.rating,
        wins: player.wins,
        losses: player.losses,
        matches_played: ledger.iter().filter(|e| e.player_id == player.id).count(),
        mvp_count: by_kind.get(MVP_DISTINCTION).copied().unwrap_or(0),
        distinctions: by_kind,
    }
}

/// Ledger rows for one player, in replay order
pub fn player_history(ledger: &[RatingLedgerEntry], player_id: PlayerId) -> Vec<RatingLedgerEntry> {
    ledger
        .iter()
        .filter(|e| e.player_id == player_id)
        .cloned()
        .collect()
}
