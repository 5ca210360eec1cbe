//! In-memory league store
//!
//! All league state lives behind a single `RwLock`. Result changes and
//! recalculations hold the write lock for the whole reset, replay and
//! write-back sequence, so readers never see a half-replayed league and
//! overlapping recalculations run one after another.

use crate::balancer::{select_roster, social_pairs, PairCount, PairingCounts, TeamBalancer, TeamSplit};
use crate::config::{AppConfig, BalanceOptions, BalancerSettings, RatingConfig};
use crate::error::{LeagueError, LeagueResult};
use crate::rating::{
    player_history, player_stats, ranking, validate_result, PlayerStats, RankingRow,
    RatingReplayEngine,
};
use crate::types::{
    Distinction, Gender, Match, MatchId, MatchResult, MatchStatus, Player, PlayerId,
    RatingLedgerEntry, Team, TeamId,
};
use crate::utils::current_timestamp;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

/// Serializable league state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueSnapshot {
    pub players: Vec<Player>,
    pub matches: Vec<Match>,
    pub ledger: Vec<RatingLedgerEntry>,
    pub distinctions: Vec<Distinction>,
}

impl LeagueSnapshot {
    fn next_player_id(&self) -> PlayerId {
        self.players.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }

    fn next_match_id(&self) -> MatchId {
        self.matches.iter().map(|m| m.id).max().unwrap_or(0) + 1
    }

    fn next_team_id(&self) -> u64 {
        self.matches
            .iter()
            .flat_map(|m| m.teams.iter().map(|t| t.id))
            .max()
            .unwrap_or(0)
            + 1
    }

    fn match_mut(&mut self, match_id: MatchId) -> LeagueResult<&mut Match> {
        self.matches
            .iter_mut()
            .find(|m| m.id == match_id)
            .ok_or(LeagueError::MatchNotFound { match_id })
    }
}

fn replace_match_distinctions(
    state: &mut LeagueSnapshot,
    match_id: MatchId,
    distinctions: Vec<Distinction>,
) {
    state.distinctions.retain(|d| d.match_id != match_id);
    state
        .distinctions
        .extend(distinctions.into_iter().map(|d| Distinction { match_id, ..d }));
}

/// Counts from one recalculation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecalcSummary {
    pub matches_replayed: usize,
    pub matches_skipped: usize,
    pub ledger_entries: usize,
}

/// League state guarded for concurrent access
#[derive(Debug)]
pub struct InMemoryLeagueStore {
    state: RwLock<LeagueSnapshot>,
    balancer: BalancerSettings,
    engine: RatingReplayEngine,
}

impl InMemoryLeagueStore {
    /// Create an empty league
    pub fn new(balancer: BalancerSettings, rating: RatingConfig) -> LeagueResult<Self> {
        Self::from_snapshot(LeagueSnapshot::default(), balancer, rating)
    }

    pub fn from_config(config: &AppConfig, snapshot: LeagueSnapshot) -> LeagueResult<Self> {
        Self::from_snapshot(snapshot, config.balancer.clone(), config.rating.clone())
    }

    /// Load existing state; derived fields are kept as stored until the next
    /// recalculation
    pub fn from_snapshot(
        snapshot: LeagueSnapshot,
        balancer: BalancerSettings,
        rating: RatingConfig,
    ) -> LeagueResult<Self> {
        balancer.weights().validate()?;
        Ok(Self {
            state: RwLock::new(snapshot),
            balancer,
            engine: RatingReplayEngine::new(rating)?,
        })
    }

    fn read(&self) -> LeagueResult<RwLockReadGuard<'_, LeagueSnapshot>> {
        self.state.read().map_err(|_| LeagueError::InternalError {
            message: "Failed to acquire league read lock".to_string(),
        })
    }

    fn write(&self) -> LeagueResult<RwLockWriteGuard<'_, LeagueSnapshot>> {
        self.state.write().map_err(|_| LeagueError::InternalError {
            message: "Failed to acquire league write lock".to_string(),
        })
    }

    pub fn snapshot(&self) -> LeagueResult<LeagueSnapshot> {
        Ok(self.read()?.clone())
    }

    pub fn balancer_settings(&self) -> &BalancerSettings {
        &self.balancer
    }

    pub fn add_player(
        &self,
        name: &str,
        gender: Gender,
        rating: i32,
        is_goalkeeper: bool,
    ) -> LeagueResult<Player> {
        let mut state = self.write()?;
        let id = state.next_player_id();

        let floor = self.engine.config().rating_floor;
        if rating < floor {
            return Err(LeagueError::InvalidPlayer {
                player_id: id,
                reason: format!("rating {} is below the floor of {}", rating, floor),
            });
        }

        let mut player = Player::new(id, name, gender, rating);
        player.is_goalkeeper = is_goalkeeper;
        state.players.push(player.clone());
        debug!("Added player {} ({})", id, name);
        Ok(player)
    }

    /// Soft-delete a player; their history keeps counting
    pub fn remove_player(&self, player_id: PlayerId) -> LeagueResult<()> {
        let mut state = self.write()?;
        let player = state
            .players
            .iter_mut()
            .find(|p| p.id == player_id && p.is_active())
            .ok_or(LeagueError::PlayerNotFound { player_id })?;
        player.deleted_at = Some(current_timestamp());
        Ok(())
    }

    pub fn get_player(&self, player_id: PlayerId) -> LeagueResult<Player> {
        self.read()?
            .players
            .iter()
            .find(|p| p.id == player_id)
            .cloned()
            .ok_or(LeagueError::PlayerNotFound { player_id })
    }

    /// Active players
    pub fn players(&self) -> LeagueResult<Vec<Player>> {
        Ok(self
            .read()?
            .players
            .iter()
            .filter(|p| p.is_active())
            .cloned()
            .collect())
    }

    pub fn create_match(
        &self,
        date: NaiveDate,
        venue: Option<String>,
        notes: Option<String>,
    ) -> LeagueResult<Match> {
        let mut state = self.write()?;
        let mut m = Match::new(state.next_match_id(), date);
        m.venue = venue;
        m.notes = notes;
        state.matches.push(m.clone());
        Ok(m)
    }

    pub fn get_match(&self, match_id: MatchId) -> LeagueResult<Match> {
        self.read()?
            .matches
            .iter()
            .find(|m| m.id == match_id)
            .cloned()
            .ok_or(LeagueError::MatchNotFound { match_id })
    }

    fn compute_split(
        &self,
        state: &LeagueSnapshot,
        player_ids: &[PlayerId],
        options: &BalanceOptions,
        as_of: NaiveDate,
    ) -> LeagueResult<TeamSplit> {
        let weights = options.resolve(&self.balancer);
        let roster = select_roster(&state.players, player_ids)?;
        let pairings = if weights.use_social {
            PairingCounts::from_history(
                &state.matches,
                player_ids,
                as_of,
                self.balancer.social_lookback_months,
            )
        } else {
            PairingCounts::new()
        };

        TeamBalancer::new(weights)?.balance(&roster, &pairings)
    }

    /// Propose teams without committing them
    pub fn preview_teams(
        &self,
        player_ids: &[PlayerId],
        options: &BalanceOptions,
        as_of: NaiveDate,
    ) -> LeagueResult<TeamSplit> {
        let state = self.read()?;
        self.compute_split(&state, player_ids, options, as_of)
    }

    /// Balance teams and attach them to a match that has none yet
    pub fn generate_teams(
        &self,
        match_id: MatchId,
        player_ids: &[PlayerId],
        options: &BalanceOptions,
        as_of: NaiveDate,
    ) -> LeagueResult<(Match, TeamSplit)> {
        let mut state = self.write()?;

        let existing = state
            .matches
            .iter()
            .find(|m| m.id == match_id)
            .ok_or(LeagueError::MatchNotFound { match_id })?;
        if !existing.teams.is_empty() {
            return Err(LeagueError::TeamsAlreadyExist { match_id });
        }
        if existing.result.is_some() {
            return Err(LeagueError::ResultAlreadyExists { match_id });
        }

        let split = self.compute_split(&state, player_ids, options, as_of)?;
        let (name_a, name_b) = options.team_names();
        let team_id = state.next_team_id();

        let m = state.match_mut(match_id)?;
        m.teams.push(Team {
            id: team_id,
            name: name_a,
            players: split.team_a_ids(),
        });
        m.teams.push(Team {
            id: team_id + 1,
            name: name_b,
            players: split.team_b_ids(),
        });

        info!(
            "Generated teams for match {} (strict gender: {})",
            match_id, split.used_strict_gender
        );
        Ok((m.clone(), split))
    }

    /// Attach a result to a match, replace its distinctions and recalculate
    /// all ratings
    pub fn record_result(
        &self,
        match_id: MatchId,
        result: MatchResult,
        distinctions: Vec<Distinction>,
    ) -> LeagueResult<RecalcSummary> {
        self.upsert_result(match_id, result, distinctions, true)
    }

    /// Replace an existing result and recalculate all ratings
    pub fn update_result(
        &self,
        match_id: MatchId,
        result: MatchResult,
        distinctions: Vec<Distinction>,
    ) -> LeagueResult<RecalcSummary> {
        self.upsert_result(match_id, result, distinctions, false)
    }

    fn upsert_result(
        &self,
        match_id: MatchId,
        result: MatchResult,
        distinctions: Vec<Distinction>,
        create: bool,
    ) -> LeagueResult<RecalcSummary> {
        let mut state = self.write()?;

        let referenced = result
            .mvp
            .into_iter()
            .chain(distinctions.iter().map(|d| d.player_id));
        for player_id in referenced {
            if !state.players.iter().any(|p| p.id == player_id) {
                return Err(LeagueError::UnknownPlayer { player_id });
            }
        }

        let m = state.match_mut(match_id)?;
        match (&m.result, create) {
            (Some(_), true) => return Err(LeagueError::ResultAlreadyExists { match_id }),
            (None, false) => return Err(LeagueError::ResultNotFound { match_id }),
            _ => {}
        }
        if m.teams.len() < 2 {
            return Err(LeagueError::InvalidMatch {
                match_id,
                reason: format!("a result needs two teams, found {}", m.teams.len()),
            });
        }
        validate_result(m, &result)?;

        let previous = (m.result.replace(result), m.status);
        m.status = MatchStatus::Completed;

        match self.recalculate_locked(&mut state) {
            Ok(summary) => {
                replace_match_distinctions(&mut state, match_id, distinctions);
                Ok(summary)
            }
            Err(e) => {
                warn!("Recalculation failed for match {}: {}", match_id, e);
                let m = state.match_mut(match_id)?;
                m.result = previous.0;
                m.status = previous.1;
                Err(e)
            }
        }
    }

    /// Apply a history edit and replay; the edit is undone if either step fails
    fn edit_history<F>(&self, state: &mut LeagueSnapshot, edit: F) -> LeagueResult<RecalcSummary>
    where
        F: FnOnce(&mut LeagueSnapshot) -> LeagueResult<()>,
    {
        let matches = state.matches.clone();
        let distinctions = state.distinctions.clone();

        let replayed = edit(state).and_then(|_| self.recalculate_locked(state));
        if let Err(e) = &replayed {
            warn!("History edit rolled back: {}", e);
            state.matches = matches;
            state.distinctions = distinctions;
        }
        replayed
    }

    /// Replace the roster of one team and recalculate all ratings
    pub fn update_team_players(
        &self,
        match_id: MatchId,
        team_id: TeamId,
        player_ids: Vec<PlayerId>,
    ) -> LeagueResult<RecalcSummary> {
        let mut state = self.write()?;

        let m = state
            .matches
            .iter()
            .find(|m| m.id == match_id)
            .ok_or(LeagueError::MatchNotFound { match_id })?;
        if m.team(team_id).is_none() {
            return Err(LeagueError::TeamNotInMatch { match_id, team_id });
        }

        let mut seen: HashSet<PlayerId> = m
            .teams
            .iter()
            .filter(|t| t.id != team_id)
            .flat_map(|t| t.players.iter().copied())
            .collect();
        for &player_id in &player_ids {
            if !state.players.iter().any(|p| p.id == player_id) {
                return Err(LeagueError::UnknownPlayer { player_id });
            }
            if !seen.insert(player_id) {
                return Err(LeagueError::DuplicatePlayer { player_id });
            }
        }

        self.edit_history(&mut state, |state| {
            let m = state.match_mut(match_id)?;
            if let Some(team) = m.teams.iter_mut().find(|t| t.id == team_id) {
                team.players = player_ids;
            }
            Ok(())
        })
    }

    /// Move a match to another date and recalculate all ratings
    pub fn update_match_date(
        &self,
        match_id: MatchId,
        date: NaiveDate,
    ) -> LeagueResult<RecalcSummary> {
        let mut state = self.write()?;
        self.edit_history(&mut state, |state| {
            state.match_mut(match_id)?.date = date;
            Ok(())
        })
    }

    /// Remove a match with its teams, result and distinctions, then
    /// recalculate all ratings
    pub fn delete_match(&self, match_id: MatchId) -> LeagueResult<RecalcSummary> {
        let mut state = self.write()?;
        self.edit_history(&mut state, |state| {
            let before = state.matches.len();
            state.matches.retain(|m| m.id != match_id);
            if state.matches.len() == before {
                return Err(LeagueError::MatchNotFound { match_id });
            }
            state.distinctions.retain(|d| d.match_id != match_id);
            info!("Deleted match {}", match_id);
            Ok(())
        })
    }

    fn recalculate_locked(&self, state: &mut LeagueSnapshot) -> LeagueResult<RecalcSummary> {
        let outcome = self.engine.recalc(&state.players, &state.matches)?;
        let summary = RecalcSummary {
            matches_replayed: outcome.matches_replayed,
            matches_skipped: outcome.matches_skipped,
            ledger_entries: outcome.ledger.len(),
        };
        state.players = outcome.players;
        state.ledger = outcome.ledger;
        Ok(summary)
    }

    /// Reset, replay and write back all derived rating state atomically
    pub fn recalculate(&self) -> LeagueResult<RecalcSummary> {
        let mut state = self.write()?;
        self.recalculate_locked(&mut state)
    }

    pub fn ledger(&self) -> LeagueResult<Vec<RatingLedgerEntry>> {
        Ok(self.read()?.ledger.clone())
    }

    pub fn ranking(&self, limit: usize) -> LeagueResult<Vec<RankingRow>> {
        let state = self.read()?;
        Ok(ranking(&state.players, &state.distinctions, limit))
    }

    pub fn player_stats(&self, player_id: PlayerId) -> LeagueResult<PlayerStats> {
        let state = self.read()?;
        let player = state
            .players
            .iter()
            .find(|p| p.id == player_id)
            .ok_or(LeagueError::PlayerNotFound { player_id })?;
        Ok(player_stats(player, &state.ledger, &state.distinctions))
    }

    pub fn player_history(&self, player_id: PlayerId) -> LeagueResult<Vec<RatingLedgerEntry>> {
        let state = self.read()?;
        if !state.players.iter().any(|p| p.id == player_id) {
            return Err(LeagueError::PlayerNotFound { player_id });
        }
        Ok(player_history(&state.ledger, player_id))
    }

    /// Teammate report; `months` defaults to the configured lookback
    pub fn social_pairs(&self, as_of: NaiveDate, months: Option<u32>) -> LeagueResult<Vec<PairCount>> {
        let state = self.read()?;
        Ok(social_pairs(
            &state.matches,
            &state.players,
            as_of,
            months.unwrap_or(self.balancer.social_lookback_months),
        ))
    }
}
