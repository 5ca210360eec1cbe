//! Shared builders for integration and property tests

#![allow(dead_code)]

use chrono::NaiveDate;
use pickup_league::config::{BalancerSettings, RatingConfig};
use pickup_league::league::InMemoryLeagueStore;
use pickup_league::types::{Gender, Match, MatchResult, Player, PlayerId, Team, TeamId};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn create_test_player(id: PlayerId, gender: Gender, rating: i32) -> Player {
    Player::new(id, format!("player-{}", id), gender, rating)
}

pub fn create_test_goalkeeper(id: PlayerId, gender: Gender, rating: i32) -> Player {
    create_test_player(id, gender, rating).goalkeeper()
}

/// Team ids are derived from the match id: `2m` and `2m + 1`
pub fn team_ids(match_id: u64) -> (TeamId, TeamId) {
    (match_id * 2, match_id * 2 + 1)
}

pub fn create_test_match(
    id: u64,
    on: NaiveDate,
    team_a: Vec<PlayerId>,
    team_b: Vec<PlayerId>,
) -> Match {
    let (a, b) = team_ids(id);
    Match::new(id, on)
        .with_team(Team {
            id: a,
            name: "Team A".to_string(),
            players: team_a,
        })
        .with_team(Team {
            id: b,
            name: "Team B".to_string(),
            players: team_b,
        })
}

/// Completed match won by the first team
pub fn create_won_match(
    id: u64,
    on: NaiveDate,
    winners: Vec<PlayerId>,
    losers: Vec<PlayerId>,
) -> Match {
    let (a, _) = team_ids(id);
    create_test_match(id, on, winners, losers).complete(MatchResult::win(a, 1))
}

pub fn create_drawn_match(
    id: u64,
    on: NaiveDate,
    team_a: Vec<PlayerId>,
    team_b: Vec<PlayerId>,
) -> Match {
    create_test_match(id, on, team_a, team_b).complete(MatchResult::draw())
}

/// Ten players: two goalkeepers and four women, ratings spread 800..=1250
pub fn create_test_roster() -> Vec<Player> {
    vec![
        create_test_goalkeeper(1, Gender::Male, 1200),
        create_test_goalkeeper(2, Gender::Female, 1100),
        create_test_player(3, Gender::Male, 1250),
        create_test_player(4, Gender::Male, 800),
        create_test_player(5, Gender::Female, 950),
        create_test_player(6, Gender::Female, 1000),
        create_test_player(7, Gender::Male, 1050),
        create_test_player(8, Gender::Female, 900),
        create_test_player(9, Gender::Male, 1150),
        create_test_player(10, Gender::Male, 850),
    ]
}

/// Empty store with default settings
pub fn create_test_store() -> InMemoryLeagueStore {
    InMemoryLeagueStore::new(BalancerSettings::default(), RatingConfig::default()).unwrap()
}

/// Store seeded with the ten-player roster; ids match `create_test_roster`
pub fn create_seeded_store() -> InMemoryLeagueStore {
    let store = create_test_store();
    for player in create_test_roster() {
        store
            .add_player(&player.name, player.gender, player.rating, player.is_goalkeeper)
            .unwrap();
    }
    store
}
