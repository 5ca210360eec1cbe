//! Integration tests for the pickup league core
//!
//! These tests drive the public API end to end:
//! - Team generation from league state, including repeat-pairing history
//! - Result entry followed by full rating replay
//! - Retroactive edits and idempotent recalculation
//! - Error reporting for bad input

mod fixtures;

use pickup_league::balancer::{balance, select_roster, PairingCounts};
use pickup_league::config::{AppConfig, BalanceOptions, BalanceWeights, RatingConfig};
use pickup_league::league::{InMemoryLeagueStore, LeagueSnapshot};
use pickup_league::rating::RatingReplayEngine;
use pickup_league::types::{Distinction, Gender, MatchResult, MatchStatus};
use pickup_league::{ErrorKind, LeagueError};

use fixtures::{
    create_drawn_match, create_seeded_store, create_test_match, create_test_player,
    create_test_roster, create_test_store, create_won_match, date, team_ids,
};

#[test]
fn test_skill_only_four_player_split() {
    let roster = vec![
        create_test_player(1, Gender::Male, 1000),
        create_test_player(2, Gender::Male, 1000),
        create_test_player(3, Gender::Male, 100),
        create_test_player(4, Gender::Male, 100),
    ];

    let split = balance(&roster, &PairingCounts::new(), &BalanceWeights::skill_only()).unwrap();

    let sum_a: i32 = split.team_a.iter().map(|p| p.rating).sum();
    let sum_b: i32 = split.team_b.iter().map(|p| p.rating).sum();
    assert_eq!(sum_a, 1100);
    assert_eq!(sum_b, 1100);
    assert_eq!(split.score.skill_gap, 0.0);
}

#[test]
fn test_three_match_ledger() {
    let players = vec![
        create_test_player(1, Gender::Male, 1000),
        create_test_player(2, Gender::Male, 1000),
    ];
    let matches = vec![
        create_won_match(1, date(2026, 1, 5), vec![1], vec![2]),
        create_drawn_match(2, date(2026, 1, 12), vec![1], vec![2]),
        create_won_match(3, date(2026, 1, 19), vec![2], vec![1]),
    ];

    let outcome = RatingReplayEngine::default()
        .recalc(&players, &matches)
        .unwrap();

    let history: Vec<(i32, i32)> = outcome
        .ledger
        .iter()
        .filter(|e| e.player_id == 1)
        .map(|e| (e.rating_before, e.rating_after))
        .collect();
    assert_eq!(history, vec![(1000, 1100), (1100, 1100), (1100, 1000)]);

    let p = &outcome.players[0];
    assert_eq!(p.rating, 1000);
    assert_eq!(p.wins, 1);
    assert_eq!(p.losses, 1);
}

#[test]
fn test_recalc_is_idempotent() {
    let players = create_test_roster();
    let matches = vec![
        create_won_match(1, date(2026, 2, 1), vec![1, 3, 5, 7, 9], vec![2, 4, 6, 8, 10]),
        create_drawn_match(2, date(2026, 2, 8), vec![1, 4, 6, 7, 10], vec![2, 3, 5, 8, 9]),
        create_won_match(3, date(2026, 2, 15), vec![2, 4, 6, 8, 10], vec![1, 3, 5, 7, 9]),
    ];
    let engine = RatingReplayEngine::default();

    let first = engine.recalc(&players, &matches).unwrap();
    let second = engine.recalc(&players, &matches).unwrap();
    let from_output = engine.recalc(&first.players, &matches).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    assert_eq!(first.ledger, from_output.ledger);
}

#[test]
fn test_unordered_history_is_replayed_chronologically() {
    let players = vec![
        create_test_player(1, Gender::Male, 150),
        create_test_player(2, Gender::Male, 1000),
    ];
    // Loss first drives player 1 to the floor, then the win lifts them
    let ordered = vec![
        create_won_match(1, date(2026, 1, 1), vec![2], vec![1]),
        create_won_match(2, date(2026, 1, 8), vec![1], vec![2]),
    ];
    let shuffled = vec![ordered[1].clone(), ordered[0].clone()];

    let engine = RatingReplayEngine::default();
    let a = engine.recalc(&players, &ordered).unwrap();
    let b = engine.recalc(&players, &shuffled).unwrap();

    assert_eq!(a, b);
    assert_eq!(a.players[0].rating, 200);
}

#[test]
fn test_full_league_workflow() {
    let store = create_seeded_store();
    let ids: Vec<u64> = (1..=10).collect();

    let mut last_split = None;
    for (week, day) in [5, 12, 19].into_iter().enumerate() {
        let m = store
            .create_match(date(2026, 4, day), Some("Park".to_string()), None)
            .unwrap();
        let (m, split) = store
            .generate_teams(m.id, &ids, &BalanceOptions::default(), date(2026, 4, day))
            .unwrap();

        let keepers_a = split.team_a.iter().filter(|p| p.is_goalkeeper).count();
        assert_eq!(keepers_a, 1);

        let result = if week == 1 {
            MatchResult::draw()
        } else {
            MatchResult::win(m.teams[0].id, 2).with_mvp(m.teams[1].players[0])
        };
        store.record_result(m.id, result, Vec::new()).unwrap();
        last_split = Some(split);
    }

    let ledger = store.ledger().unwrap();
    assert_eq!(ledger.len(), 30);
    assert!(last_split.is_some());

    let players = store.players().unwrap();
    let wins: u32 = players.iter().map(|p| p.wins).sum();
    let losses: u32 = players.iter().map(|p| p.losses).sum();
    assert_eq!(wins, 10);
    assert_eq!(losses, 10);
    assert!(players.iter().all(|p| p.rating >= 100));

    let table = store.ranking(3).unwrap();
    assert_eq!(table.len(), 3);
    assert!(table[0].rating >= table[1].rating);
}

#[test]
fn test_social_history_changes_proposal() {
    let store = create_test_store();
    for (name, rating) in [("a", 1000), ("b", 1000), ("c", 1000), ("d", 1000)] {
        store.add_player(name, Gender::Male, rating, false).unwrap();
    }
    let ids = [1, 2, 3, 4];
    let options = BalanceOptions {
        gender_weight: Some(0.0),
        ..BalanceOptions::default()
    };

    // All splits tie on skill; without history the first subset {1,2} wins
    let fresh = store.preview_teams(&ids, &options, date(2026, 5, 1)).unwrap();
    assert_eq!(fresh.team_a_ids(), vec![1, 2]);

    let m = store.create_match(date(2026, 4, 1), None, None).unwrap();
    store
        .generate_teams(m.id, &ids, &options, date(2026, 4, 1))
        .unwrap();
    // Committed teams count towards pairings even before a result exists
    let pairs = store.social_pairs(date(2026, 5, 1), None).unwrap();
    assert_eq!(pairs.len(), 2);
    assert_eq!((pairs[0].player_a, pairs[0].player_b), (1, 2));

    let proposal = store.preview_teams(&ids, &options, date(2026, 5, 1)).unwrap();
    assert_eq!(proposal.team_a_ids(), vec![1, 3]);
    assert_eq!(proposal.score.social_score, 0);

    let no_social = BalanceOptions {
        use_social: Some(false),
        ..options
    };
    let proposal = store
        .preview_teams(&ids, &no_social, date(2026, 5, 1))
        .unwrap();
    assert_eq!(proposal.team_a_ids(), vec![1, 2]);
}

#[test]
fn test_retroactive_edit_replays_history() {
    let store = create_seeded_store();
    let ids: Vec<u64> = (1..=10).collect();

    let first = store.create_match(date(2026, 3, 1), None, None).unwrap();
    let (first, _) = store
        .generate_teams(first.id, &ids, &BalanceOptions::default(), date(2026, 3, 1))
        .unwrap();
    store
        .record_result(first.id, MatchResult::win(first.teams[0].id, 3), Vec::new())
        .unwrap();

    let second = store.create_match(date(2026, 3, 8), None, None).unwrap();
    let (second, _) = store
        .generate_teams(second.id, &ids, &BalanceOptions::default(), date(2026, 3, 8))
        .unwrap();
    store
        .record_result(second.id, MatchResult::draw(), Vec::new())
        .unwrap();

    store
        .update_result(first.id, MatchResult::win(first.teams[1].id, 1), Vec::new())
        .unwrap();

    // Replaying the edited history from scratch gives the same state
    let snapshot = store.snapshot().unwrap();
    let replayed = RatingReplayEngine::default()
        .recalc(&snapshot.players, &snapshot.matches)
        .unwrap();
    assert_eq!(replayed.ledger, snapshot.ledger);
    assert_eq!(replayed.players, snapshot.players);

    for id in &first.teams[1].players {
        let stats = store.player_stats(*id).unwrap();
        assert_eq!(stats.wins, 1);
        assert_eq!(stats.matches_played, 2);
    }
}

#[test]
fn test_mvp_distinctions_feed_stats() {
    let store = create_seeded_store();
    let m = store.create_match(date(2026, 6, 1), None, None).unwrap();
    let (m, _) = store
        .generate_teams(
            m.id,
            &[1, 2, 3, 4, 5, 6],
            &BalanceOptions::default(),
            date(2026, 6, 1),
        )
        .unwrap();
    let mvp = m.teams[0].players[0];
    let award = Distinction {
        match_id: m.id,
        player_id: mvp,
        kind: "mvp".to_string(),
        notes: Some("two goals".to_string()),
    };

    store
        .record_result(
            m.id,
            MatchResult::win(m.teams[0].id, 2).with_mvp(mvp),
            vec![award],
        )
        .unwrap();

    let stats = store.player_stats(mvp).unwrap();
    assert_eq!(stats.mvp_count, 1);
    let history = store.player_history(mvp).unwrap();
    assert_eq!(history[0].delta, 200);

    let row = store
        .ranking(10)
        .unwrap()
        .into_iter()
        .find(|r| r.player_id == mvp)
        .unwrap();
    assert_eq!(row.distinctions.get("mvp"), Some(&1));
}

#[test]
fn test_removed_player_keeps_history_but_leaves_selection() {
    let store = create_seeded_store();
    let m = store.create_match(date(2026, 6, 1), None, None).unwrap();
    let (m, _) = store
        .generate_teams(m.id, &[1, 2, 3, 4], &BalanceOptions::default(), date(2026, 6, 1))
        .unwrap();
    store
        .record_result(m.id, MatchResult::win(m.teams[0].id, 1), Vec::new())
        .unwrap();

    store.remove_player(3).unwrap();

    let err = store
        .preview_teams(&[1, 2, 3, 4], &BalanceOptions::default(), date(2026, 6, 2))
        .unwrap_err();
    assert_eq!(err, LeagueError::UnknownPlayer { player_id: 3 });

    let summary = store.recalculate().unwrap();
    assert_eq!(summary.ledger_entries, 4);
    assert!(store.ranking(20).unwrap().iter().all(|r| r.player_id != 3));
}

#[test]
fn test_error_kinds_surface_to_callers() {
    let roster = create_test_roster();
    let weights = BalanceWeights::default();

    let odd = balance(&roster[..3], &PairingCounts::new(), &weights).unwrap_err();
    assert_eq!(odd.kind(), ErrorKind::Validation);

    let err = select_roster(&roster, &[1, 2, 1, 3]).unwrap_err();
    assert_eq!(err, LeagueError::DuplicatePlayer { player_id: 1 });

    let store = create_test_store();
    let err = store.generate_teams(42, &[1, 2], &BalanceOptions::default(), date(2026, 1, 1));
    assert_eq!(err.unwrap_err().kind(), ErrorKind::NotFound);

    let contradictory = MatchResult {
        winning_team: Some(team_ids(1).0),
        is_draw: true,
        goal_diff: 0,
        mvp: None,
    };
    let players = vec![
        create_test_player(1, Gender::Male, 1000),
        create_test_player(2, Gender::Male, 1000),
    ];
    let bad = create_test_match(1, date(2026, 1, 1), vec![1], vec![2]).complete(contradictory);
    let err = RatingReplayEngine::default()
        .recalc(&players, &[bad])
        .unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_snapshot_loads_from_json_and_config() {
    let raw = r#"{
        "players": [
            {"id": 1, "name": "Ana", "gender": "female", "rating": 1000, "initial_rating": 1000},
            {"id": 2, "name": "Ben", "gender": "male", "rating": 1000, "initial_rating": 1000}
        ],
        "matches": [
            {
                "id": 7,
                "date": "2026-02-01",
                "status": "completed",
                "teams": [
                    {"id": 70, "name": "Bibs", "players": [1]},
                    {"id": 71, "name": "Shirts", "players": [2]}
                ],
                "result": {"winning_team": 70, "goal_diff": 1, "mvp": 2}
            }
        ]
    }"#;
    let snapshot: LeagueSnapshot = serde_json::from_str(raw).unwrap();

    let mut config = AppConfig::default();
    config.rating = RatingConfig {
        mvp_bonus: 50,
        ..RatingConfig::default()
    };
    let store = InMemoryLeagueStore::from_config(&config, snapshot).unwrap();
    store.recalculate().unwrap();

    assert_eq!(store.get_player(1).unwrap().rating, 1100);
    assert_eq!(store.get_player(2).unwrap().rating, 950);
    assert_eq!(store.get_match(7).unwrap().status, MatchStatus::Completed);
}
