use std::collections::HashMap;

use bracket_edge::error::PredictError;
use bracket_edge::predictor::{Location, MarginWeights, Round, predict_matchup};
use bracket_edge::team_stats::TeamStats;

fn table(teams: Vec<TeamStats>) -> HashMap<String, TeamStats> {
    teams.into_iter().map(|t| (t.name.clone(), t)).collect()
}

fn contender(name: &str, seed: u32) -> TeamStats {
    TeamStats {
        adj_o: 119.5,
        adj_d: 91.0,
        adj_tempo: 68.0,
        three_off: 37.5,
        three_def: 31.0,
        orb_off: 34.0,
        orb_def: 27.5,
        to_off: 14.8,
        post_off: 53.0,
        post_def: 46.0,
        height: 77.5,
        experience: 2.8,
        road_adj: 1.2,
        seed,
        ..TeamStats::baseline(name)
    }
}

#[test]
fn mirror_matchup_is_a_dead_heat_won_by_team_a() {
    let teams = table(vec![TeamStats::baseline("TeamA"), TeamStats::baseline("TeamB")]);
    let result = predict_matchup(
        "TeamA",
        "TeamB",
        &teams,
        Location::Neutral,
        Round::Regular,
        &MarginWeights::default(),
    )
    .expect("both teams are in the table");

    assert_eq!(result.spread, 0.0);
    assert_eq!(result.win_prob_a, 0.5);
    assert_eq!(result.win_prob_b, 0.5);
    assert_eq!(result.winner, "TeamA");
}

#[test]
fn unknown_team_is_a_typed_error_with_no_partial_result() {
    let teams = table(vec![TeamStats::baseline("TeamA")]);
    let err = predict_matchup(
        "TeamA",
        "Mystery Tech",
        &teams,
        Location::Home,
        Round::Sweet16,
        &MarginWeights::default(),
    )
    .unwrap_err();

    match err {
        PredictError::UnknownTeam(name) => assert_eq!(name, "Mystery Tech"),
    }
}

#[test]
fn repeated_calls_leave_the_table_untouched() {
    let teams = table(vec![contender("Favored", 2), TeamStats::baseline("Dog")]);
    let snapshot = teams.clone();
    let w = MarginWeights::default();

    let first = predict_matchup("Favored", "Dog", &teams, Location::Home, Round::Round2, &w)
        .unwrap();
    let second = predict_matchup("Favored", "Dog", &teams, Location::Home, Round::Round2, &w)
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(teams, snapshot);
}

#[test]
fn tournament_round_dampens_a_seeded_favorite() {
    let mut dog = TeamStats::baseline("Dog");
    dog.seed = 15;
    let teams = table(vec![contender("Favored", 2), dog]);
    let w = MarginWeights::default();

    let regular =
        predict_matchup("Favored", "Dog", &teams, Location::Neutral, Round::Regular, &w).unwrap();
    let round1 =
        predict_matchup("Favored", "Dog", &teams, Location::Neutral, Round::Round1, &w).unwrap();
    let elite8 =
        predict_matchup("Favored", "Dog", &teams, Location::Neutral, Round::Elite8, &w).unwrap();

    assert!(regular.win_prob_a > round1.win_prob_a);
    assert!(round1.win_prob_a < elite8.win_prob_a);
    assert!(round1.win_prob_a > 0.5, "damping never flips the favorite");
    for result in [&regular, &round1, &elite8] {
        assert!((result.win_prob_a + result.win_prob_b - 1.0).abs() < 1e-9);
        assert!(result.win_prob_a > 0.0 && result.win_prob_a < 1.0);
    }
}

#[test]
fn spread_and_probability_agree_on_the_favorite() {
    let teams = table(vec![contender("Favored", 1), TeamStats::baseline("Dog")]);
    let result = predict_matchup(
        "Favored",
        "Dog",
        &teams,
        Location::Neutral,
        Round::Regular,
        &MarginWeights::default(),
    )
    .unwrap();

    assert!(result.spread > 0.0);
    assert!(result.win_prob_a > 0.5);
    assert_eq!(result.winner, "Favored");
    assert!(result.winner_prob <= 0.99);
}

#[test]
fn injected_weights_change_the_spread_deterministically() {
    let teams = table(vec![contender("Favored", 1), TeamStats::baseline("Dog")]);
    let flat = MarginWeights {
        height: 0.0,
        three_p: 0.0,
        orb: 0.0,
        to: 0.0,
        two_p: 0.0,
        road: 0.0,
        calibration: 1.0,
    };

    let result =
        predict_matchup("Favored", "Dog", &teams, Location::Neutral, Round::Regular, &flat)
            .unwrap();
    // With every extra factor zeroed the spread is pure efficiency margin
    // rescaled by tempo: (28.5 - 20.0) * (69.0 / 100.0).
    assert!((result.spread - 8.5 * 0.69).abs() < 1e-9);
}
