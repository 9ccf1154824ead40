use std::collections::HashMap;

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use bracket_edge::predictor::{Location, MarginWeights, Round, predict_matchup};
use bracket_edge::team_stats::TeamStats;

fn sample_table() -> HashMap<String, TeamStats> {
    let mut teams = HashMap::new();
    for i in 0..64u32 {
        let mut t = TeamStats::baseline(&format!("Team {i}"));
        t.adj_o += (i % 16) as f64 * 0.7;
        t.adj_d -= (i % 8) as f64 * 0.4;
        t.adj_tempo += (i % 10) as f64 * 0.5;
        t.three_off += (i % 12) as f64 * 0.3;
        t.seed = (i % 16) + 1;
        teams.insert(t.name.clone(), t);
    }
    teams
}

fn bench_predict_matchup(c: &mut Criterion) {
    let teams = sample_table();
    let weights = MarginWeights::default();

    c.bench_function("predict_matchup_regular", |b| {
        b.iter(|| {
            predict_matchup(
                black_box("Team 3"),
                black_box("Team 42"),
                &teams,
                Location::Neutral,
                Round::Regular,
                &weights,
            )
            .unwrap()
        })
    });

    c.bench_function("predict_matchup_round1", |b| {
        b.iter(|| {
            predict_matchup(
                black_box("Team 3"),
                black_box("Team 42"),
                &teams,
                Location::Away,
                Round::Round1,
                &weights,
            )
            .unwrap()
        })
    });
}

criterion_group!(benches, bench_predict_matchup);
criterion_main!(benches);
