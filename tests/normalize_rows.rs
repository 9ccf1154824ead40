use serde_json::json;

use bracket_edge::stats_fetch::{Row, merge_endpoint_rows, parse_summary_rows};
use bracket_edge::team_stats::TeamStats;

fn row(entries: &[(&str, serde_json::Value)]) -> Row {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn merged_endpoints_normalize_into_a_full_record() {
    let efficiency = parse_summary_rows(
        r#"[{"Team":"Gonzaga","AdjOE":121.3,"AdjDE":89.6,"AdjT":72.1,"RoadAdj_eff":1.4,"Seed_eff":1}]"#,
    )
    .unwrap();
    let four_factors = parse_summary_rows(
        r#"[{"Team":"Gonzaga","Off-eFG%_ff":56.1,"Off-TO%_ff":14.9,"Off-OR%_ff":33.8,"Def-OR%_ff":24.6}]"#,
    )
    .unwrap();
    let height = parse_summary_rows(
        r#"[{"Team":"Gonzaga","Height":"78.2","Experience":2.41}]"#,
    )
    .unwrap();
    let point_dist = parse_summary_rows(
        r#"[{"Team":"Gonzaga","3P_off_dist":"36.4%","3P_def_dist":30.9,"PostOff_dist":54.0,"PostDef_dist":43.2}]"#,
    )
    .unwrap();

    let merged = merge_endpoint_rows(&[efficiency, four_factors, height, point_dist]);
    let stats = TeamStats::from_merged_row("Gonzaga", &merged["Gonzaga"]);

    assert_eq!(stats.adj_o, 121.3);
    assert_eq!(stats.adj_d, 89.6);
    assert!((stats.adj_em() - 31.7).abs() < 1e-9);
    assert_eq!(stats.adj_tempo, 72.1);
    assert_eq!(stats.efg_off, 56.1);
    assert_eq!(stats.to_off, 14.9);
    assert_eq!(stats.orb_off, 33.8);
    assert_eq!(stats.orb_def, 24.6);
    // Percent strings and plain strings both normalize.
    assert_eq!(stats.height, 78.2);
    assert_eq!(stats.three_off, 36.4);
    assert_eq!(stats.three_def, 30.9);
    assert_eq!(stats.post_off, 54.0);
    assert_eq!(stats.post_def, 43.2);
    assert_eq!(stats.road_adj, 1.4);
    assert_eq!(stats.seed, 1);
    // Not present anywhere: falls back to the baseline.
    assert_eq!(stats.ftr_off, 0.0);
}

#[test]
fn sparse_rows_fall_back_to_the_baseline_record() {
    let only_name = vec![row(&[("Team", json!("Walk-on U"))])];
    let merged = merge_endpoint_rows(&[only_name]);
    let stats = TeamStats::from_merged_row("Walk-on U", &merged["Walk-on U"]);

    assert_eq!(stats, TeamStats::baseline("Walk-on U"));
}

#[test]
fn later_endpoints_fill_gaps_without_overwriting() {
    let first = vec![row(&[("Team", json!("Duke")), ("AdjO", json!(118.0))])];
    let second = vec![row(&[
        ("Team", json!("Duke")),
        ("AdjO", json!(50.0)),
        ("Height", json!(76.4)),
    ])];

    let merged = merge_endpoint_rows(&[first, second]);
    let stats = TeamStats::from_merged_row("Duke", &merged["Duke"]);
    assert_eq!(stats.adj_o, 118.0);
    assert_eq!(stats.height, 76.4);
}
