use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use bracket_edge::error::PredictError;
use bracket_edge::predictor::{Location, MarginWeights, MatchupResult, Round, predict_matchup};
use bracket_edge::stats_fetch::{load_team_stats, season_label};
use bracket_edge::team_stats::TeamStats;

/// Below this winner probability the matchup prints an upset warning.
const UPSET_ALERT_THRESHOLD: f64 = 0.70;

/// Exit code for a team name missing from the stats table.
const EXIT_UNKNOWN_TEAM: u8 = 2;

fn main() -> ExitCode {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let season = season_label();
    println!("Loading team stats for season {season} (tournament mode)...");
    let teams = load_team_stats()?;
    println!("Loaded stats for {} teams.", teams.len());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("\nEnter matchup details:");
    let team_a = prompt(&mut lines, "Team 1: ")?;
    let team_b = prompt(&mut lines, "Team 2: ")?;

    let location = loop {
        let raw = prompt(&mut lines, "Location relative to Team 1 (home/away/neutral): ")?;
        match Location::parse(&raw) {
            Some(location) => break location,
            None => println!("Unrecognized location '{raw}'."),
        }
    };

    let round = loop {
        let raw = prompt(
            &mut lines,
            "Round (Regular, Round1, Round2, Sweet16, Elite8, Final4, Championship): ",
        )?;
        match Round::parse(&raw) {
            Some(round) => break round,
            None => println!("Unrecognized round '{raw}'."),
        }
    };

    let weights = MarginWeights::default();
    let result = match predict_matchup(&team_a, &team_b, &teams, location, round, &weights) {
        Ok(result) => result,
        Err(err @ PredictError::UnknownTeam(_)) => {
            eprintln!("Error: {err}");
            return Ok(ExitCode::from(EXIT_UNKNOWN_TEAM));
        }
    };

    render_result(&team_a, &team_b, &teams, location, round, &result);
    Ok(ExitCode::SUCCESS)
}

fn prompt(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    label: &str,
) -> Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    // EOF must abort instead of reading as an empty answer, or the re-prompt
    // loops above would spin forever on a closed stdin.
    let Some(line) = lines.next().transpose()? else {
        anyhow::bail!("stdin closed before matchup input was complete");
    };
    Ok(line.trim().to_string())
}

fn render_result(
    team_a: &str,
    team_b: &str,
    teams: &HashMap<String, TeamStats>,
    location: Location,
    round: Round,
    result: &MatchupResult,
) {
    println!(
        "\nMatchup: {team_a} vs {team_b} ({} site, Round: {})",
        location.label(),
        round.label()
    );
    println!(
        "Predicted Winner: {} with a {:.1}% win probability",
        result.winner,
        result.winner_prob * 100.0
    );
    println!(" - {team_a} win probability: {:.1}%", result.win_prob_a * 100.0);
    println!(" - {team_b} win probability: {:.1}%", result.win_prob_b * 100.0);

    if result.winner_prob < UPSET_ALERT_THRESHOLD {
        println!("Upset Alert: this matchup is close, upsets are possible!");
    }

    println!("\nTeam Ratings (AdjO / AdjD):");
    if let (Some(a), Some(b)) = (teams.get(team_a), teams.get(team_b)) {
        println!("{team_a}: {:.1} / {:.1}", a.adj_o, a.adj_d);
        println!("{team_b}: {:.1} / {:.1}", b.adj_o, b.adj_d);
    }

    let spread_text = if result.spread >= 0.0 {
        format!("{team_a} favored by {:.1} points", result.spread)
    } else {
        format!("{team_b} favored by {:.1} points", result.spread.abs())
    };
    println!("Predicted Point Spread: {spread_text}");
}
