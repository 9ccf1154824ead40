use std::collections::HashMap;
use std::env;

use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use rayon::prelude::*;
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::{info, warn};

use crate::http_cache::fetch_body_cached;
use crate::http_client::http_client;
use crate::team_stats::TeamStats;

/// The provider's four summary tables, merged into one row per team. Order
/// matters: on duplicate column names the earlier endpoint wins.
const SUMMARY_ENDPOINTS: [&str; 4] = ["efficiency", "fourfactors", "height", "pointdist"];

const TEAM_NAME_COLUMNS: [&str; 2] = ["Team", "TeamName"];

pub type Row = HashMap<String, Value>;

/// Builds the per-team stats table for the configured season: logs in when
/// credentials are present, pulls the four summary endpoints concurrently,
/// merges their rows by team name and normalizes every row into a fully
/// fallback-filled `TeamStats`.
///
/// The returned map is built once per session and is read-only from the
/// predictor's point of view.
pub fn load_team_stats() -> Result<HashMap<String, TeamStats>> {
    let base_url = env::var("STATS_BASE_URL").context("STATS_BASE_URL is not set")?;
    let season = season_label();
    let client = http_client()?;

    login_if_configured(client, &base_url)?;

    let fetched: Vec<Result<Vec<Row>>> = SUMMARY_ENDPOINTS
        .par_iter()
        .map(|endpoint| fetch_summary_rows(client, &base_url, endpoint, &season))
        .collect();

    let mut batches = Vec::with_capacity(SUMMARY_ENDPOINTS.len());
    for (endpoint, rows) in SUMMARY_ENDPOINTS.into_iter().zip(fetched) {
        let rows = rows.with_context(|| format!("{endpoint} endpoint failed"))?;
        info!(endpoint, rows = rows.len(), "fetched summary endpoint");
        batches.push(rows);
    }

    let merged = merge_endpoint_rows(&batches);
    let teams: HashMap<String, TeamStats> = merged
        .into_iter()
        .map(|(name, row)| {
            let stats = TeamStats::from_merged_row(&name, &row);
            (name, stats)
        })
        .collect();

    info!(teams = teams.len(), %season, "team stats table ready");
    Ok(teams)
}

/// Merges endpoint row batches into one column map per team. Rows without a
/// recognizable team-name column are dropped with a warning; on column-name
/// collisions the first-seen value is kept.
pub fn merge_endpoint_rows(batches: &[Vec<Row>]) -> HashMap<String, Row> {
    let mut merged: HashMap<String, Row> = HashMap::new();
    for rows in batches {
        for row in rows {
            let Some(team) = row_team_name(row) else {
                warn!("summary row without a team name column, skipping");
                continue;
            };
            let entry = merged.entry(team).or_default();
            for (column, value) in row {
                entry
                    .entry(column.clone())
                    .or_insert_with(|| value.clone());
            }
        }
    }
    merged
}

pub fn parse_summary_rows(raw: &str) -> Result<Vec<Row>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(anyhow::anyhow!("empty summary response"));
    }
    serde_json::from_str(trimmed).context("invalid summary json")
}

/// Default season label: from November onward the provider files stats under
/// the following calendar year. `SEASON` overrides.
pub fn season_label() -> String {
    if let Ok(season) = env::var("SEASON") {
        let season = season.trim();
        if !season.is_empty() {
            return season.to_string();
        }
    }
    let today = Local::now().date_naive();
    let year = if today.month() >= 11 {
        today.year() + 1
    } else {
        today.year()
    };
    year.to_string()
}

fn login_if_configured(client: &Client, base_url: &str) -> Result<()> {
    let (Ok(email), Ok(password)) = (env::var("STATS_EMAIL"), env::var("STATS_PASSWORD")) else {
        info!("no provider credentials configured, fetching anonymously");
        return Ok(());
    };

    let url = format!("{}/login", base_url.trim_end_matches('/'));
    let resp = client
        .post(&url)
        .form(&[("email", email.as_str()), ("password", password.as_str())])
        .send()
        .context("login request failed")?;
    if !resp.status().is_success() {
        return Err(anyhow::anyhow!("login failed with http {}", resp.status()));
    }
    info!("provider login ok");
    Ok(())
}

fn fetch_summary_rows(
    client: &Client,
    base_url: &str,
    endpoint: &str,
    season: &str,
) -> Result<Vec<Row>> {
    let url = format!(
        "{}/api/summary/{endpoint}?season={season}",
        base_url.trim_end_matches('/')
    );
    let body = fetch_body_cached(client, &url).context("request failed")?;
    parse_summary_rows(&body)
}

fn row_team_name(row: &Row) -> Option<String> {
    for column in TEAM_NAME_COLUMNS {
        if let Some(name) = row.get(column).and_then(Value::as_str) {
            let name = name.trim();
            if !name.is_empty() {
                return Some(name.to_string());
            }
        }
    }
    None
}
