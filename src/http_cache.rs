use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use serde::{Deserialize, Serialize};
use tracing::debug;

const CACHE_VERSION: u32 = 1;
const CACHE_DIR: &str = "bracket_edge";
const CACHE_FILE: &str = "stats_cache.json";
// Season tables move at most daily; six hours keeps repeat runs off the wire.
const DEFAULT_TTL_SECS: u64 = 21_600;

static CACHE: Mutex<Option<StatsCacheFile>> = Mutex::new(None);

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct StatsCacheFile {
    version: u32,
    entries: HashMap<String, CacheEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    body: String,
    fetched_at: u64,
}

/// Fetches a provider body, serving it from the on-disk cache while the entry
/// is younger than the TTL (`STATS_CACHE_TTL_SECS`, default six hours).
pub fn fetch_body_cached(client: &Client, url: &str) -> Result<String> {
    let ttl = cache_ttl_secs();
    if let Some(entry) = lookup(url) {
        let age = now_secs().saturating_sub(entry.fetched_at);
        if age <= ttl {
            debug!(url, age, "serving provider body from cache");
            return Ok(entry.body);
        }
    }

    let resp = client
        .get(url)
        .header(USER_AGENT, "Mozilla/5.0")
        .send()
        .context("request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        return Err(anyhow::anyhow!("http {}: {}", status, body));
    }

    store(
        url,
        CacheEntry {
            body: body.clone(),
            fetched_at: now_secs(),
        },
    );
    Ok(body)
}

fn lookup(url: &str) -> Option<CacheEntry> {
    let mut guard = CACHE.lock().expect("stats cache lock poisoned");
    let cache = guard.get_or_insert_with(load_cache_file);
    cache.entries.get(url).cloned()
}

fn store(url: &str, entry: CacheEntry) {
    let mut guard = CACHE.lock().expect("stats cache lock poisoned");
    let cache = guard.get_or_insert_with(load_cache_file);
    cache.version = CACHE_VERSION;
    cache.entries.insert(url.to_string(), entry);
    let _ = save_cache_file(cache);
}

fn cache_ttl_secs() -> u64 {
    std::env::var("STATS_CACHE_TTL_SECS")
        .ok()
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_TTL_SECS)
}

fn load_cache_file() -> StatsCacheFile {
    let Some(path) = cache_path() else {
        return StatsCacheFile::default();
    };
    let Ok(raw) = fs::read_to_string(path) else {
        return StatsCacheFile::default();
    };
    let cache = serde_json::from_str::<StatsCacheFile>(&raw).unwrap_or_default();
    if cache.version != CACHE_VERSION {
        return StatsCacheFile::default();
    }
    cache
}

fn save_cache_file(cache: &StatsCacheFile) -> Result<()> {
    let Some(path) = cache_path() else {
        return Ok(());
    };
    let Some(dir) = path.parent() else {
        return Ok(());
    };
    fs::create_dir_all(dir).ok();
    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_string(cache).context("serialize stats cache")?;
    fs::write(&tmp, json).context("write stats cache")?;
    fs::rename(&tmp, &path).context("swap stats cache")?;
    Ok(())
}

fn cache_path() -> Option<PathBuf> {
    if let Ok(base) = std::env::var("XDG_CACHE_HOME") {
        if !base.trim().is_empty() {
            return Some(PathBuf::from(base).join(CACHE_DIR).join(CACHE_FILE));
        }
    }
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(
        PathBuf::from(home)
            .join(".cache")
            .join(CACHE_DIR)
            .join(CACHE_FILE),
    )
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
