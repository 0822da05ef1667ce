//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `analyze` - Scoring, recommendation, and summary commands
//!
//! Shared snapshot-loading helpers live here.

pub mod analyze;

// Re-export command functions for main.rs
pub use analyze::*;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

use subwise_core::models::{subscriptions_from_json, BudgetPreferences, Subscription};

/// Load a subscription snapshot from a JSON file
pub fn load_subscriptions(path: &Path) -> Result<Vec<Subscription>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot file: {}", path.display()))?;
    let subscriptions = subscriptions_from_json(&json)
        .with_context(|| format!("Invalid subscription snapshot: {}", path.display()))?;
    Ok(subscriptions)
}

/// Load budget preferences, falling back to defaults (budget analysis
/// disabled) when no file is given
pub fn load_preferences(path: Option<&Path>) -> Result<BudgetPreferences> {
    let Some(path) = path else {
        return Ok(BudgetPreferences::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read preferences file: {}", path.display()))?;
    let preferences: BudgetPreferences = serde_json::from_str(&json)
        .with_context(|| format!("Invalid preferences file: {}", path.display()))?;
    Ok(preferences)
}

/// Load the month -> spend history map; empty without a file
pub fn load_history(path: Option<&Path>) -> Result<BTreeMap<NaiveDate, f64>> {
    let Some(path) = path else {
        return Ok(BTreeMap::new());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read history file: {}", path.display()))?;
    let history: BTreeMap<NaiveDate, f64> = serde_json::from_str(&json)
        .with_context(|| format!("Invalid history file: {}", path.display()))?;
    Ok(history)
}

/// Resolve the evaluation timestamp from an optional YYYY-MM-DD argument
pub fn resolve_now(now: Option<&str>) -> Result<DateTime<Utc>> {
    match now {
        Some(s) => {
            let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .context("Invalid --now date format (use YYYY-MM-DD)")?;
            Ok(date.and_time(NaiveTime::MIN).and_utc())
        }
        None => Ok(Utc::now()),
    }
}

/// Build the random source: seeded when requested, OS entropy otherwise
pub fn build_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Truncate a string to a maximum number of characters, adding "..." if
/// truncated. Counts chars, not bytes, so multibyte names cut cleanly.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
