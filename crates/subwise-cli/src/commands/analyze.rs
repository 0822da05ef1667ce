//! Scoring, recommendation, and summary command implementations

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;

use subwise_core::models::{BudgetPreferences, Subscription, SubscriptionStatus};
use subwise_core::AnalysisEngine;

use super::truncate;

pub fn cmd_score(
    file: &Path,
    now: Option<&str>,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let subscriptions = super::load_subscriptions(file)?;
    let now = super::resolve_now(now)?;
    let mut rng = super::build_rng(seed);

    let engine = AnalysisEngine::new();
    let scores = engine.score_unused_likelihood(&subscriptions, now, &mut rng)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&scores)?);
        return Ok(());
    }

    if scores.is_empty() {
        println!("No saved subscriptions to score.");
        return Ok(());
    }

    // Highest score (most likely unused) first
    let mut rows: Vec<(&Subscription, f64)> = subscriptions
        .iter()
        .filter_map(|s| {
            let id = s.id.as_deref()?;
            scores.get(id).map(|score| (s, *score))
        })
        .collect();
    rows.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    println!();
    println!("🔎 Likely-Unused Scores");
    println!("   ─────────────────────────────────────────────");
    for (sub, score) in rows {
        println!(
            "   {:24} │ {:>8} │ {:.2}",
            truncate(&sub.name, 24),
            format!("${:.2}", sub.monthly_cost()),
            score
        );
    }

    Ok(())
}

pub fn cmd_recommend(
    file: &Path,
    prefs: Option<&Path>,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let subscriptions = super::load_subscriptions(file)?;
    let preferences = super::load_preferences(prefs)?;
    let mut rng = super::build_rng(seed);

    let engine = AnalysisEngine::new();
    let recommendations = engine.generate_recommendations(&subscriptions, &preferences, &mut rng)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
        return Ok(());
    }

    if recommendations.is_empty() {
        println!("No savings opportunities found. Nothing to trim right now.");
        return Ok(());
    }

    let total: f64 = recommendations.iter().map(|r| r.monthly_savings).sum();
    println!();
    println!("💡 Savings Recommendations (up to ${:.2}/month)", total);

    for rec in &recommendations {
        println!();
        println!(
            "   {} │ save ${:.2}/month (confidence {:.0}%)",
            rec.title,
            rec.monthly_savings,
            rec.confidence_score * 100.0
        );
        println!("   {}", rec.description);
        for (i, step) in rec.implementation_steps.iter().enumerate() {
            println!("     {}. {}", i + 1, step);
        }
    }

    Ok(())
}

pub fn cmd_summary(file: &Path, prefs: Option<&Path>, history: Option<&Path>) -> Result<()> {
    let subscriptions = super::load_subscriptions(file)?;
    let preferences = super::load_preferences(prefs)?;
    let history = super::load_history(history)?;

    let summary = monthly_summary_or_fallback(&subscriptions, &history, &preferences);
    println!("{}", summary);

    Ok(())
}

/// Ask the engine for the narrated summary, falling back to a locally
/// computed one-liner if narration fails. The fallback is a host concern;
/// the engine itself has no partial-failure mode.
pub fn monthly_summary_or_fallback(
    subscriptions: &[Subscription],
    history: &BTreeMap<NaiveDate, f64>,
    preferences: &BudgetPreferences,
) -> String {
    let engine = AnalysisEngine::new();
    match engine.generate_monthly_summary(subscriptions, history, preferences) {
        Ok(summary) => summary,
        Err(e) => {
            tracing::warn!(error = %e, "Summary narration failed, using fallback");
            fallback_summary(subscriptions)
        }
    }
}

pub(crate) fn fallback_summary(subscriptions: &[Subscription]) -> String {
    // Empty sums come back as -0.0; normalize so the total never prints
    // with a negative sign.
    let total: f64 = subscriptions
        .iter()
        .filter(|s| s.status == SubscriptionStatus::Active)
        .map(|s| s.monthly_cost())
        .sum::<f64>()
        + 0.0;
    format!(
        "You're spending ${:.2} per month across {} subscriptions.",
        total,
        subscriptions.len()
    )
}
