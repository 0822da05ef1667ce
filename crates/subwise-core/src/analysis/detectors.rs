//! Savings detectors
//!
//! Five independent rules, each inspecting the same subscription snapshot
//! for one savings pattern and emitting at most one recommendation:
//!
//! - Streaming rotation (too many video services active at once)
//! - Annual conversion (monthly plans worth switching to annual billing)
//! - Music consolidation (overlapping music services)
//! - Storage consolidation (overlapping cloud storage)
//! - Budget adjustment (over budget with cancellable non-active subs)
//!
//! Detectors never look at each other's output; the engine merges and ranks
//! whatever they emit.

use rand::{Rng, RngCore};

use crate::models::{BillingCycle, Category, Subscription, SubscriptionStatus};

use super::engine::{AnalysisContext, Detector};
use super::types::{Recommendation, RecommendationKind};

/// Video streaming services eligible for rotation
const STREAMING_SERVICES: [&str; 6] = ["netflix", "hulu", "disney", "hbo", "amazon", "youtube"];

/// Music streaming services considered interchangeable
const MUSIC_SERVICES: [&str; 5] = [
    "spotify",
    "apple music",
    "youtube music",
    "tidal",
    "amazon music",
];

/// Cloud storage services considered interchangeable
const STORAGE_SERVICES: [&str; 4] = ["dropbox", "icloud", "google drive", "onedrive"];

/// Annual plans typically undercut monthly billing by about 15%
const ANNUAL_DISCOUNT: f64 = 0.15;

fn name_matches(subscription: &Subscription, services: &[&str]) -> bool {
    let name = subscription.name.to_lowercase();
    services.iter().any(|service| name.contains(service))
}

fn name_or_logo_matches(subscription: &Subscription, services: &[&str]) -> bool {
    let name = subscription.name.to_lowercase();
    let logo = subscription.logo_name.to_lowercase();
    services
        .iter()
        .any(|service| name.contains(service) || logo.contains(service))
}

fn ids_of(subscriptions: &[&Subscription]) -> Vec<String> {
    subscriptions.iter().filter_map(|s| s.id.clone()).collect()
}

/// Confidence jitter shared by every detector
fn jitter(base: f64, rng: &mut dyn RngCore) -> f64 {
    base + rng.gen_range(-0.05..=0.05)
}

/// Sum the monthly cost of every candidate except the most expensive one
/// (by raw per-cycle cost). Used by both consolidation detectors.
fn savings_keeping_most_expensive(candidates: &[&Subscription]) -> f64 {
    let Some(keep) = candidates
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| {
            a.cost
                .partial_cmp(&b.cost)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(i, _)| i)
    else {
        return 0.0;
    };

    candidates
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != keep)
        .map(|(_, s)| s.monthly_cost())
        .sum()
}

/// Suggests keeping 1-2 video streaming services and rotating the rest
pub struct StreamingRotationDetector;

impl Detector for StreamingRotationDetector {
    fn kind(&self) -> RecommendationKind {
        RecommendationKind::StreamingRotation
    }

    fn name(&self) -> &'static str {
        "Streaming Service Rotation"
    }

    fn detect(&self, ctx: &AnalysisContext<'_>, rng: &mut dyn RngCore) -> Option<Recommendation> {
        let streaming: Vec<&Subscription> = ctx
            .subscriptions
            .iter()
            .filter(|s| {
                s.category == Category::Entertainment && name_or_logo_matches(s, &STREAMING_SERVICES)
            })
            .collect();

        if streaming.len() <= 2 {
            return None;
        }

        // Keep the two most expensive; everything cheaper rotates
        let mut by_cost = streaming.clone();
        by_cost.sort_by(|a, b| {
            a.cost
                .partial_cmp(&b.cost)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let potential_savings: f64 = by_cost[..by_cost.len() - 2]
            .iter()
            .map(|s| s.monthly_cost())
            .sum();

        if potential_savings <= 0.0 {
            return None;
        }

        Some(Recommendation {
            id: self.kind(),
            title: "Streaming Service Rotation".to_string(),
            description: "Keep only 1-2 streaming services active at once and rotate monthly \
                          based on what you want to watch."
                .to_string(),
            subscription_ids: ids_of(&streaming),
            monthly_savings: potential_savings,
            confidence_score: jitter(0.85, rng),
            implementation_steps: vec![
                "Identify which services you use most frequently".to_string(),
                "Keep those services active year-round".to_string(),
                "Subscribe to other services only when they have content you want to watch"
                    .to_string(),
                "Cancel after watching the desired content".to_string(),
            ],
        })
    }
}

/// Suggests switching eligible monthly plans to annual billing
pub struct AnnualConversionDetector;

impl Detector for AnnualConversionDetector {
    fn kind(&self) -> RecommendationKind {
        RecommendationKind::AnnualConversion
    }

    fn name(&self) -> &'static str {
        "Switch to Annual Billing"
    }

    fn detect(&self, ctx: &AnalysisContext<'_>, rng: &mut dyn RngCore) -> Option<Recommendation> {
        let monthly: Vec<&Subscription> = ctx
            .subscriptions
            .iter()
            .filter(|s| {
                s.billing_cycle == BillingCycle::Monthly
                    && s.cost >= 10.0
                    && s.status == SubscriptionStatus::Active
            })
            .collect();

        if monthly.is_empty() {
            return None;
        }

        // Flat 15% of the raw monthly cost; the cycle filter above means
        // cost and monthly cost coincide here
        let annual_savings: f64 = monthly.iter().map(|s| s.cost * ANNUAL_DISCOUNT).sum();

        if annual_savings <= 0.0 {
            return None;
        }

        Some(Recommendation {
            id: self.kind(),
            title: "Switch to Annual Billing".to_string(),
            description: "Save by converting these monthly subscriptions to annual plans."
                .to_string(),
            subscription_ids: ids_of(&monthly),
            monthly_savings: annual_savings,
            confidence_score: jitter(0.90, rng),
            implementation_steps: vec![
                "Identify subscriptions you've had for more than 3 months".to_string(),
                "Check if annual plans are available".to_string(),
                "Calculate the potential savings".to_string(),
                "Switch billing cycle to annual for consistent services".to_string(),
            ],
        })
    }
}

/// Suggests keeping a single music streaming service
pub struct MusicConsolidationDetector;

impl Detector for MusicConsolidationDetector {
    fn kind(&self) -> RecommendationKind {
        RecommendationKind::ConsolidateMusic
    }

    fn name(&self) -> &'static str {
        "Consolidate Music Services"
    }

    fn detect(&self, ctx: &AnalysisContext<'_>, rng: &mut dyn RngCore) -> Option<Recommendation> {
        let music: Vec<&Subscription> = ctx
            .subscriptions
            .iter()
            .filter(|s| s.category == Category::Entertainment && name_matches(s, &MUSIC_SERVICES))
            .collect();

        if music.len() <= 1 {
            return None;
        }

        let potential_savings = savings_keeping_most_expensive(&music);
        if potential_savings <= 0.0 {
            return None;
        }

        Some(Recommendation {
            id: self.kind(),
            title: "Consolidate Music Services".to_string(),
            description: "You have multiple music streaming services. Consider keeping only one."
                .to_string(),
            subscription_ids: ids_of(&music),
            monthly_savings: potential_savings,
            confidence_score: jitter(0.80, rng),
            implementation_steps: vec![
                "Identify which music service you prefer".to_string(),
                "Check if you can transfer playlists".to_string(),
                "Cancel redundant subscriptions".to_string(),
            ],
        })
    }
}

/// Suggests keeping a single cloud storage service
pub struct StorageConsolidationDetector;

impl Detector for StorageConsolidationDetector {
    fn kind(&self) -> RecommendationKind {
        RecommendationKind::ConsolidateStorage
    }

    fn name(&self) -> &'static str {
        "Consolidate Cloud Storage"
    }

    fn detect(&self, ctx: &AnalysisContext<'_>, rng: &mut dyn RngCore) -> Option<Recommendation> {
        let storage: Vec<&Subscription> = ctx
            .subscriptions
            .iter()
            .filter(|s| s.category == Category::Software && name_matches(s, &STORAGE_SERVICES))
            .collect();

        if storage.len() <= 1 {
            return None;
        }

        let potential_savings = savings_keeping_most_expensive(&storage);
        if potential_savings <= 0.0 {
            return None;
        }

        Some(Recommendation {
            id: self.kind(),
            title: "Consolidate Cloud Storage".to_string(),
            description: "You have multiple cloud storage services. Consider consolidating to \
                          save money."
                .to_string(),
            subscription_ids: ids_of(&storage),
            monthly_savings: potential_savings,
            confidence_score: jitter(0.75, rng),
            implementation_steps: vec![
                "Choose your preferred storage service".to_string(),
                "Transfer files from other services".to_string(),
                "Cancel redundant subscriptions".to_string(),
            ],
        })
    }
}

/// Suggests cancelling non-active subscriptions when spending runs more than
/// 10% over the monthly budget
pub struct BudgetAdjustmentDetector;

impl Detector for BudgetAdjustmentDetector {
    fn kind(&self) -> RecommendationKind {
        RecommendationKind::BudgetAdjustment
    }

    fn name(&self) -> &'static str {
        "Budget Reduction Plan"
    }

    fn detect(&self, ctx: &AnalysisContext<'_>, rng: &mut dyn RngCore) -> Option<Recommendation> {
        let budget = ctx.preferences.monthly_budget;
        if budget <= 0.0 {
            return None;
        }

        let current_total: f64 = ctx
            .subscriptions
            .iter()
            .filter(|s| s.status == SubscriptionStatus::Active)
            .map(|s| s.monthly_cost())
            .sum();

        if current_total <= budget * 1.1 {
            return None;
        }

        let over_budget_amount = current_total - budget;
        let mut candidates: Vec<&Subscription> = ctx
            .subscriptions
            .iter()
            .filter(|s| s.status != SubscriptionStatus::Active)
            .collect();
        candidates.sort_by(|a, b| {
            b.cost
                .partial_cmp(&a.cost)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let candidate_savings: f64 = candidates.iter().map(|s| s.monthly_cost()).sum();

        // Only worth suggesting when cancelling the lot actually clears the
        // overage. The savings figure stays the full candidate sum, not
        // clamped to the overage.
        if candidates.is_empty() || candidate_savings < over_budget_amount {
            return None;
        }

        Some(Recommendation {
            id: self.kind(),
            title: "Budget Reduction Plan".to_string(),
            description: "You're currently over budget. Consider cancelling these subscriptions \
                          to get back on track."
                .to_string(),
            subscription_ids: ids_of(&candidates),
            monthly_savings: candidate_savings,
            confidence_score: jitter(0.70, rng),
            implementation_steps: vec![
                "Cancel paused or inactive subscriptions first".to_string(),
                "Evaluate low-usage subscriptions".to_string(),
                "Consider family sharing options for some services".to_string(),
            ],
        })
    }
}
