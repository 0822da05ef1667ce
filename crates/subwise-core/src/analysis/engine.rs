//! Analysis engine - orchestrates scoring, detection, and narration

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDate, Utc};
use rand::RngCore;

use crate::models::{BudgetPreferences, Subscription};
use crate::Result;

use super::detectors::{
    AnnualConversionDetector, BudgetAdjustmentDetector, MusicConsolidationDetector,
    StorageConsolidationDetector, StreamingRotationDetector,
};
use super::scoring;
use super::summary;
use super::types::{Recommendation, RecommendationKind};

/// Read-only snapshot handed to savings detectors
pub struct AnalysisContext<'a> {
    /// Every subscription in the user's account, regardless of status
    pub subscriptions: &'a [Subscription],
    /// Budget preferences; a zero budget disables budget-aware detectors
    pub preferences: &'a BudgetPreferences,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(subscriptions: &'a [Subscription], preferences: &'a BudgetPreferences) -> Self {
        Self {
            subscriptions,
            preferences,
        }
    }
}

/// Trait for savings detectors
///
/// Each detector inspects the snapshot for one savings pattern and emits at
/// most one recommendation. Detectors are independent; they never see each
/// other's output.
pub trait Detector: Send + Sync {
    /// Stable slug identifying this detector's recommendations
    fn kind(&self) -> RecommendationKind;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Inspect the snapshot and emit a recommendation if the pattern applies
    fn detect(&self, ctx: &AnalysisContext<'_>, rng: &mut dyn RngCore) -> Option<Recommendation>;
}

/// The analysis engine: likely-unused scoring, savings recommendations, and
/// the monthly summary.
///
/// Construction is infallible and the engine holds no mutable state, so a
/// constructed engine is always ready; hosts may run the three operations
/// concurrently against the same snapshot.
pub struct AnalysisEngine {
    detectors: Vec<Box<dyn Detector>>,
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisEngine {
    /// Create an engine with the built-in detectors registered
    pub fn new() -> Self {
        let mut engine = Self { detectors: vec![] };

        engine.register(Box::new(StreamingRotationDetector));
        engine.register(Box::new(AnnualConversionDetector));
        engine.register(Box::new(MusicConsolidationDetector));
        engine.register(Box::new(StorageConsolidationDetector));
        engine.register(Box::new(BudgetAdjustmentDetector));

        engine
    }

    /// Register a savings detector
    pub fn register(&mut self, detector: Box<dyn Detector>) {
        self.detectors.push(detector);
    }

    /// Kinds of the registered detectors
    pub fn detector_kinds(&self) -> Vec<RecommendationKind> {
        self.detectors.iter().map(|d| d.kind()).collect()
    }

    /// Score each subscription's likelihood of being unused, keyed by store
    /// id. Unsaved and malformed records are skipped.
    pub fn score_unused_likelihood(
        &self,
        subscriptions: &[Subscription],
        now: DateTime<Utc>,
        rng: &mut dyn RngCore,
    ) -> Result<HashMap<String, f64>> {
        let scores = scoring::score_batch(subscriptions, now, rng);
        tracing::debug!(
            total = subscriptions.len(),
            scored = scores.len(),
            "Unused-likelihood scoring complete"
        );
        Ok(scores)
    }

    /// Run every detector against the snapshot and return the merged
    /// recommendations, sorted descending by monthly savings.
    pub fn generate_recommendations(
        &self,
        subscriptions: &[Subscription],
        preferences: &BudgetPreferences,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Recommendation>> {
        let ctx = AnalysisContext::new(subscriptions, preferences);
        let mut recommendations = vec![];

        for detector in &self.detectors {
            match detector.detect(&ctx, rng) {
                Some(recommendation) => {
                    tracing::debug!(
                        detector = detector.kind().as_str(),
                        savings = recommendation.monthly_savings,
                        "Detector emitted a recommendation"
                    );
                    recommendations.push(recommendation);
                }
                None => {
                    tracing::debug!(detector = detector.kind().as_str(), "Detector quiet");
                }
            }
        }

        recommendations.sort_by(|a, b| {
            b.monthly_savings
                .partial_cmp(&a.monthly_savings)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(recommendations)
    }

    /// Compose the natural-language monthly spending summary
    pub fn generate_monthly_summary(
        &self,
        subscriptions: &[Subscription],
        spend_history: &BTreeMap<NaiveDate, f64>,
        preferences: &BudgetPreferences,
    ) -> Result<String> {
        Ok(summary::compose_monthly_summary(
            subscriptions,
            spend_history,
            preferences,
        ))
    }
}
