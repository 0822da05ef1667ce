//! Core types for the analysis engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The savings pattern a recommendation came from.
///
/// Doubles as the recommendation's stable id slug: one recommendation at
/// most per kind per analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    /// Rotate streaming services instead of keeping all active
    StreamingRotation,
    /// Convert eligible monthly plans to annual billing
    AnnualConversion,
    /// Keep a single music streaming service
    ConsolidateMusic,
    /// Keep a single cloud storage service
    ConsolidateStorage,
    /// Cancel non-active subscriptions to get back under budget
    BudgetAdjustment,
}

impl RecommendationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationKind::StreamingRotation => "streaming_rotation",
            RecommendationKind::AnnualConversion => "annual_conversion",
            RecommendationKind::ConsolidateMusic => "consolidate_music",
            RecommendationKind::ConsolidateStorage => "consolidate_storage",
            RecommendationKind::BudgetAdjustment => "budget_adjustment",
        }
    }
}

impl fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecommendationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "streaming_rotation" => Ok(RecommendationKind::StreamingRotation),
            "annual_conversion" => Ok(RecommendationKind::AnnualConversion),
            "consolidate_music" => Ok(RecommendationKind::ConsolidateMusic),
            "consolidate_storage" => Ok(RecommendationKind::ConsolidateStorage),
            "budget_adjustment" => Ok(RecommendationKind::BudgetAdjustment),
            _ => Err(format!("Unknown recommendation kind: {}", s)),
        }
    }
}

/// A money-saving recommendation produced by one detector.
///
/// Produced fresh on every analysis run; never persisted by the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Stable slug identifying the detector that fired
    pub id: RecommendationKind,
    pub title: String,
    pub description: String,
    /// Ids of the subscriptions this recommendation touches. Records that
    /// were never persisted (no store id) are omitted.
    pub subscription_ids: Vec<String>,
    /// Estimated savings per month; always > 0 for an emitted recommendation
    pub monthly_savings: f64,
    /// Heuristic 0-1 trust value, not a calibrated probability
    pub confidence_score: f64,
    pub implementation_steps: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_slug_round_trip() {
        for kind in [
            RecommendationKind::StreamingRotation,
            RecommendationKind::AnnualConversion,
            RecommendationKind::ConsolidateMusic,
            RecommendationKind::ConsolidateStorage,
            RecommendationKind::BudgetAdjustment,
        ] {
            assert_eq!(RecommendationKind::from_str(kind.as_str()).unwrap(), kind);
        }
        assert!(RecommendationKind::from_str("coupon_clipping").is_err());
    }

    #[test]
    fn test_recommendation_serializes_slug_id() {
        let rec = Recommendation {
            id: RecommendationKind::StreamingRotation,
            title: "Streaming Service Rotation".to_string(),
            description: String::new(),
            subscription_ids: vec!["a".to_string()],
            monthly_savings: 15.98,
            confidence_score: 0.85,
            implementation_steps: vec![],
        };

        let value = serde_json::to_value(&rec).unwrap();
        assert_eq!(value["id"], "streaming_rotation");
        assert_eq!(value["monthlySavings"], 15.98);
    }
}
