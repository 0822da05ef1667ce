//! Analysis engine - subscription scoring, savings recommendations, and
//! monthly narration
//!
//! Three pure operations over a caller-supplied snapshot:
//!
//! - **Unused-likelihood scoring** - per-subscription score in [0.0, 0.95]
//!   estimating how cancellable a subscription looks
//! - **Savings recommendations** - five independent detectors, merged and
//!   ranked by monthly savings
//! - **Monthly summary** - natural-language spending narrative
//!
//! Nothing here touches the network, the store, or the clock beyond the
//! timestamp the caller passes in; randomness is injected so results can be
//! reproduced under a seeded generator.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use subwise_core::analysis::AnalysisEngine;
//!
//! let engine = AnalysisEngine::new();
//! let recs = engine.generate_recommendations(&subscriptions, &prefs, &mut rng)?;
//! ```

pub mod detectors;
pub mod engine;
pub mod scoring;
pub mod summary;
pub mod types;

pub use detectors::{
    AnnualConversionDetector, BudgetAdjustmentDetector, MusicConsolidationDetector,
    StorageConsolidationDetector, StreamingRotationDetector,
};
pub use engine::{AnalysisContext, AnalysisEngine, Detector};
pub use scoring::score_unused_likelihood;
pub use summary::compose_monthly_summary;
pub use types::{Recommendation, RecommendationKind};
