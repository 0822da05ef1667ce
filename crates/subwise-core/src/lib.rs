//! Subwise Core Library
//!
//! Shared functionality for the Subwise subscription tracker:
//! - Domain model (subscriptions, billing cycles, payment history, budgets)
//! - Unused-likelihood scoring engine
//! - Savings recommendation detectors
//! - Monthly summary narrator
//!
//! The library is a pure analysis surface: persistence, notification
//! scheduling, and presentation all live in the host application, which
//! feeds snapshots in and consumes results.

pub mod analysis;
pub mod error;
pub mod models;

pub use analysis::{
    AnalysisContext, AnalysisEngine, Detector, Recommendation, RecommendationKind,
};
pub use error::{Error, Result};
pub use models::{
    BillingCycle, BudgetPreferences, Category, FamilyMember, PaymentRecord, Subscription,
    SubscriptionStatus,
};
