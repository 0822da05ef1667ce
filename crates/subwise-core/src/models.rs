//! Domain model for Subwise
//!
//! Value types shared across the analysis engine: subscriptions, billing
//! cycles, payment history, and per-user budget preferences. Everything here
//! is caller-owned snapshot data; the engine only ever reads it.
//!
//! Serde field names are camelCase to match the document-store records the
//! host application syncs (`billingCycle`, `lastPaymentDate`, ...), so a raw
//! store snapshot deserializes directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Spending category of a subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Entertainment,
    Utilities,
    Software,
    Health,
    Education,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Entertainment,
        Category::Utilities,
        Category::Software,
        Category::Health,
        Category::Education,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Entertainment => "entertainment",
            Category::Utilities => "utilities",
            Category::Software => "software",
            Category::Health => "health",
            Category::Education => "education",
            Category::Other => "other",
        }
    }

    /// Capitalized name for user-facing text
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Entertainment => "Entertainment",
            Category::Utilities => "Utilities",
            Category::Software => "Software",
            Category::Health => "Health",
            Category::Education => "Education",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "entertainment" => Ok(Category::Entertainment),
            "utilities" => Ok(Category::Utilities),
            "software" => Ok(Category::Software),
            "health" => Ok(Category::Health),
            "education" => Ok(Category::Education),
            "other" => Ok(Category::Other),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

/// How often a subscription bills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BillingCycle {
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
    Custom,
}

impl BillingCycle {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingCycle::Monthly => "monthly",
            BillingCycle::Quarterly => "quarterly",
            BillingCycle::SemiAnnual => "semiAnnual",
            BillingCycle::Annual => "annual",
            BillingCycle::Custom => "custom",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BillingCycle::Monthly => "Monthly",
            BillingCycle::Quarterly => "Quarterly",
            BillingCycle::SemiAnnual => "Semi-Annual",
            BillingCycle::Annual => "Annual",
            BillingCycle::Custom => "Custom",
        }
    }

    /// Multiplier converting a raw per-cycle cost to an equivalent monthly
    /// cost. Custom cycles are treated as monthly.
    pub fn monthly_factor(&self) -> f64 {
        match self {
            BillingCycle::Monthly => 1.0,
            BillingCycle::Quarterly => 1.0 / 3.0,
            BillingCycle::SemiAnnual => 1.0 / 6.0,
            BillingCycle::Annual => 1.0 / 12.0,
            BillingCycle::Custom => 1.0,
        }
    }
}

impl fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BillingCycle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "monthly" => Ok(BillingCycle::Monthly),
            "quarterly" => Ok(BillingCycle::Quarterly),
            "semiAnnual" => Ok(BillingCycle::SemiAnnual),
            "annual" => Ok(BillingCycle::Annual),
            "custom" => Ok(BillingCycle::Custom),
            _ => Err(format!("Unknown billing cycle: {}", s)),
        }
    }
}

/// Lifecycle status of a subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SubscriptionStatus {
    Active,
    Paused,
    Cancelled,
    Archived,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Paused => "paused",
            SubscriptionStatus::Cancelled => "cancelled",
            SubscriptionStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SubscriptionStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "active" => Ok(SubscriptionStatus::Active),
            "paused" => Ok(SubscriptionStatus::Paused),
            "cancelled" => Ok(SubscriptionStatus::Cancelled),
            "archived" => Ok(SubscriptionStatus::Archived),
            _ => Err(format!("Unknown subscription status: {}", s)),
        }
    }
}

/// A family member a subscription can be assigned to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyMember {
    pub id: String,
    pub name: String,
    pub relationship: String,
}

/// A historical payment. Append-only per subscription; records are never
/// rewritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: String,
    pub date: DateTime<Utc>,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A recurring financial obligation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// Store-assigned document id; absent before the record is persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
    pub name: String,
    pub category: Category,
    /// Cost per billing cycle, in the subscription's native period
    pub cost: f64,
    pub billing_cycle: BillingCycle,
    pub next_billing_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_last_four_digits: Option<String>,
    pub status: SubscriptionStatus,
    #[serde(default)]
    pub logo_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub date_added: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_member: Option<FamilyMember>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_payment_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_history: Option<Vec<PaymentRecord>>,
}

impl Subscription {
    /// Cost normalized to a monthly equivalent
    pub fn monthly_cost(&self) -> f64 {
        self.cost * self.billing_cycle.monthly_factor()
    }

    /// Check the invariants a persisted record must satisfy.
    ///
    /// Batch analysis skips records that fail this rather than aborting the
    /// whole run; single-record callers get the typed error.
    pub fn validate(&self) -> Result<()> {
        if !self.cost.is_finite() {
            return Err(Error::InvalidData(format!(
                "subscription '{}' has non-finite cost",
                self.name
            )));
        }
        if self.cost < 0.0 {
            return Err(Error::InvalidData(format!(
                "subscription '{}' has negative cost {}",
                self.name, self.cost
            )));
        }
        Ok(())
    }
}

/// Per-user configuration synced from the document store.
///
/// Only `monthly_budget` feeds the analysis engine; the notification and
/// theme fields belong to the host UI and ride along untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
    pub monthly_budget: f64,
    pub yearly_budget: f64,
    pub enable_notifications: bool,
    pub notification_time: DateTime<Utc>,
    pub notify_days_before: i32,
    pub currency_code: String,
    pub theme_preference: String,
    pub created_at: DateTime<Utc>,
}

impl Default for BudgetPreferences {
    /// A zeroed budget disables all budget-dependent analysis.
    fn default() -> Self {
        Self {
            id: None,
            user_id: String::new(),
            monthly_budget: 0.0,
            yearly_budget: 0.0,
            enable_notifications: false,
            notification_time: DateTime::<Utc>::UNIX_EPOCH,
            notify_days_before: 3,
            currency_code: "USD".to_string(),
            theme_preference: "system".to_string(),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

/// Parse a document-store subscription snapshot (a JSON array)
pub fn subscriptions_from_json(json: &str) -> Result<Vec<Subscription>> {
    let subscriptions: Vec<Subscription> = serde_json::from_str(json)?;
    Ok(subscriptions)
}
