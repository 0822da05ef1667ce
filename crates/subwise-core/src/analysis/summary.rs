//! Monthly summary narrator
//!
//! Composes a multi-paragraph natural-language summary of the user's
//! subscription spending: current total, month-over-month movement, budget
//! utilization, top category, and the single most expensive subscription.
//! Every clause is conditional; the output is the concatenation of whichever
//! ones apply, trimmed.
//!
//! Deterministic for a given input. Dollar figures print with two decimals;
//! the month-over-month delta prints with one decimal and all other
//! percentages with none, matching the shipped app.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{BudgetPreferences, Category, Subscription, SubscriptionStatus};

/// Compose the monthly spending summary.
///
/// `spend_history` maps month markers (any date within the month works) to
/// that month's total spend; the month-over-month clause compares the
/// current total against the second-most-recent entry and only appears when
/// the history has at least two entries.
pub fn compose_monthly_summary(
    subscriptions: &[Subscription],
    spend_history: &BTreeMap<NaiveDate, f64>,
    preferences: &BudgetPreferences,
) -> String {
    // An empty sum is -0.0, which would print as "$-0.00"; adding positive
    // zero normalizes the sign without changing any real total.
    let current_month_spend: f64 = subscriptions
        .iter()
        .filter(|s| s.status == SubscriptionStatus::Active)
        .map(|s| s.monthly_cost())
        .sum::<f64>()
        + 0.0;

    let month_over_month = month_over_month_clause(current_month_spend, spend_history);
    let budget_analysis = budget_clause(current_month_spend, preferences);
    let category_insight = category_clause(subscriptions, current_month_spend);
    let subscription_insight = subscription_clause(subscriptions, current_month_spend);

    format!(
        "You're currently spending ${:.2} per month on {} subscriptions. {}\n\n{}\n\n{}\n\n{}",
        current_month_spend,
        subscriptions.len(),
        month_over_month,
        budget_analysis,
        category_insight,
        subscription_insight,
    )
    .trim()
    .to_string()
}

fn month_over_month_clause(
    current_month_spend: f64,
    spend_history: &BTreeMap<NaiveDate, f64>,
) -> String {
    if spend_history.len() < 2 {
        return String::new();
    }

    // Second-most-recent entry in key order is "last month"
    let previous_month_spend = spend_history
        .values()
        .nth(spend_history.len() - 2)
        .copied()
        .unwrap_or(0.0);

    let change_amount = current_month_spend - previous_month_spend;
    let change_percent = if previous_month_spend > 0.0 {
        (change_amount / previous_month_spend) * 100.0
    } else {
        0.0
    };

    if change_percent.abs() < 1.0 {
        "Your spending is about the same as last month. ".to_string()
    } else if change_amount > 0.0 {
        format!(
            "Your spending increased by {:.1}% from last month. ",
            change_percent.abs()
        )
    } else {
        format!(
            "Your spending decreased by {:.1}% from last month. ",
            change_percent.abs()
        )
    }
}

fn budget_clause(current_month_spend: f64, preferences: &BudgetPreferences) -> String {
    if preferences.monthly_budget <= 0.0 {
        return String::new();
    }

    let budget_percent = (current_month_spend / preferences.monthly_budget) * 100.0;

    if budget_percent > 100.0 {
        format!(
            "You're currently {:.0}% over your monthly budget. Consider pausing or canceling \
             less-used subscriptions. ",
            budget_percent - 100.0
        )
    } else if budget_percent > 90.0 {
        format!(
            "You're at {:.0}% of your monthly budget. You're close to your limit. ",
            budget_percent
        )
    } else if budget_percent > 75.0 {
        format!(
            "You're at {:.0}% of your monthly budget. You're in good shape. ",
            budget_percent
        )
    } else {
        format!(
            "You're only using {:.0}% of your monthly budget. Great job! ",
            budget_percent
        )
    }
}

fn category_clause(subscriptions: &[Subscription], current_month_spend: f64) -> String {
    // Active spend by category, scanned in a fixed order so ties break
    // deterministically
    let mut top: Option<(Category, f64)> = None;
    for category in Category::ALL {
        let spend: f64 = subscriptions
            .iter()
            .filter(|s| s.status == SubscriptionStatus::Active && s.category == category)
            .map(|s| s.monthly_cost())
            .sum();
        if spend > 0.0 && top.map_or(true, |(_, best)| spend > best) {
            top = Some((category, spend));
        }
    }

    let Some((top_category, top_spend)) = top else {
        return String::new();
    };

    let top_category_percent = if current_month_spend > 0.0 {
        (top_spend / current_month_spend) * 100.0
    } else {
        0.0
    };

    let mut insight = format!(
        "Your biggest spending category is {} at ${:.2}/month ({:.0}% of total). ",
        top_category.display_name(),
        top_spend,
        top_category_percent
    );

    match top_category {
        Category::Entertainment if top_category_percent > 50.0 => {
            insight.push_str("Consider if you're fully utilizing all your entertainment subscriptions. ");
        }
        Category::Software if top_category_percent > 40.0 => {
            insight.push_str("Look for bundled software options that might save you money. ");
        }
        _ => {}
    }

    insight
}

fn subscription_clause(subscriptions: &[Subscription], current_month_spend: f64) -> String {
    let most_expensive = subscriptions.iter().max_by(|a, b| {
        a.monthly_cost()
            .partial_cmp(&b.monthly_cost())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    match most_expensive {
        Some(sub) if sub.monthly_cost() > current_month_spend * 0.3 => format!(
            "{} is your most expensive subscription at ${:.2}/month. Make sure you're getting \
             value from it. ",
            sub.name,
            sub.monthly_cost()
        ),
        _ => String::new(),
    }
}
