//! Likely-unused scoring
//!
//! An additive point heuristic estimating how likely a subscription is to be
//! unused and therefore cancellable. Not a trained model: the weights are
//! fixed, and a small injected noise term keeps repeated runs from looking
//! artificially identical. Callers that need reproducible scores pass a
//! seeded generator.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rand::{Rng, RngCore};

use crate::models::{Category, Subscription, SubscriptionStatus};

/// Scores saturate here; the heuristic never claims certainty.
const SCORE_CEILING: f64 = 0.95;

/// Score one subscription's likelihood of being unused, in [0.0, 0.95].
///
/// The point components can sum past 1.0 (recency and the missing-record
/// bonus stack with cost and category); the final clamp absorbs the
/// overflow. That saturation matches the shipped behavior and is kept
/// as-is.
pub fn score_unused_likelihood(
    subscription: &Subscription,
    now: DateTime<Utc>,
    rng: &mut dyn RngCore,
) -> f64 {
    let mut score: f64 = 0.0;

    // Inactive subscriptions are likely not being used
    if subscription.status != SubscriptionStatus::Active {
        score += 0.4;
    }

    // Higher cost items have higher potential for review
    if subscription.cost > 30.0 {
        score += 0.2;
    } else if subscription.cost > 15.0 {
        score += 0.1;
    }

    // Entertainment subscriptions often have usage patterns
    if subscription.category == Category::Entertainment {
        score += 0.15;
    }

    match subscription.last_payment_date {
        Some(last_payment) => {
            let days_since_payment = (now - last_payment).num_days();
            if days_since_payment > 60 {
                score += 0.25;
            } else if days_since_payment > 30 {
                score += 0.15;
            }
        }
        // No payment record increases the score
        None => score += 0.2,
    }

    score += rng.gen_range(-0.1..=0.1);

    score.clamp(0.0, SCORE_CEILING)
}

/// Score a batch of subscriptions, keyed by store id.
///
/// Records without an id cannot be keyed and are skipped. Malformed records
/// (negative or non-finite cost) are skipped with a warning rather than
/// failing the batch, mirroring how the host tolerates bad persisted rows.
pub fn score_batch(
    subscriptions: &[Subscription],
    now: DateTime<Utc>,
    rng: &mut dyn RngCore,
) -> HashMap<String, f64> {
    let mut scores = HashMap::with_capacity(subscriptions.len());

    for subscription in subscriptions {
        if let Err(e) = subscription.validate() {
            tracing::warn!(
                name = subscription.name,
                error = %e,
                "Skipping malformed subscription record"
            );
            continue;
        }

        let Some(id) = subscription.id.as_ref() else {
            tracing::debug!(
                name = subscription.name,
                "Skipping unsaved subscription (no id to key the score by)"
            );
            continue;
        };

        scores.insert(id.clone(), score_unused_likelihood(subscription, now, rng));
    }

    scores
}
