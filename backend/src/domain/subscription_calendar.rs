//! Day bucketing for the subscription calendar.
//!
//! Given the tracked subscriptions, the charge history and a displayed month,
//! computes for every day of that month which subscriptions are predicted to
//! renew and which charges actually happened. Everything here is a pure
//! function of its inputs; caching lives in [`CalendarService`].
//!
//! Predictions use the most recent day of month each merchant was charged on.
//! History is re-ordered by date (most recent first) before it is scanned, so
//! a wrongly ordered history cannot make an older charge win.
//!
//! [`CalendarService`]: crate::domain::calendar::CalendarService

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;
use tracing::{debug, warn};

use crate::domain::models::{Subscription, Transaction};
use crate::domain::view_month::ViewMonth;

/// An actual charge placed on a calendar day
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeRecord {
    pub merchant_key: String,
    pub display_name: String,
    pub amount: f64,
}

/// Predicted renewals and actual charges for a single day
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayBucket {
    pub predicted: Vec<Subscription>,
    pub charged: Vec<ChargeRecord>,
}

impl DayBucket {
    pub fn is_empty(&self) -> bool {
        self.predicted.is_empty() && self.charged.is_empty()
    }
}

/// Day buckets for one displayed month, keyed by day of month
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarBuckets {
    view_month: ViewMonth,
    buckets: BTreeMap<u32, DayBucket>,
}

impl CalendarBuckets {
    pub fn view_month(&self) -> ViewMonth {
        self.view_month
    }

    /// Bucket for a day, `None` when nothing renews or was charged that day
    pub fn day(&self, day: u32) -> Option<&DayBucket> {
        self.buckets.get(&day)
    }

    /// Non-empty buckets in day order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &DayBucket)> {
        self.buckets.iter().map(|(day, bucket)| (*day, bucket))
    }

    pub fn predicted_count(&self) -> usize {
        self.buckets.values().map(|b| b.predicted.len()).sum()
    }

    pub fn charged_count(&self) -> usize {
        self.buckets.values().map(|b| b.charged.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Compute the day buckets of `view_month`.
pub fn compute_buckets(
    subscriptions: &[Subscription],
    transactions: &[Transaction],
    view_month: ViewMonth,
) -> CalendarBuckets {
    let renewal_days = latest_renewal_days(transactions);
    let mut buckets: BTreeMap<u32, DayBucket> = BTreeMap::new();

    // predicted renewals
    for subscription in subscriptions {
        let Some(&latest_day) = renewal_days.get(subscription.id.as_str()) else {
            continue;
        };
        let day = view_month.clamp_day(latest_day);
        buckets
            .entry(day)
            .or_default()
            .predicted
            .push(subscription.clone());
    }

    // actual charges in the displayed month
    for transaction in transactions {
        let Some(date) = transaction.date else {
            continue;
        };
        if !view_month.contains(date) {
            continue;
        }
        let day = view_month.clamp_day(date.day());
        buckets.entry(day).or_default().charged.push(ChargeRecord {
            merchant_key: transaction.merchant_key().to_string(),
            display_name: transaction.display_name().to_string(),
            amount: transaction.amount,
        });
    }

    for bucket in buckets.values_mut() {
        bucket.predicted.sort_by(|a, b| collate_names(&a.name, &b.name));
        bucket
            .charged
            .sort_by(|a, b| collate_names(&a.display_name, &b.display_name));
    }

    let calendar = CalendarBuckets {
        view_month,
        buckets,
    };
    debug!(
        "Computed buckets for {}: {} predicted, {} charged",
        view_month,
        calendar.predicted_count(),
        calendar.charged_count()
    );
    calendar
}

/// Most recent renewal day of month per merchant key, across all history.
pub fn latest_renewal_days(transactions: &[Transaction]) -> HashMap<&str, u32> {
    let mut renewal_days: HashMap<&str, u32> = HashMap::new();

    for transaction in order_by_recency(transactions) {
        let Some(day) = transaction.renewal_day() else {
            continue;
        };
        renewal_days.entry(transaction.merchant_key()).or_insert(day);
    }

    renewal_days
}

/// Transactions ordered most recent first.
///
/// The sort is stable, so transactions on the same date keep their supplied
/// order. Transactions with an unparseable date come last.
pub fn order_by_recency(transactions: &[Transaction]) -> Vec<&Transaction> {
    let mut ordered: Vec<&Transaction> = transactions.iter().collect();
    ordered.sort_by(|a, b| match (a.date, b.date) {
        (Some(date_a), Some(date_b)) => date_b.cmp(&date_a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    for transaction in ordered.iter().filter(|t| t.date.is_none()) {
        warn!(
            "Transaction {:?} for '{}' has an unparseable date '{}'",
            transaction.id,
            transaction.merchant_key(),
            transaction.raw_date
        );
    }

    ordered
}

/// Alphabetical name ordering: case-insensitive first, then the raw string
/// so that the order is total.
pub fn collate_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
