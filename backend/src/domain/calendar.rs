//! Calendar domain logic for the subscription calendar.
//!
//! This module owns the displayed month, month navigation and the assembly of
//! the calendar grid from the day buckets computed by
//! [`subscription_calendar`](crate::domain::subscription_calendar). The UI only
//! draws what it receives: padding cells, logos, badges and tooltip rows are
//! all decided here.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{Datelike, Local, NaiveDate};
use shared::{
    CalendarDayType, DayTooltip, SubscriptionCalendarDay, SubscriptionCalendarMonth,
    TooltipCharge, TooltipRenewal,
};
use tracing::{debug, info};

use crate::domain::commands::calendar::SubscriptionCalendarQuery;
use crate::domain::formatting::{
    detect_currency, format_money, DEFAULT_CURRENCY, DOMINANT_CURRENCY_THRESHOLD, MULTI_CURRENCY,
};
use crate::domain::models::{Subscription, Transaction};
use crate::domain::subscription_calendar::{compute_buckets, CalendarBuckets, ChargeRecord};
use crate::domain::view_month::ViewMonth;
use crate::error::CalendarResult;

/// Logos drawn inside a day cell before the "+N" badge
pub const MAX_CELL_LOGOS: usize = 3;
/// Rows listed per section of a day tooltip before "+N more"
pub const MAX_TOOLTIP_ROWS: usize = 6;
pub const NO_HISTORY_MESSAGE: &str = "No charge history yet to estimate renewals.";

/// Last computed buckets together with the inputs they were computed from
struct BucketCacheEntry {
    subscriptions: Vec<Subscription>,
    transactions: Vec<Transaction>,
    view_month: ViewMonth,
    buckets: Arc<CalendarBuckets>,
}

impl BucketCacheEntry {
    fn matches(&self, subscriptions: &[Subscription], transactions: &[Transaction], view_month: ViewMonth) -> bool {
        self.view_month == view_month
            && self.subscriptions == subscriptions
            && self.transactions == transactions
    }
}

/// Calendar service that handles all calendar-related business logic
#[derive(Clone)]
pub struct CalendarService {
    /// Month currently displayed; kept in memory only
    current_focus_date: Arc<Mutex<ViewMonth>>,
    bucket_cache: Arc<Mutex<Option<BucketCacheEntry>>>,
    default_currency: String,
}

impl CalendarService {
    /// Create a new CalendarService focused on the current month
    pub fn new() -> Self {
        Self::with_currency(DEFAULT_CURRENCY)
    }

    /// Create a CalendarService formatting amounts in `currency` by default
    pub fn with_currency(currency: &str) -> Self {
        Self {
            current_focus_date: Arc::new(Mutex::new(ViewMonth::current())),
            bucket_cache: Arc::new(Mutex::new(None)),
            default_currency: currency.trim().to_uppercase(),
        }
    }

    pub fn default_currency(&self) -> &str {
        &self.default_currency
    }

    /// Get the current focus month for calendar navigation
    pub fn get_focus_date(&self) -> ViewMonth {
        *self.focus()
    }

    /// Set the focus month for calendar navigation
    pub fn set_focus_date(&self, month: u32, year: i32) -> CalendarResult<ViewMonth> {
        let new_focus = ViewMonth::new(year, month)?;
        *self.focus() = new_focus;
        info!("Calendar focus set to {}", new_focus);
        Ok(new_focus)
    }

    /// Navigate to the previous month
    pub fn navigate_previous_month(&self) -> ViewMonth {
        let mut focus = self.focus();
        *focus = focus.previous();
        *focus
    }

    /// Navigate to the next month
    pub fn navigate_next_month(&self) -> ViewMonth {
        let mut focus = self.focus();
        *focus = focus.next();
        *focus
    }

    /// Today's local date
    pub fn get_current_date(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    /// Day buckets for `view_month`, reusing the previous result when the
    /// inputs are unchanged.
    pub fn buckets_for(
        &self,
        subscriptions: &[Subscription],
        transactions: &[Transaction],
        view_month: ViewMonth,
    ) -> Arc<CalendarBuckets> {
        let mut cache = self.bucket_cache.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(entry) = cache.as_ref() {
            if entry.matches(subscriptions, transactions, view_month) {
                debug!("Reusing cached buckets for {}", view_month);
                return Arc::clone(&entry.buckets);
            }
        }

        let buckets = Arc::new(compute_buckets(subscriptions, transactions, view_month));
        *cache = Some(BucketCacheEntry {
            subscriptions: subscriptions.to_vec(),
            transactions: transactions.to_vec(),
            view_month,
            buckets: Arc::clone(&buckets),
        });
        buckets
    }

    /// Generate the calendar grid for a month with predicted renewals and
    /// actual charges
    pub fn generate_subscription_calendar(
        &self,
        query: SubscriptionCalendarQuery,
    ) -> SubscriptionCalendarMonth {
        let view_month = query.view_month.unwrap_or_else(|| self.get_focus_date());
        let currency = self.resolve_currency(query.currency.as_deref(), &query.transactions);

        info!(
            "🗓️ Generating subscription calendar for {} ({} subscriptions, {} transactions)",
            view_month,
            query.subscriptions.len(),
            query.transactions.len()
        );

        let buckets = self.buckets_for(&query.subscriptions, &query.transactions, view_month);
        let first_day_offset = view_month.first_day_offset();
        let days_in_month = view_month.days_in_month();

        let mut days = Vec::with_capacity((first_day_offset + days_in_month) as usize);
        for _ in 0..first_day_offset {
            days.push(padding_day());
        }

        for day in 1..=days_in_month {
            let (predicted, charged) = match buckets.day(day) {
                Some(bucket) => (bucket.predicted.as_slice(), bucket.charged.as_slice()),
                None => (&[][..], &[][..]),
            };
            let is_today = view_month.contains(query.today) && query.today.day() == day;
            days.push(month_day(view_month, day, predicted, charged, is_today, &currency));
        }

        let has_history = !query.transactions.is_empty();
        let monthly_spend: f64 = query.subscriptions.iter().map(|s| s.amount).sum();

        debug!(
            "Calendar for {} has {} cells, {} predicted renewals, {} charges",
            view_month,
            days.len(),
            buckets.predicted_count(),
            buckets.charged_count()
        );

        SubscriptionCalendarMonth {
            month: view_month.month(),
            year: view_month.year(),
            month_name: view_month.month_name().to_string(),
            days_in_month,
            first_day_offset,
            days,
            has_history,
            no_history_message: (!has_history).then(|| NO_HISTORY_MESSAGE.to_string()),
            monthly_spend_display: format_money(monthly_spend, &currency),
            monthly_spend,
            currency,
        }
    }

    /// Currency for formatted amounts: the requested one, else the dominant
    /// currency of the charge history, else the service default
    pub fn resolve_currency(&self, requested: Option<&str>, transactions: &[Transaction]) -> String {
        if let Some(code) = requested.map(str::trim).filter(|c| !c.is_empty()) {
            return code.to_uppercase();
        }

        let detected = detect_currency(
            transactions.iter().map(|t| t.currency.as_deref()),
            &self.default_currency,
            DOMINANT_CURRENCY_THRESHOLD,
        );
        if detected == MULTI_CURRENCY {
            debug!("Charge history mixes currencies, using {}", self.default_currency);
            self.default_currency.clone()
        } else {
            detected
        }
    }

    fn focus(&self) -> MutexGuard<'_, ViewMonth> {
        self.current_focus_date
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CalendarService {
    fn default() -> Self {
        Self::new()
    }
}

fn padding_day() -> SubscriptionCalendarDay {
    SubscriptionCalendarDay {
        day: 0,
        day_type: CalendarDayType::PaddingBefore,
        is_today: false,
        has_predicted: false,
        has_charged: false,
        predicted: Vec::new(),
        charged: Vec::new(),
        logo_subscriptions: Vec::new(),
        logo_initials: Vec::new(),
        logo_overflow: 0,
        tooltip: None,
    }
}

fn month_day(
    view_month: ViewMonth,
    day: u32,
    predicted: &[Subscription],
    charged: &[ChargeRecord],
    is_today: bool,
    currency: &str,
) -> SubscriptionCalendarDay {
    let predicted_dtos: Vec<shared::Subscription> = predicted.iter().map(subscription_dto).collect();
    let logo_subscriptions: Vec<shared::Subscription> =
        predicted_dtos.iter().take(MAX_CELL_LOGOS).cloned().collect();

    SubscriptionCalendarDay {
        day,
        day_type: CalendarDayType::MonthDay,
        is_today,
        has_predicted: !predicted.is_empty(),
        has_charged: !charged.is_empty(),
        logo_overflow: predicted.len().saturating_sub(logo_subscriptions.len()),
        logo_subscriptions,
        logo_initials: predicted.iter().take(MAX_CELL_LOGOS).map(Subscription::logo_initial).collect(),
        predicted: predicted_dtos,
        charged: charged.iter().map(charge_dto).collect(),
        tooltip: day_tooltip(view_month, day, predicted, charged, currency),
    }
}

fn day_tooltip(
    view_month: ViewMonth,
    day: u32,
    predicted: &[Subscription],
    charged: &[ChargeRecord],
    currency: &str,
) -> Option<DayTooltip> {
    if predicted.is_empty() && charged.is_empty() {
        return None;
    }

    let status_label = if charged.is_empty() { "Renews" } else { "Charged" };

    Some(DayTooltip {
        title: format!("{} {}", view_month.month_name(), day),
        status_label: status_label.to_string(),
        predicted: predicted
            .iter()
            .take(MAX_TOOLTIP_ROWS)
            .map(|s| TooltipRenewal {
                id: s.id.clone(),
                name: s.name.clone(),
                category: s.category.clone(),
                amount_display: format_money(s.amount, currency),
                logo_initial: s.logo_initial(),
            })
            .collect(),
        predicted_more: predicted.len().saturating_sub(MAX_TOOLTIP_ROWS),
        charged: charged
            .iter()
            .take(MAX_TOOLTIP_ROWS)
            .map(|c| TooltipCharge {
                merchant_key: c.merchant_key.clone(),
                display_name: c.display_name.clone(),
                amount_display: format_money(c.amount, currency),
            })
            .collect(),
        charged_more: charged.len().saturating_sub(MAX_TOOLTIP_ROWS),
    })
}

fn subscription_dto(subscription: &Subscription) -> shared::Subscription {
    shared::Subscription {
        id: subscription.id.clone(),
        name: subscription.name.clone(),
        category: subscription.category.clone(),
        amount: serde_json::Value::from(subscription.amount),
        logo: subscription.logo.clone(),
    }
}

fn charge_dto(charge: &ChargeRecord) -> shared::ChargeRecord {
    shared::ChargeRecord {
        merchant_key: charge.merchant_key.clone(),
        display_name: charge.display_name.clone(),
        amount: charge.amount,
    }
}
