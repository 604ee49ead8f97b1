use serde::{Deserialize, Serialize};

/// A recurring merchant charge tracked for the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    /// Identifier, matches the `subscription_merchant_key` of linked transactions
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    /// Recurring amount charged on each renewal; may be a number, a numeric
    /// string, null or missing
    #[serde(default)]
    pub amount: serde_json::Value,
    /// Logo image reference (URL or asset path)
    #[serde(default)]
    pub logo: String,
}

/// A single historical banking/card charge as supplied by the API collaborator.
///
/// The collaborator returns these sorted by `transaction_date` descending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankingTransaction {
    #[serde(default)]
    pub id: Option<String>,
    /// Date-only ISO string ("YYYY-MM-DD"); empty when the supplier sent none
    #[serde(default)]
    pub transaction_date: String,
    /// Day of month precomputed by the supplier
    #[serde(default)]
    pub transaction_day: Option<u32>,
    /// Raw amount; may be a number, a numeric string, null or missing
    #[serde(default)]
    pub amount: serde_json::Value,
    #[serde(default)]
    pub merchant_name: Option<String>,
    #[serde(default)]
    pub subscription_merchant_key: Option<String>,
    #[serde(default)]
    pub subscription_name: Option<String>,
    /// ISO currency code of the charge
    #[serde(default)]
    pub currency: Option<String>,
}

/// An actual charge shown on a calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeRecord {
    pub merchant_key: String,
    pub display_name: String,
    pub amount: f64,
}

/// Request for the subscription calendar of a month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionCalendarRequest {
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
    #[serde(default)]
    pub transactions: Vec<BankingTransaction>,
    /// Month to display (1-12); the current focus month is used when absent
    #[serde(default)]
    pub month: Option<u32>,
    #[serde(default)]
    pub year: Option<i32>,
    /// Currency code used for formatted amounts
    #[serde(default)]
    pub currency: Option<String>,
}

/// Type of calendar day for explicit rendering logic
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum CalendarDayType {
    /// Empty padding cell before the first day of the month
    PaddingBefore,
    /// Actual day within the month
    MonthDay,
}

/// A predicted renewal row inside a day tooltip
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TooltipRenewal {
    pub id: String,
    pub name: String,
    pub category: String,
    pub amount_display: String,
    /// Letter drawn when the logo image cannot be loaded
    pub logo_initial: String,
}

/// An actual charge row inside a day tooltip
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TooltipCharge {
    pub merchant_key: String,
    pub display_name: String,
    pub amount_display: String,
}

/// Tooltip content for a day with renewals or charges
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayTooltip {
    /// e.g. "February 29"
    pub title: String,
    /// "Charged" if anything was charged that day, otherwise "Renews"
    pub status_label: String,
    pub predicted: Vec<TooltipRenewal>,
    /// Number of predicted renewals not listed
    pub predicted_more: usize,
    pub charged: Vec<TooltipCharge>,
    /// Number of charges not listed
    pub charged_more: usize,
}

/// A single cell of the subscription calendar grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionCalendarDay {
    /// Day of month, 0 for padding cells
    pub day: u32,
    pub day_type: CalendarDayType,
    pub is_today: bool,
    pub has_predicted: bool,
    pub has_charged: bool,
    pub predicted: Vec<Subscription>,
    pub charged: Vec<ChargeRecord>,
    /// Predicted subscriptions whose logos are drawn in the cell
    pub logo_subscriptions: Vec<Subscription>,
    /// Fallback letters for `logo_subscriptions`, in the same order
    pub logo_initials: Vec<String>,
    /// Predicted subscriptions beyond the drawn logos ("+N" badge)
    pub logo_overflow: usize,
    pub tooltip: Option<DayTooltip>,
}

/// Subscription calendar for one displayed month
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionCalendarMonth {
    pub month: u32,
    pub year: i32,
    pub month_name: String,
    pub days_in_month: u32,
    /// Weekday of day 1 with Monday = 0 ... Sunday = 6
    pub first_day_offset: u32,
    pub days: Vec<SubscriptionCalendarDay>,
    pub has_history: bool,
    pub no_history_message: Option<String>,
    pub currency: String,
    pub monthly_spend: f64,
    pub monthly_spend_display: String,
}

impl SubscriptionCalendarMonth {
    /// Look up the cell for a day of the month
    pub fn day(&self, day: u32) -> Option<&SubscriptionCalendarDay> {
        self.days
            .iter()
            .find(|d| d.day_type == CalendarDayType::MonthDay && d.day == day)
    }
}

/// Represents the current focus date for calendar navigation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarFocusDate {
    pub month: u32,
    pub year: i32,
}

/// Request to update the calendar focus date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateCalendarFocusRequest {
    pub month: u32,
    pub year: i32,
}

/// Response after updating calendar focus date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateCalendarFocusResponse {
    pub focus_date: CalendarFocusDate,
    pub success_message: String,
}

/// Current date information from the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentDateResponse {
    pub month: u32,
    pub year: i32,
    pub day: u32,
    pub formatted_date: String, // e.g., "February 29, 2024"
    pub iso_date: String, // e.g., "2024-02-29"
}

/// Log line forwarded by the rendering layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogEntry {
    pub level: String,
    pub message: String,
    #[serde(default)]
    pub component: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogResponse {
    pub success: bool,
}
