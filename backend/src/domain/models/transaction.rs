//! Domain model for a historical charge.
use chrono::{Datelike, NaiveDate};
use serde_json::Value;

/// Merchant key and display name used when a transaction names no merchant
pub const UNKNOWN_MERCHANT: &str = "Unknown";

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: Option<String>,
    /// Raw date string as supplied, kept for diagnostics
    pub raw_date: String,
    /// Parsed calendar date, `None` when the supplied string was malformed
    pub date: Option<NaiveDate>,
    /// Day of month precomputed by the supplier
    pub day_of_month: Option<u32>,
    pub merchant_name: Option<String>,
    pub subscription_merchant_key: Option<String>,
    pub subscription_name: Option<String>,
    pub amount: f64,
    pub currency: Option<String>,
}

impl Transaction {
    /// Key linking this charge to a subscription: the explicit linkage,
    /// else the merchant name, else "Unknown"
    pub fn merchant_key(&self) -> &str {
        self.subscription_merchant_key
            .as_deref()
            .or(self.merchant_name.as_deref())
            .unwrap_or(UNKNOWN_MERCHANT)
    }

    /// Name shown for this charge: the linked subscription name, else the
    /// merchant name, else "Unknown"
    pub fn display_name(&self) -> &str {
        self.subscription_name
            .as_deref()
            .or(self.merchant_name.as_deref())
            .unwrap_or(UNKNOWN_MERCHANT)
    }

    /// Day of month this charge suggests for the next renewal.
    ///
    /// Uses the supplied day when present and non-zero, falling back to the
    /// day of the parsed date.
    pub fn renewal_day(&self) -> Option<u32> {
        self.day_of_month
            .filter(|day| *day > 0)
            .or_else(|| self.date.map(|d| d.day()))
    }
}

/// Parse a date-only "YYYY-MM-DD" string. A trailing time component
/// ("T09:00:00Z") is ignored.
pub fn parse_date_only(date_str: &str) -> Option<NaiveDate> {
    let date_part = date_str.trim().split('T').next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Coerce a raw JSON amount to a number. Missing, null, non-numeric and
/// non-finite values become 0.0.
pub fn coerce_amount(value: &Value) -> f64 {
    let amount = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };

    if amount.is_finite() {
        amount
    } else {
        0.0
    }
}
