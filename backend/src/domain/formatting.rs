//! Money formatting and statement currency detection.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

pub const DEFAULT_CURRENCY: &str = "MYR";
pub const MULTI_CURRENCY: &str = "MULTI";
pub const DOMINANT_CURRENCY_THRESHOLD: f64 = 0.9;

/// Format money as "MYR 5,659.68": currency code, a space, thousands
/// separators and two decimals.
///
/// Cents are rounded half to even on the decimal text of the amount, so
/// 2.675 shows as 2.68 whatever its binary expansion is.
pub fn format_money(amount: f64, currency: &str) -> String {
    let currency = normalize_currency(currency).unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
    let value = to_decimal(amount).round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);

    let digits = format!("{:.2}", value.abs());
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
    let sign = if value.is_sign_negative() && !value.is_zero() { "-" } else { "" };

    format!("{} {}{}.{}", currency, sign, group_thousands(int_part), frac_part)
}

/// Pick the currency of a statement from the currencies of its lines.
///
/// Returns `default` when no line carries a currency, the dominant code when
/// its share reaches `dominant_threshold`, and "MULTI" otherwise.
pub fn detect_currency<I, S>(currencies: I, default: &str, dominant_threshold: f64) -> String
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    // first-seen order breaks ties
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut total = 0usize;

    for code in currencies.into_iter().flatten() {
        let Some(code) = normalize_currency(code.as_ref()) else {
            continue;
        };
        total += 1;
        match counts.iter_mut().find(|(c, _)| *c == code) {
            Some((_, count)) => *count += 1,
            None => counts.push((code, 1)),
        }
    }

    let mut dominant: Option<&(String, usize)> = None;
    for entry in &counts {
        if dominant.map_or(true, |(_, best)| entry.1 > *best) {
            dominant = Some(entry);
        }
    }

    match dominant {
        None => normalize_currency(default).unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        Some((code, count)) => {
            let share = *count as f64 / total.max(1) as f64;
            if share >= dominant_threshold {
                code.clone()
            } else {
                MULTI_CURRENCY.to_string()
            }
        }
    }
}

/// Decimal value of the shortest text that round-trips `amount`; anything
/// out of range becomes zero
fn to_decimal(amount: f64) -> Decimal {
    if !amount.is_finite() {
        return Decimal::ZERO;
    }
    Decimal::from_str(&amount.to_string()).unwrap_or(Decimal::ZERO)
}

fn normalize_currency(code: &str) -> Option<String> {
    let code = code.trim();
    if code.is_empty() {
        None
    } else {
        Some(code.to_uppercase())
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
