//! Display formatting for amounts and dates.
use chrono::NaiveDate;

pub const CURRENCY_SYMBOL: &str = "₹";

/// Thousands-grouped number with at most three fraction digits: `12,500`, `1,234.5`.
#[must_use]
pub fn fmt_amount(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }
    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    let is_zero = int_part.bytes().all(|b| b == b'0') && frac_part.is_empty();
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }
    for (idx, digit) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Rupee amount, e.g. `₹12,500`.
#[must_use]
pub fn fmt_currency(value: f64) -> String {
    format!("{CURRENCY_SYMBOL}{}", fmt_amount(value))
}

/// Whole-unit rupee amount.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn fmt_cost(cost: i64) -> String {
    fmt_currency(cost as f64)
}

/// Long date, e.g. `18 October 2026`.
#[must_use]
pub fn fmt_long_date(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}
