//! Currency and date formatting for display entries.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateStyle {
    /// Numeric date with short time, e.g. `3/1/24, 9:30 AM`.
    Short,
    /// Spelled-out date with short time, e.g. `March 1, 2024 at 9:30 AM`.
    Long,
}

/// Locale-aware text formatting. Shells can supply their platform formatter;
/// [`LocaleFormatter`] is the built-in en-US rendition.
pub trait Formatter: Send + Sync {
    fn format_currency(&self, amount: f64, currency_code: &str) -> String;
    fn format_date(&self, date: DateTime<Utc>, style: DateStyle) -> String;
}

#[derive(Clone, Copy, Debug)]
pub struct LocaleFormatter {
    offset: FixedOffset,
}

impl Default for LocaleFormatter {
    fn default() -> Self {
        Self::utc()
    }
}

impl LocaleFormatter {
    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    /// Dates are rendered in the given zone.
    pub fn with_offset(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// `None` when the offset is a day or more away from UTC.
    pub fn from_utc_offset_minutes(minutes: i32) -> Option<Self> {
        FixedOffset::east_opt(minutes.checked_mul(60)?).map(Self::with_offset)
    }
}

impl Formatter for LocaleFormatter {
    fn format_currency(&self, amount: f64, currency_code: &str) -> String {
        if !amount.is_finite() {
            return format!("{currency_code} {amount}");
        }

        let code = currency_code.trim().to_ascii_uppercase();
        let digits = format!("{:.*}", minor_units(&code), amount.abs());
        let (whole, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (digits.as_str(), None),
        };

        let mut number = group_thousands(whole);
        if let Some(fraction) = fraction {
            number.push('.');
            number.push_str(fraction);
        }

        let negative =
            amount.is_sign_negative() && digits.bytes().any(|b| matches!(b, b'1'..=b'9'));
        let sign = if negative { "-" } else { "" };

        match symbol(&code) {
            Some(symbol) => format!("{sign}{symbol}{number}"),
            None => format!("{sign}{code}\u{a0}{number}"),
        }
    }

    fn format_date(&self, date: DateTime<Utc>, style: DateStyle) -> String {
        let local = date.with_timezone(&self.offset);
        match style {
            DateStyle::Short => local.format("%-m/%-d/%y, %-I:%M %p").to_string(),
            DateStyle::Long => local.format("%B %-d, %Y at %-I:%M %p").to_string(),
        }
    }
}

fn symbol(code: &str) -> Option<&'static str> {
    match code {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        "INR" => Some("₹"),
        "KRW" => Some("₩"),
        _ => None,
    }
}

fn minor_units(code: &str) -> usize {
    match code {
        "JPY" | "KRW" => 0,
        _ => 2,
    }
}

fn group_thousands(whole: &str) -> String {
    let len = whole.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
