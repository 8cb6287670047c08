//! Lenient parsers for the free-text price and possession fields.
//!
//! Neither parser fails: unparseable input degrades to `0.0` or `None`.

use chrono::{Local, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

const LAKH: f64 = 100_000.0;
const CRORE: f64 = 10_000_000.0;

static RE_PRICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([\d.]+)\s*([LC])").expect("invalid regex: price"));

static RE_MONTH_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z]+)[,\s]+(\d{4})").expect("invalid regex: month and year"));

/// Convert a price string ("85.5 L", "1.2 Cr") to rupees
pub fn parse_price(price_text: &str) -> f64 {
    if price_text.is_empty() {
        return 0.0;
    }

    RE_PRICE
        .captures(price_text)
        .and_then(|caps| {
            let value = caps.get(1)?.as_str().parse::<f64>().ok()?;
            match caps.get(2)?.as_str() {
                "L" => Some(value * LAKH),
                "C" => Some(value * CRORE),
                _ => None,
            }
        })
        .unwrap_or(0.0)
}

/// Parse a possession string against the current local time
pub fn parse_possession(possession_text: &str) -> Option<NaiveDateTime> {
    parse_possession_at(possession_text, Local::now().naive_local())
}

/// Parse a possession string ("Dec, 2025", "Ready to Move") to a date.
///
/// "Ready to move" resolves to `now`; a month name plus a four digit year
/// resolves to the first of that month. Unknown month names fall back to
/// January.
pub fn parse_possession_at(possession_text: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let text = possession_text.trim();
    if text.is_empty() || text == crate::models::NOT_AVAILABLE {
        return None;
    }

    if text.to_lowercase().contains("ready to move") {
        return Some(now);
    }

    let caps = RE_MONTH_YEAR.captures(text)?;
    let year = caps.get(2)?.as_str().parse::<i32>().ok()?;
    let month = month_number(caps.get(1)?.as_str()).unwrap_or(1);

    NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)
}

fn month_number(name: &str) -> Option<u32> {
    let month = match name {
        "Jan" | "January" => 1,
        "Feb" | "February" => 2,
        "Mar" | "March" => 3,
        "Apr" | "April" => 4,
        "May" => 5,
        "Jun" | "June" => 6,
        "Jul" | "July" => 7,
        "Aug" | "August" => 8,
        "Sep" | "September" => 9,
        "Oct" | "October" => 10,
        "Nov" | "November" => 11,
        "Dec" | "December" => 12,
        _ => return None,
    };
    Some(month)
}
