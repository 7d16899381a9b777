//! Date helpers for post metadata.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Locale used when displaying dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateLocale {
    #[default]
    Ko,
    En,
}

/// Today's date in UTC as `YYYY-MM-DD`.
pub fn today() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Check the literal `YYYY-MM-DD` shape.
///
/// Only the shape is checked, so `2024-13-45` passes.
pub fn is_iso_date(s: &str) -> bool {
    static RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("Invalid date regex"));

    RE.is_match(s)
}

/// Parse a calendar date or an RFC 3339 timestamp.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

/// Format a date for display, returning the input unchanged if it does not parse.
pub fn format_date(s: &str, locale: DateLocale) -> String {
    let Some(date) = parse_date(s) else {
        return s.to_string();
    };

    match locale {
        DateLocale::Ko => date.format("%Y년 %-m월 %-d일").to_string(),
        DateLocale::En => date.format("%B %-d, %Y").to_string(),
    }
}
