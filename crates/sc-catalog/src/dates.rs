//! Timestamp parsing and display helpers for record date fields.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta};

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse an API timestamp. Accepts RFC 3339, naive ISO date-times (with or
/// without fractional seconds, `T` or space separated) and bare dates.
/// Offsets are normalized to UTC.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }
    parse_date(value).and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Parse a calendar date, either bare (`2024-01-31`) or the date part of a
/// timestamp.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if value.len() > 10
        && value.is_char_boundary(10)
        && let Ok(date) = NaiveDate::parse_from_str(&value[..10], "%Y-%m-%d")
    {
        return Some(date);
    }
    None
}

/// `YYYY-MM-DD HH:MM:SS`, or `None` when the value does not parse.
pub fn format_timestamp(value: &str) -> Option<String> {
    parse_timestamp(value).map(|dt| dt.format(DISPLAY_FORMAT).to_string())
}

/// Human-readable span between two timestamps in the largest whole unit
/// (years of 365 days, months of 30 days, days, hours, minutes).
///
/// Returns `None` if either side fails to parse or the end precedes the start.
pub fn describe_duration(start: &str, end: &str) -> Option<String> {
    let start = parse_timestamp(start)?;
    let end = parse_timestamp(end)?;
    let span = end.signed_duration_since(start);
    if span < TimeDelta::zero() {
        return None;
    }
    Some(describe_span(span))
}

fn describe_span(span: TimeDelta) -> String {
    let days = span.num_days();
    if days >= 365 {
        return plural(days / 365, "year");
    }
    if days >= 30 {
        return plural(days / 30, "month");
    }
    if days >= 1 {
        return plural(days, "day");
    }
    let hours = span.num_hours();
    if hours >= 1 {
        return plural(hours, "hour");
    }
    plural(span.num_minutes(), "minute")
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("{} {}", count, unit)
    } else {
        format!("{} {}s", count, unit)
    }
}
