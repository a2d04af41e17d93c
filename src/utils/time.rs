//! Timestamp formatting.

use chrono::{DateTime, Duration, Local, NaiveDateTime};

use crate::domain::ENTRY_TIMESTAMP_FORMAT;

/// `YYYY-MM-DD-HHMM`, the stamp written into entries.
pub fn entry_timestamp(t: NaiveDateTime) -> String {
    t.format(ENTRY_TIMESTAMP_FORMAT).to_string()
}

/// Parse an entry stamp such as `2026-01-15-0930`.
pub fn parse_entry_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), ENTRY_TIMESTAMP_FORMAT).ok()
}

/// Relative description of `t` as seen from `now`.
pub fn format_time_ago(t: DateTime<Local>, now: DateTime<Local>) -> String {
    let d = now.signed_duration_since(t);
    if d < Duration::minutes(1) {
        return "just now".to_string();
    }
    if d < Duration::hours(1) {
        return plural(d.num_minutes(), "minute");
    }
    if d < Duration::days(1) {
        return plural(d.num_hours(), "hour");
    }
    if d < Duration::days(7) {
        return plural(d.num_days(), "day");
    }
    t.format("%b %-d, %Y").to_string()
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}
