//! Date and time helpers for chat export cells.
//!
//! Exports write dates with a two-digit year first (`24-01-15`) and times as
//! `hh:mm`. Everything is local wall-clock time; no timezone conversion is
//! ever applied.

use std::sync::OnceLock;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use regex::Regex;

use crate::error::{Result, StatsError};

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{2}-\d{2}-\d{2}$").expect("regex is valid"))
}

/// Parse a `YY-MM-DD` date cell.
///
/// Years `00`–`68` land in the 2000s and `69`–`99` in the 1900s. Four-digit
/// years are rejected rather than guessed at.
pub fn parse_export_date(cell: &str) -> Result<NaiveDate> {
    let trimmed = cell.trim();
    if !date_pattern().is_match(trimmed) {
        return Err(StatsError::InvalidDate(trimmed.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, "%y-%m-%d")
        .map_err(|_| StatsError::InvalidDate(trimmed.to_string()))
}

/// Parse an `hh:mm` (or `hh:mm:ss`) time cell.
pub fn parse_export_time(cell: &str) -> Result<NaiveTime> {
    let trimmed = cell.trim();
    const FMTS: &[&str] = &["%H:%M", "%H:%M:%S"];
    FMTS.iter()
        .find_map(|fmt| NaiveTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| StatsError::InvalidTime(trimmed.to_string()))
}

/// Combine a date cell and a time cell into one timestamp.
pub fn parse_export_timestamp(date: &str, time: &str) -> Result<NaiveDateTime> {
    let date = parse_export_date(date)?;
    let time = parse_export_time(time)?;
    Ok(date.and_time(time))
}

/// Weekday index with Monday = 0 .. Sunday = 6.
pub fn weekday_index(ts: &NaiveDateTime) -> u32 {
    ts.weekday().num_days_from_monday()
}

/// Hour of day, 0–23.
pub fn hour_of_day(ts: &NaiveDateTime) -> u32 {
    ts.hour()
}

/// `"YYYY-MM"` key; lexicographic order is chronological.
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Format the report generation time as `YYYY-MM-DDTHH:MM:SSZ`.
pub fn format_generated_at(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
