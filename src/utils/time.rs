//! Time utilities: interval arithmetic on timestamps, parsing HH:MM,
//! formatting minutes and hours.

use crate::errors::{AppError, AppResult};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static BREAK_WINDOW_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\s*(\d{1,2}:\d{2})\s*-\s*(\d{1,2}:\d{2})\s*$").ok());

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalError {
    #[error("interval ends ({end}) before it starts ({start})")]
    InvalidInterval {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

/// Whole minutes between two timestamps. `end == start` is a zero-length
/// interval; `end < start` is rejected.
pub fn duration_minutes(start: NaiveDateTime, end: NaiveDateTime) -> Result<i64, IntervalError> {
    if end < start {
        return Err(IntervalError::InvalidInterval { start, end });
    }
    Ok((end - start).num_minutes())
}

/// Half-open overlap test: `[a_start, a_end)` against `[b_start, b_end)`.
pub fn overlaps(
    a_start: NaiveDateTime,
    a_end: NaiveDateTime,
    b_start: NaiveDateTime,
    b_end: NaiveDateTime,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Closed containment: `[inner_start, inner_end]` lies inside `[outer_start, outer_end]`.
pub fn contains(
    outer_start: NaiveDateTime,
    outer_end: NaiveDateTime,
    inner_start: NaiveDateTime,
    inner_end: NaiveDateTime,
) -> bool {
    outer_start <= inner_start && inner_end <= outer_end
}

pub fn minutes_to_hours(mins: i64) -> f64 {
    mins as f64 / 60.0
}

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

/// Accepts `HH:MM` (anchored on `date`) or a full `YYYY-MM-DD HH:MM`,
/// the latter being needed for shifts crossing midnight.
pub fn parse_timestamp(date: NaiveDate, s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Some(t) = parse_time(s) {
        return Some(date.and_time(t));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .ok()
}

pub fn parse_optional_timestamp(
    date: NaiveDate,
    input: Option<&String>,
) -> AppResult<Option<NaiveDateTime>> {
    if let Some(s) = input {
        let t = parse_timestamp(date, s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
        Ok(Some(t))
    } else {
        Ok(None)
    }
}

/// Storage representation of a timestamp.
pub fn to_db_timestamp(ts: NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn from_db_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M"))
        .ok()
}

/// `HH:MM` when the timestamp falls on `day`, otherwise the full date too.
pub fn format_timestamp(day: NaiveDate, ts: NaiveDateTime) -> String {
    if ts.date() == day {
        ts.format("%H:%M").to_string()
    } else {
        ts.format("%Y-%m-%d %H:%M").to_string()
    }
}

pub fn format_hours(hours: f64) -> String {
    format!("{:.2}", hours)
}

/// Parse a break window like `12:00-12:30`.
pub fn parse_break_window(s: &str) -> Option<(NaiveTime, NaiveTime)> {
    let caps = BREAK_WINDOW_RE.as_ref()?.captures(s)?;
    let start = parse_time(caps.get(1)?.as_str())?;
    let end = parse_time(caps.get(2)?.as_str())?;
    Some((start, end))
}

/// Place a time-of-day break window on the timeline of a shift worked on
/// `day`. A start earlier than the check-in falls after midnight; an end at
/// or before the start crosses midnight.
pub fn place_break_window(
    day: NaiveDate,
    check_in: Option<NaiveDateTime>,
    start: NaiveTime,
    end: NaiveTime,
) -> (NaiveDateTime, NaiveDateTime) {
    let mut placed_start = day.and_time(start);
    if check_in.is_some_and(|ci| placed_start < ci) {
        placed_start += Duration::days(1);
    }

    let mut placed_end = placed_start.date().and_time(end);
    if placed_end <= placed_start {
        placed_end += Duration::days(1);
    }

    (placed_start, placed_end)
}
