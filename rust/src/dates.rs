//! Calendar-date helpers.
//!
//! The engine works in local calendar dates only (no time-of-day, no
//! timezone). The profile store supplies dates as ISO `YYYY-MM-DD` strings;
//! parsing them here never goes through a UTC instant, so a birth date can
//! never shift by a day.

use chrono::{Datelike, Days, NaiveDate};

use crate::engine::EngineError;

/// Parse an ISO `YYYY-MM-DD` string as a plain calendar date.
pub fn parse_iso_date(s: &str) -> Result<NaiveDate, EngineError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| EngineError::InvalidDob(s.to_string()))
}

/// Due date for a dose: birth date plus the schedule offset.
///
/// Calendar-day addition, so month and year boundaries roll over
/// (Jan 31 + 1 day is Feb 1).
pub fn due_date(dob: NaiveDate, offset_days: u32) -> NaiveDate {
    dob + Days::new(u64::from(offset_days))
}

/// Whole days from `today` until `due`.
///
/// Positive while the due date is in the future, negative once overdue,
/// zero when due today.
pub fn days_until(due: NaiveDate, today: NaiveDate) -> i64 {
    due.signed_duration_since(today).num_days()
}

/// Format a date the way the vaccine cards display it ("Feb 1, 2024").
pub fn format_display_date(date: NaiveDate) -> String {
    format!("{} {}, {}", date.format("%b"), date.day(), date.year())
}
