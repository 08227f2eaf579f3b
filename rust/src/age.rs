//! Exact age calculation for the profile header.

use chrono::{Datelike, Months, NaiveDate};

use crate::engine::EngineError;
use crate::models::AgeBreakdown;

/// Calendar age at `today` for a child born on `dob`.
///
/// Years and months come from stepping `dob` forward by whole months
/// (month-end clamped, so Jan 31 plus one month anchors at Feb 29/28), and
/// the day remainder is measured from that anchor. Fails with
/// [`EngineError::FutureDob`] when `dob` is after `today`.
pub fn calculate_age(dob: NaiveDate, today: NaiveDate) -> Result<AgeBreakdown, EngineError> {
    if dob > today {
        return Err(EngineError::FutureDob { dob, today });
    }

    // Raw month difference can overshoot by one when today's day-of-month
    // hasn't reached the birth day yet
    let mut total_months =
        (today.year() - dob.year()) as i64 * 12 + (today.month() as i64 - dob.month() as i64);
    if total_months > 0 && add_months(dob, total_months) > today {
        total_months -= 1;
    }

    let anchor = add_months(dob, total_months);
    let days = (today - anchor).num_days() as u32;
    let years = (total_months / 12) as u32;
    let months = (total_months % 12) as u32;
    let total_days = (today - dob).num_days();

    Ok(AgeBreakdown {
        years,
        months,
        days,
        total_days,
        total_weeks: total_days / 7,
        total_months: total_months as u32,
        formatted: format_age(years, months, days),
    })
}

fn add_months(date: NaiveDate, months: i64) -> NaiveDate {
    date + Months::new(months as u32)
}

/// Readable age: skips zero parts, always shows at least the days
/// ("0 days" for a newborn).
fn format_age(years: u32, months: u32, days: u32) -> String {
    let mut parts = Vec::new();
    if years > 0 {
        parts.push(count(years, "year"));
    }
    if months > 0 {
        parts.push(count(months, "month"));
    }
    if days > 0 || parts.is_empty() {
        parts.push(count(days, "day"));
    }
    parts.join(", ")
}

fn count(n: u32, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}
