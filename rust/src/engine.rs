//! The vaccine status engine.
//!
//! Pure derivations over the fixed schedule table: per-dose status records,
//! progress and stage summaries, overdue filtering, and completion-map
//! toggling. Every function here is a function of its explicit inputs only
//! ("today" is injected, never read from a clock), so concurrent callers
//! need no coordination and repeated calls are deterministic.

use chrono::NaiveDate;
use thiserror::Error;

use crate::config::StatusPolicy;
use crate::dates::{days_until, due_date, format_display_date, parse_iso_date};
use crate::models::{CompletionMap, ProgressSummary, VaccineRecord, VaccineStatus};
use crate::schedule::{find_entry, BD_EPI_SCHEDULE};
use crate::{log_changes, log_checks, log_debug};

/// Stage label when no dose has been administered.
pub const STAGE_NOT_STARTED: &str = "Not Started";
/// Stage label while some but not all doses are done.
pub const STAGE_IN_PROGRESS: &str = "In Progress";
/// Stage label once every scheduled dose is done.
pub const STAGE_FULLY_VACCINATED: &str = "Fully Vaccinated";

/// Errors the engine can surface.
///
/// Both variants indicate caller-side problems and are deterministic:
/// retrying with the same input yields the same error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Date of birth string did not parse as ISO `YYYY-MM-DD`.
    #[error("Invalid date of birth: {0:?}")]
    InvalidDob(String),
    /// Date of birth lies after the injected "today". Never clamped.
    #[error("Date of birth {dob} is after today ({today})")]
    FutureDob { dob: NaiveDate, today: NaiveDate },
    /// Key not present in the schedule table (stale or foreign data).
    #[error("Unknown vaccine key: {0:?}")]
    UnknownKey(String),
}

/// Effective completion for a key: absent means not administered.
pub fn is_completed(completion: &CompletionMap, key: &str) -> bool {
    completion.get(key).copied().unwrap_or(false)
}

/// Compute a status record for every dose in the schedule.
///
/// Records come back in schedule order (chronological by offset), one per
/// table entry, regardless of status. Fails with [`EngineError::FutureDob`]
/// when `dob` is after `today`.
pub fn compute_statuses(
    dob: NaiveDate,
    completion: &CompletionMap,
    today: NaiveDate,
    policy: &StatusPolicy,
) -> Result<Vec<VaccineRecord>, EngineError> {
    if dob > today {
        return Err(EngineError::FutureDob { dob, today });
    }

    log_debug!(
        policy.verbosity,
        "compute_statuses: dob={} today={} completion_keys={}",
        dob,
        today,
        completion.len()
    );

    let mut records = Vec::with_capacity(BD_EPI_SCHEDULE.len());
    for entry in BD_EPI_SCHEDULE {
        let due = due_date(dob, entry.offset_days);
        let delta_days = days_until(due, today);
        let completed = is_completed(completion, entry.key);

        log_checks!(
            policy.verbosity,
            "  {}: due={} delta={} completed={}",
            entry.key,
            due,
            delta_days,
            completed
        );

        let status = classify(completed, delta_days, policy);
        log_changes!(policy.verbosity, "{} -> {}", entry.key, status);

        records.push(VaccineRecord {
            key: entry.key.to_string(),
            label: entry.label.to_string(),
            short_label: entry.short_label.to_string(),
            age_label: entry.age_label.to_string(),
            age_days_text: entry.age_days_text.to_string(),
            due_date: due,
            due_date_text: format_display_date(due),
            delta_days,
            is_completed: completed,
            status,
            status_message: status_message(status, delta_days),
        });
    }

    Ok(records)
}

/// As [`compute_statuses`], taking the dob in the ISO `YYYY-MM-DD` string
/// form the profile store uses.
pub fn compute_statuses_str(
    dob: &str,
    completion: &CompletionMap,
    today: NaiveDate,
    policy: &StatusPolicy,
) -> Result<Vec<VaccineRecord>, EngineError> {
    let dob = parse_iso_date(dob)?;
    compute_statuses(dob, completion, today, policy)
}

/// Classify one dose. Precedence: completed beats everything, then overdue
/// (strictly negative delta), then the due-soon window, then upcoming.
fn classify(completed: bool, delta_days: i64, policy: &StatusPolicy) -> VaccineStatus {
    if completed {
        VaccineStatus::Completed
    } else if delta_days < 0 {
        VaccineStatus::Overdue
    } else if delta_days <= policy.due_soon_days {
        VaccineStatus::Due
    } else {
        VaccineStatus::Upcoming
    }
}

fn status_message(status: VaccineStatus, delta_days: i64) -> String {
    match status {
        VaccineStatus::Completed => "Completed".to_string(),
        VaccineStatus::Overdue => format!("{} overdue", count_days(-delta_days)),
        VaccineStatus::Due if delta_days == 0 => "Due today".to_string(),
        VaccineStatus::Due | VaccineStatus::Upcoming => {
            format!("Due in {}", count_days(delta_days))
        }
    }
}

fn count_days(n: i64) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", n)
    }
}

/// Aggregate completion counts and a round-half-up percentage.
pub fn compute_progress(records: &[VaccineRecord]) -> ProgressSummary {
    let total = records.len();
    let completed = records.iter().filter(|r| r.is_completed).count();
    let percentage = if total == 0 {
        0
    } else {
        (completed as f64 / total as f64 * 100.0).round() as u32
    };
    ProgressSummary {
        completed,
        total,
        percentage,
    }
}

/// Coarse human-readable stage for the progress header.
///
/// "In Progress" is refined with the most advanced completed dose's age
/// label; records are in schedule order, so that is the last completed one.
pub fn vaccination_stage(records: &[VaccineRecord], progress: &ProgressSummary) -> String {
    if progress.completed == 0 {
        return STAGE_NOT_STARTED.to_string();
    }
    if progress.completed == progress.total {
        return STAGE_FULLY_VACCINATED.to_string();
    }
    match records.iter().rev().find(|r| r.is_completed) {
        Some(record) => format!("{} (past {})", STAGE_IN_PROGRESS, record.age_label),
        None => STAGE_IN_PROGRESS.to_string(),
    }
}

/// Doses whose status is overdue, in schedule order. Empty when none are.
pub fn overdue_doses(records: &[VaccineRecord]) -> Vec<VaccineRecord> {
    records
        .iter()
        .filter(|r| r.status == VaccineStatus::Overdue)
        .cloned()
        .collect()
}

/// Flip one dose in a completion map, returning a new map.
///
/// Absent or `false` becomes `true`; `true` becomes `false`. Keys that are
/// not in the schedule table are rejected so stale keys from external
/// storage can't silently grow the map.
pub fn toggle_dose(completion: &CompletionMap, key: &str) -> Result<CompletionMap, EngineError> {
    if find_entry(key).is_none() {
        return Err(EngineError::UnknownKey(key.to_string()));
    }
    let mut next = completion.clone();
    next.insert(key.to_string(), !is_completed(completion, key));
    Ok(next)
}
