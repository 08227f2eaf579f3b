//! Derived data types produced by the vaccine engine.

use chrono::NaiveDate;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// Note: We use std HashMap here for PyO3 interface compatibility

/// Per-child record of which doses have been administered.
///
/// Absent keys mean "not administered". The map is owned and persisted by
/// the caller; the engine only reads it (or returns a fresh copy on toggle).
pub type CompletionMap = HashMap<String, bool>;

/// Classification of a single dose relative to today.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VaccineStatus {
    Completed,
    Due,
    Upcoming,
    Overdue,
}

impl VaccineStatus {
    /// Lowercase string form, matching the app's status keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            VaccineStatus::Completed => "completed",
            VaccineStatus::Due => "due",
            VaccineStatus::Upcoming => "upcoming",
            VaccineStatus::Overdue => "overdue",
        }
    }
}

impl fmt::Display for VaccineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VaccineStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" => Ok(VaccineStatus::Completed),
            "due" => Ok(VaccineStatus::Due),
            "upcoming" => Ok(VaccineStatus::Upcoming),
            "overdue" => Ok(VaccineStatus::Overdue),
            other => Err(format!("Unknown vaccine status: {other:?}")),
        }
    }
}

/// Status of one scheduled dose for one child.
///
/// Recomputed on every engine call and never persisted; the caller keeps
/// only the completion map.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VaccineRecord {
    #[pyo3(get)]
    pub key: String,
    #[pyo3(get)]
    pub label: String,
    #[pyo3(get)]
    pub short_label: String,
    #[pyo3(get)]
    pub age_label: String,
    #[pyo3(get)]
    pub age_days_text: String,
    #[pyo3(get)]
    pub due_date: NaiveDate,
    /// Display form of `due_date` ("Feb 1, 2024").
    #[pyo3(get)]
    pub due_date_text: String,
    /// Whole days from today until the due date (negative once overdue).
    #[pyo3(get)]
    pub delta_days: i64,
    #[pyo3(get)]
    pub is_completed: bool,
    pub status: VaccineStatus,
    #[pyo3(get)]
    pub status_message: String,
}

#[pymethods]
impl VaccineRecord {
    #[new]
    #[allow(clippy::too_many_arguments)]
    fn new(
        key: String,
        label: String,
        short_label: String,
        age_label: String,
        age_days_text: String,
        due_date: NaiveDate,
        due_date_text: String,
        delta_days: i64,
        is_completed: bool,
        status: &str,
        status_message: String,
    ) -> PyResult<Self> {
        let status = status.parse().map_err(PyValueError::new_err)?;
        Ok(Self {
            key,
            label,
            short_label,
            age_label,
            age_days_text,
            due_date,
            due_date_text,
            delta_days,
            is_completed,
            status,
            status_message,
        })
    }

    /// Status as its lowercase string key.
    #[getter(status)]
    fn status_str(&self) -> &'static str {
        self.status.as_str()
    }

    fn __repr__(&self) -> String {
        format!(
            "VaccineRecord(key={:?}, due={}, status={:?})",
            self.key,
            self.due_date,
            self.status.as_str()
        )
    }
}

/// Aggregate vaccination progress for one child.
#[pyclass]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSummary {
    #[pyo3(get)]
    pub completed: usize,
    #[pyo3(get)]
    pub total: usize,
    /// Round-half-up integer percentage; 0 when the schedule is empty.
    #[pyo3(get)]
    pub percentage: u32,
}

#[pymethods]
impl ProgressSummary {
    #[new]
    fn new(completed: usize, total: usize, percentage: u32) -> Self {
        Self {
            completed,
            total,
            percentage,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "ProgressSummary(completed={}, total={}, percentage={})",
            self.completed, self.total, self.percentage
        )
    }
}

/// Exact age breakdown for display ("1 year, 2 months, 3 days").
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBreakdown {
    #[pyo3(get)]
    pub years: u32,
    #[pyo3(get)]
    pub months: u32,
    #[pyo3(get)]
    pub days: u32,
    #[pyo3(get)]
    pub total_days: i64,
    #[pyo3(get)]
    pub total_weeks: i64,
    #[pyo3(get)]
    pub total_months: u32,
    #[pyo3(get)]
    pub formatted: String,
}

#[pymethods]
impl AgeBreakdown {
    fn __repr__(&self) -> String {
        format!(
            "AgeBreakdown(years={}, months={}, days={})",
            self.years, self.months, self.days
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_string_round_trip() {
        for status in [
            VaccineStatus::Completed,
            VaccineStatus::Due,
            VaccineStatus::Upcoming,
            VaccineStatus::Overdue,
        ] {
            assert_eq!(status.as_str().parse::<VaccineStatus>(), Ok(status));
        }
        assert!("pending".parse::<VaccineStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&VaccineStatus::Overdue).unwrap();
        assert_eq!(json, "\"overdue\"");
    }
}
