//! Rust implementation of the TikaTrack vaccine schedule engine.
//!
//! Pure derivations over a fixed immunization schedule: due dates, status
//! classification, progress and stage summaries, plus age calculation and
//! the share-payload codec. The web/Python layer owns persistence, auth,
//! and rendering; it calls in here with plain data and gets plain data back.

use chrono::{Local, NaiveDate};
use pyo3::exceptions::{PyKeyError, PyValueError};
use pyo3::prelude::*;
use std::collections::HashMap;

pub mod age;
mod config;
pub mod dates;
pub mod engine;
pub mod logging;
mod models;
pub mod schedule;
pub mod share;

pub use age::calculate_age;
pub use config::StatusPolicy;
pub use engine::{
    compute_progress, compute_statuses, compute_statuses_str, is_completed, overdue_doses,
    toggle_dose, vaccination_stage, EngineError, STAGE_FULLY_VACCINATED, STAGE_IN_PROGRESS,
    STAGE_NOT_STARTED,
};
pub use models::{AgeBreakdown, CompletionMap, ProgressSummary, VaccineRecord, VaccineStatus};
pub use schedule::{find_entry, ScheduleEntry, BD_EPI_SCHEDULE};
pub use share::{decode_share_payload, encode_share_payload, ShareError};

fn engine_err(err: EngineError) -> PyErr {
    match err {
        EngineError::UnknownKey(_) => PyKeyError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

/// Compute per-dose status records for a child.
///
/// # Arguments
/// * `dob` - Date of birth as an ISO `YYYY-MM-DD` string (the form the
///   profile store keeps)
/// * `completion` - Dict mapping schedule key to administered flag;
///   missing keys mean not administered
/// * `today` - Reference date; defaults to the local calendar date
/// * `policy` - Status policy; defaults to the 7-day due-soon window
///
/// # Returns
/// * List of VaccineRecord, one per schedule entry, in schedule order
///
/// # Raises
/// * ValueError if `dob` is unparseable or after `today`
#[pyfunction]
#[pyo3(signature = (dob, completion, today=None, policy=None))]
fn get_vaccine_status(
    dob: &str,
    completion: HashMap<String, bool>,
    today: Option<NaiveDate>,
    policy: Option<StatusPolicy>,
) -> PyResult<Vec<VaccineRecord>> {
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let policy = policy.unwrap_or_default();
    engine::compute_statuses_str(dob, &completion, today, &policy).map_err(engine_err)
}

/// Aggregate completion counts and percentage over status records.
#[pyfunction]
fn get_vaccine_progress(records: Vec<VaccineRecord>) -> ProgressSummary {
    engine::compute_progress(&records)
}

/// Coarse stage label ("Not Started" / "In Progress ..." / "Fully
/// Vaccinated") for the progress header.
#[pyfunction]
fn get_vaccination_stage(records: Vec<VaccineRecord>) -> String {
    let progress = engine::compute_progress(&records);
    engine::vaccination_stage(&records, &progress)
}

/// Overdue doses only, in schedule order.
#[pyfunction]
fn get_overdue_vaccines(records: Vec<VaccineRecord>) -> Vec<VaccineRecord> {
    engine::overdue_doses(&records)
}

/// Flip one dose in a completion map, returning the new map.
///
/// # Raises
/// * KeyError if `key` is not in the schedule table
#[pyfunction]
fn toggle_vaccine(completion: HashMap<String, bool>, key: &str) -> PyResult<HashMap<String, bool>> {
    engine::toggle_dose(&completion, key).map_err(engine_err)
}

/// Exact age breakdown for a child born on `dob` (ISO `YYYY-MM-DD`).
///
/// # Raises
/// * ValueError if `dob` is unparseable or after `today`
#[pyfunction]
#[pyo3(signature = (dob, today=None))]
fn get_age(dob: &str, today: Option<NaiveDate>) -> PyResult<AgeBreakdown> {
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let dob = dates::parse_iso_date(dob).map_err(engine_err)?;
    age::calculate_age(dob, today).map_err(engine_err)
}

/// Encode a completion map as a base64 JSON share payload.
#[pyfunction]
fn encode_share(completion: HashMap<String, bool>) -> PyResult<String> {
    share::encode_share_payload(&completion).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Decode a share payload into a completion map, dropping keys this
/// schedule doesn't know.
///
/// # Raises
/// * ValueError if the payload is not base64-encoded JSON
#[pyfunction]
fn decode_share(payload: &str) -> PyResult<HashMap<String, bool>> {
    share::decode_share_payload(payload).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Schedule keys in chronological order, for callers that iterate the table.
#[pyfunction]
fn schedule_keys() -> Vec<String> {
    BD_EPI_SCHEDULE.iter().map(|e| e.key.to_string()).collect()
}

/// The tikatrack.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Derived data types
    m.add_class::<VaccineRecord>()?;
    m.add_class::<ProgressSummary>()?;
    m.add_class::<AgeBreakdown>()?;

    // Config types
    m.add_class::<StatusPolicy>()?;

    // Engine operations
    m.add_function(wrap_pyfunction!(get_vaccine_status, m)?)?;
    m.add_function(wrap_pyfunction!(get_vaccine_progress, m)?)?;
    m.add_function(wrap_pyfunction!(get_vaccination_stage, m)?)?;
    m.add_function(wrap_pyfunction!(get_overdue_vaccines, m)?)?;
    m.add_function(wrap_pyfunction!(toggle_vaccine, m)?)?;
    m.add_function(wrap_pyfunction!(get_age, m)?)?;
    m.add_function(wrap_pyfunction!(encode_share, m)?)?;
    m.add_function(wrap_pyfunction!(decode_share, m)?)?;
    m.add_function(wrap_pyfunction!(schedule_keys, m)?)?;

    Ok(())
}
