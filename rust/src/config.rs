//! Policy configuration for status classification.

use pyo3::prelude::*;

/// Tunable policy for classifying doses.
///
/// The defaults match the app's behavior (7-day due-soon window); they are
/// policy, not a behavioral guarantee, so callers may override them.
#[pyclass]
#[derive(Clone, Debug)]
pub struct StatusPolicy {
    /// Doses due within this many days are "due" rather than "upcoming".
    /// A dose due exactly today (delta 0) is always "due", never "overdue".
    #[pyo3(get, set)]
    pub due_soon_days: i64,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for StatusPolicy {
    fn default() -> Self {
        Self {
            due_soon_days: 7,
            verbosity: 0,
        }
    }
}

#[pymethods]
impl StatusPolicy {
    #[new]
    #[pyo3(signature = (due_soon_days=7, verbosity=0))]
    fn new(due_soon_days: i64, verbosity: u8) -> Self {
        Self {
            due_soon_days,
            verbosity,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "StatusPolicy(due_soon_days={}, verbosity={})",
            self.due_soon_days, self.verbosity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = StatusPolicy::default();
        assert_eq!(policy.due_soon_days, 7);
        assert_eq!(policy.verbosity, 0);
    }
}
