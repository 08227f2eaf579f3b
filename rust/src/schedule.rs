//! The fixed immunization schedule table.
//!
//! The shipped table is the Bangladesh EPI schedule: first pentavalent dose
//! at day 45 (6 weeks), 28-day intervals for subsequent doses. Changing a
//! dosing interval means shipping a new table, not migrating stored data.

/// A single required dose in the immunization schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduleEntry {
    /// Unique identifier, used as the key in completion maps.
    pub key: &'static str,
    /// Days after birth when the dose is due.
    pub offset_days: u32,
    /// Full display label.
    pub label: &'static str,
    /// Compact label for tight layouts.
    pub short_label: &'static str,
    /// Human-readable age ("6 weeks").
    pub age_label: &'static str,
    /// Human-readable day count ("45 days").
    pub age_days_text: &'static str,
}

/// Bangladesh EPI schedule, in chronological order.
///
/// Invariants: `offset_days` is non-decreasing and `key` is unique. The
/// table is a process-wide constant and is never mutated at runtime.
pub const BD_EPI_SCHEDULE: &[ScheduleEntry] = &[
    ScheduleEntry {
        key: "bcg",
        offset_days: 0,
        label: "BCG + OPV 0",
        short_label: "BCG",
        age_label: "At Birth",
        age_days_text: "Day 0",
    },
    ScheduleEntry {
        key: "penta1",
        offset_days: 45,
        label: "Pentavalent 1 + OPV 1 + PCV 1",
        short_label: "Penta 1",
        age_label: "6 weeks",
        age_days_text: "45 days",
    },
    ScheduleEntry {
        key: "penta2",
        offset_days: 73,
        label: "Pentavalent 2 + OPV 2 + PCV 2",
        short_label: "Penta 2",
        age_label: "10 weeks",
        age_days_text: "73 days",
    },
    ScheduleEntry {
        key: "penta3",
        offset_days: 101,
        label: "Pentavalent 3 + OPV 3 + PCV 3",
        short_label: "Penta 3",
        age_label: "14 weeks",
        age_days_text: "101 days",
    },
    ScheduleEntry {
        key: "mr1",
        offset_days: 270,
        label: "MR (Measles-Rubella)",
        short_label: "MR 1",
        age_label: "9 months",
        age_days_text: "270 days",
    },
    ScheduleEntry {
        key: "mr2",
        offset_days: 450,
        label: "MR 2",
        short_label: "MR 2",
        age_label: "15 months",
        age_days_text: "450 days",
    },
];

/// Look up a schedule entry by key.
pub fn find_entry(key: &str) -> Option<&'static ScheduleEntry> {
    BD_EPI_SCHEDULE.iter().find(|entry| entry.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_offsets_are_non_decreasing() {
        for pair in BD_EPI_SCHEDULE.windows(2) {
            assert!(
                pair[0].offset_days <= pair[1].offset_days,
                "{} ({}d) ordered after {} ({}d)",
                pair[1].key,
                pair[1].offset_days,
                pair[0].key,
                pair[0].offset_days
            );
        }
    }

    #[test]
    fn test_keys_are_unique() {
        let keys: HashSet<&str> = BD_EPI_SCHEDULE.iter().map(|e| e.key).collect();
        assert_eq!(keys.len(), BD_EPI_SCHEDULE.len());
    }

    #[test]
    fn test_birth_dose_is_first() {
        assert_eq!(BD_EPI_SCHEDULE[0].key, "bcg");
        assert_eq!(BD_EPI_SCHEDULE[0].offset_days, 0);
    }

    #[test]
    fn test_find_entry() {
        let entry = find_entry("penta1").unwrap();
        assert_eq!(entry.offset_days, 45);
        assert_eq!(entry.age_label, "6 weeks");

        assert!(find_entry("hepb").is_none());
        // Keys are case-sensitive
        assert!(find_entry("BCG").is_none());
    }
}
