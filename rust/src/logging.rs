//! Logging macros for the vaccine engine with verbosity level control.
//!
//! Provides zero-cost logging when disabled (verbosity=0). The verbosity
//! level travels inside `StatusPolicy` so the engine stays a pure function
//! of its inputs:
//! - 0: SILENT (only errors)
//! - 1: CHANGES (per-dose classification results)
//! - 2: CHECKS (due-date and delta details per dose)
//! - 3: DEBUG (full engine internals)

/// Verbosity level constants.
pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_CHANGES: u8 = 1;
pub const VERBOSITY_CHECKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at CHANGES level (verbosity >= 1).
///
/// Used for: final status classification per dose.
#[macro_export]
macro_rules! log_changes {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHANGES {
            eprintln!($($arg)*);
        }
    };
}

/// Log at CHECKS level (verbosity >= 2).
///
/// Used for: due-date arithmetic and threshold checks per dose.
#[macro_export]
macro_rules! log_checks {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHECKS {
            eprintln!($($arg)*);
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
///
/// Used for: completion-map snapshots and other engine internals.
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels_are_ordered() {
        assert!(VERBOSITY_SILENT < VERBOSITY_CHANGES);
        assert!(VERBOSITY_CHANGES < VERBOSITY_CHECKS);
        assert!(VERBOSITY_CHECKS < VERBOSITY_DEBUG);
    }

    #[test]
    fn test_log_macros_compile() {
        // Just verify macros compile and don't panic
        let verbosity = VERBOSITY_SILENT;
        log_changes!(verbosity, "dose {} classified", "bcg");
        log_checks!(verbosity, "delta {}", -15);
        log_debug!(verbosity, "completion keys: {}", 2);
    }
}
