//! Input validation for process sets.
//!
//! Checks the process list before a build. Detects:
//! - Empty process list
//! - Empty or duplicate pids
//! - Non-finite arrival or burst
//! - Negative arrival
//! - Non-positive burst
//! - Times the clock cannot resolve (horizon too large, burst too small)
//!
//! All problems are collected, not just the first, so callers can report
//! every failed constraint at once.

use crate::models::{Process, TIME_EPSILON};
use std::collections::HashSet;

/// Largest time horizon (latest arrival plus total burst) accepted.
///
/// Up to this value consecutive `f64` times are at most `1e-9` apart, so
/// every segment boundary the builders compute stays exact to the
/// tolerance used by the integrity checks.
pub const MAX_HORIZON: f64 = TIME_EPSILON / f64::EPSILON;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description naming the offending process.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No processes to schedule.
    EmptyProcessList,
    /// A process has an empty pid.
    EmptyPid,
    /// Two processes share the same pid.
    DuplicatePid,
    /// Arrival or burst is NaN or infinite.
    NonFiniteValue,
    /// Arrival is below zero.
    NegativeArrival,
    /// Burst is zero or below.
    NonPositiveBurst,
    /// Times exceed [`MAX_HORIZON`], or a burst vanishes when added to it.
    PrecisionLoss,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a process set.
///
/// Checks:
/// 1. At least one process
/// 2. Every pid is non-empty
/// 3. No duplicate pids
/// 4. Arrival and burst are finite
/// 5. Arrival ≥ 0
/// 6. Burst > 0
/// 7. Latest arrival + total burst ≤ [`MAX_HORIZON`], and every burst
///    still moves the clock at that horizon
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_processes(processes: &[Process]) -> ValidationResult {
    let mut errors = Vec::new();

    if processes.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyProcessList,
            "Process list is empty",
        ));
    }

    let mut pids = HashSet::new();
    for (idx, p) in processes.iter().enumerate() {
        if p.pid.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyPid,
                format!("Process at position {idx} has an empty pid"),
            ));
        } else if !pids.insert(p.pid.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicatePid,
                format!("Duplicate pid: {}", p.pid),
            ));
        }

        if !p.arrival.is_finite() || !p.burst.is_finite() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonFiniteValue,
                format!(
                    "Process '{}' has non-finite arrival {} or burst {}",
                    p.pid, p.arrival, p.burst
                ),
            ));
            continue;
        }

        if p.arrival < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!("Process '{}' has negative arrival {}", p.pid, p.arrival),
            ));
        }

        if p.burst <= 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!("Process '{}' has non-positive burst {}", p.pid, p.burst),
            ));
        }
    }

    if errors.is_empty() {
        check_resolution(processes, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Rejects inputs whose segment boundaries would collapse or drift in `f64`.
fn check_resolution(processes: &[Process], errors: &mut Vec<ValidationError>) {
    let latest = processes.iter().map(|p| p.arrival).fold(0.0, f64::max);
    let horizon = latest + processes.iter().map(|p| p.burst).sum::<f64>();

    if horizon > MAX_HORIZON {
        errors.push(ValidationError::new(
            ValidationErrorKind::PrecisionLoss,
            format!("Time horizon {horizon} exceeds the supported maximum {MAX_HORIZON}"),
        ));
        return;
    }

    for p in processes {
        if horizon + p.burst <= horizon {
            errors.push(ValidationError::new(
                ValidationErrorKind::PrecisionLoss,
                format!(
                    "Process '{}' has burst {} below the time resolution at {horizon}",
                    p.pid, p.burst
                ),
            ));
        }
    }
}
