//! Error types.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors surfaced by schedule builds, playback and snapshots.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// Input rejected before any build attempt.
    #[error("Invalid input: {}", join_messages(.0))]
    InvalidInput(Vec<ValidationError>),

    /// The built timeline violates its own invariants.
    ///
    /// Indicates a defect in the builder, not a user error.
    #[error("Degenerate schedule for [{}]: {}", .pids.join(", "), .details.join("; "))]
    DegenerateResult {
        /// Processes involved in the violations.
        pids: Vec<String>,
        /// One message per violation.
        details: Vec<String>,
    },

    /// Playback speed must be finite and positive.
    #[error("Invalid playback speed: {0}")]
    InvalidSpeed(f64),

    /// Operation requires a built schedule.
    #[error("Schedule has not been built")]
    NotBuilt,

    /// Stored snapshot timeline differs from a replay of its inputs.
    #[error("Snapshot timeline does not match a replay of its inputs")]
    SnapshotMismatch,

    /// Config or snapshot JSON could not be parsed or written.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_invalid_input_message_lists_constraints() {
        let err = ScheduleError::InvalidInput(vec![
            ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                "Process 'P1' has non-positive burst 0",
            ),
            ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                "Process 'P2' has negative arrival -1",
            ),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("P1"));
        assert!(msg.contains("burst"));
        assert!(msg.contains("P2"));
        assert!(msg.contains("arrival"));
    }

    #[test]
    fn test_degenerate_message() {
        let err = ScheduleError::DegenerateResult {
            pids: vec!["P3".into()],
            details: vec!["Process 'P3' has no timeline segments".into()],
        };
        assert!(err.to_string().starts_with("Degenerate schedule for [P3]"));
    }
}
