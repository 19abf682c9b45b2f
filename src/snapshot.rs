//! Serializable export of a built schedule.
//!
//! A snapshot stores the inputs (`algorithm`, `quantum`, `processes`) next
//! to the outputs (`timeline`, `stats`). Because builds are deterministic,
//! replaying the inputs reproduces the stored timeline exactly.

use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::models::{Algorithm, Process, ScheduleConfig, Timeline};
use crate::scheduler::{build_timeline, ScheduleStats};

/// Export record `{ algorithm, quantum, startAt, processes, timeline, stats }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub algorithm: Algorithm,
    /// Effective (clamped) quantum used for the build.
    pub quantum: f64,
    pub start_at: f64,
    pub processes: Vec<Process>,
    pub timeline: Timeline,
    pub stats: ScheduleStats,
}

impl Snapshot {
    /// Build configuration recorded in this snapshot.
    pub fn config(&self) -> ScheduleConfig {
        ScheduleConfig::new(self.algorithm)
            .with_quantum(self.quantum)
            .with_start_at(self.start_at)
    }

    /// Rebuilds the timeline from the recorded inputs.
    pub fn replay(&self) -> Timeline {
        build_timeline(self.algorithm, &self.processes, self.quantum)
    }

    /// Checks that the stored timeline matches a replay.
    pub fn verify(&self) -> Result<(), ScheduleError> {
        if self.replay() == self.timeline {
            Ok(())
        } else {
            Err(ScheduleError::SnapshotMismatch)
        }
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ScheduleError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, ScheduleError> {
        Ok(serde_json::from_str(json)?)
    }
}
