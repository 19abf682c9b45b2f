//! Build configuration.
//!
//! Recognized fields (JSON, camelCase):
//!
//! | Field | Type | Default | Notes |
//! |-------|------|---------|-------|
//! | `algorithm` | `"FCFS"` \| `"SJF"` \| `"RR"` | `"FCFS"` | |
//! | `quantum` | number | 1 | RR only, floored to ≥ 1 |
//! | `startAt` | number | 0 | Initial cursor offset |

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ScheduleError;

/// Scheduling discipline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// First-Come First-Served (non-preemptive).
    #[default]
    #[serde(rename = "FCFS")]
    Fcfs,
    /// Shortest Job First (non-preemptive).
    #[serde(rename = "SJF")]
    Sjf,
    /// Round Robin (preemptive, fixed quantum).
    #[serde(rename = "RR")]
    RoundRobin,
}

impl Algorithm {
    /// Short name as used in configuration.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::Sjf => "SJF",
            Self::RoundRobin => "RR",
        }
    }

    /// Whether a running process can be interrupted.
    pub fn is_preemptive(&self) -> bool {
        matches!(self, Self::RoundRobin)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Minimum Round Robin quantum.
pub const MIN_QUANTUM: f64 = 1.0;

/// Clamps a caller-supplied quantum to `>= MIN_QUANTUM`.
///
/// Non-finite values fall back to the minimum.
pub fn effective_quantum(quantum: f64) -> f64 {
    if quantum.is_finite() {
        quantum.max(MIN_QUANTUM)
    } else {
        MIN_QUANTUM
    }
}

fn default_quantum() -> f64 {
    MIN_QUANTUM
}

/// Algorithm selection plus playback offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleConfig {
    /// Scheduling discipline.
    #[serde(default)]
    pub algorithm: Algorithm,
    /// Round Robin time slice. Ignored by FCFS and SJF.
    #[serde(default = "default_quantum")]
    pub quantum: f64,
    /// Initial cursor position, clamped to `[0, t_end]` at build time.
    #[serde(default)]
    pub start_at: f64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            quantum: MIN_QUANTUM,
            start_at: 0.0,
        }
    }
}

impl ScheduleConfig {
    /// Creates a config for the given algorithm.
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }

    /// Sets the Round Robin quantum.
    pub fn with_quantum(mut self, quantum: f64) -> Self {
        self.quantum = quantum;
        self
    }

    /// Sets the initial cursor offset.
    pub fn with_start_at(mut self, start_at: f64) -> Self {
        self.start_at = start_at;
        self
    }

    /// Quantum after clamping.
    pub fn effective_quantum(&self) -> f64 {
        effective_quantum(self.quantum)
    }

    /// Parses a JSON configuration object.
    pub fn from_json(json: &str) -> Result<Self, ScheduleError> {
        Ok(serde_json::from_str(json)?)
    }
}
