//! Process model.
//!
//! A process is a unit of CPU work to be scheduled: it becomes eligible
//! at its arrival time and needs `burst` units of CPU time to finish.

use serde::{Deserialize, Serialize};

/// A process to be scheduled.
///
/// # Time Representation
/// All times are abstract simulation units relative to t=0.
/// The consumer decides what one unit means (ms, ticks, seconds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    /// Unique process identifier.
    pub pid: String,
    /// Time at which the process becomes eligible to run.
    pub arrival: f64,
    /// Total CPU time required.
    pub burst: f64,
    /// Priority (carried through, not used by the built-in algorithms).
    #[serde(default)]
    pub priority: i32,
}

impl Process {
    /// Creates a new process.
    pub fn new(pid: impl Into<String>, arrival: f64, burst: f64) -> Self {
        Self {
            pid: pid.into(),
            arrival,
            burst,
            priority: 0,
        }
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Whether the process has arrived by time `t`.
    #[inline]
    pub fn has_arrived(&self, t: f64) -> bool {
        self.arrival <= t
    }
}

/// Returns indices of `processes` sorted by arrival.
///
/// The sort is stable, so arrival ties keep insertion order.
pub(crate) fn arrival_order(processes: &[Process]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..processes.len()).collect();
    indices.sort_by(|&a, &b| processes[a].arrival.total_cmp(&processes[b].arrival));
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_builder() {
        let p = Process::new("P1", 2.0, 5.0).with_priority(3);
        assert_eq!(p.pid, "P1");
        assert_eq!(p.arrival, 2.0);
        assert_eq!(p.burst, 5.0);
        assert_eq!(p.priority, 3);
        assert!(p.has_arrived(2.0));
        assert!(!p.has_arrived(1.5));
    }

    #[test]
    fn test_arrival_order_is_stable() {
        let processes = vec![
            Process::new("late", 4.0, 1.0),
            Process::new("A", 0.0, 1.0),
            Process::new("B", 0.0, 1.0),
            Process::new("mid", 2.0, 1.0),
        ];
        assert_eq!(arrival_order(&processes), vec![1, 2, 3, 0]);
    }

    #[test]
    fn test_deserialize_defaults_priority() {
        let p: Process = serde_json::from_str(r#"{"pid":"P1","arrival":0,"burst":3}"#).unwrap();
        assert_eq!(p, Process::new("P1", 0.0, 3.0));
    }
}
