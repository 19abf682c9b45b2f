//! Schedule performance statistics.
//!
//! Derives per-process and aggregate metrics from a completed timeline
//! and its input processes. The timeline is only read.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Turnaround | finish − arrival |
//! | Waiting | turnaround − burst |
//! | Response | first start − arrival |
//! | Throughput | processes / max(t_end, 1) |
//! | CPU Utilization | busy time / t_end |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{Process, Timeline};

/// Metrics for a single process.
///
/// Derived fields are `None` when the process has no timeline segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerProcessStats {
    pub pid: String,
    pub arrival: f64,
    pub burst: f64,
    /// Start of the first segment.
    pub start: Option<f64>,
    /// End of the last segment.
    pub finish: Option<f64>,
    pub waiting: Option<f64>,
    pub turnaround: Option<f64>,
    pub response: Option<f64>,
}

impl PerProcessStats {
    fn derive(process: &Process, start: Option<f64>, finish: Option<f64>) -> Self {
        let turnaround = finish.map(|f| f - process.arrival);
        Self {
            pid: process.pid.clone(),
            arrival: process.arrival,
            burst: process.burst,
            start,
            finish,
            waiting: turnaround.map(|t| t - process.burst),
            turnaround,
            response: start.map(|s| s - process.arrival),
        }
    }

    /// Whether the process appears in the timeline.
    pub fn is_scheduled(&self) -> bool {
        self.start.is_some() && self.finish.is_some()
    }
}

/// Metrics over the whole process set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    /// Mean turnaround over scheduled processes.
    pub avg_turnaround: f64,
    /// Mean waiting time over scheduled processes.
    pub avg_waiting: f64,
    /// Mean response time over scheduled processes.
    pub avg_response: f64,
    /// Processes completed per unit time.
    pub throughput: f64,
    /// End of the final segment.
    pub makespan: f64,
    /// Fraction of `[0, makespan]` spent running processes (0.0..1.0).
    pub cpu_utilization: f64,
    /// Processes with no segments. Non-empty means the timeline is defective.
    pub unscheduled: Vec<String>,
}

/// Per-process and aggregate statistics for one timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleStats {
    /// One entry per input process, in input order.
    pub per_process: Vec<PerProcessStats>,
    pub aggregate: AggregateStats,
}

impl ScheduleStats {
    /// Computes statistics from a timeline and its input processes.
    ///
    /// Processes missing from the timeline get `None` metrics, are left
    /// out of every average, and are listed in `aggregate.unscheduled`.
    pub fn calculate(timeline: &Timeline, processes: &[Process]) -> Self {
        // pid → (first start, last end), one scan
        let mut spans: HashMap<&str, (f64, f64)> = HashMap::new();
        for seg in timeline {
            if let Some(pid) = seg.pid.as_deref() {
                spans
                    .entry(pid)
                    .and_modify(|span| span.1 = seg.end)
                    .or_insert((seg.start, seg.end));
            }
        }

        let per_process: Vec<PerProcessStats> = processes
            .iter()
            .map(|p| {
                let span = spans.get(p.pid.as_str());
                PerProcessStats::derive(p, span.map(|s| s.0), span.map(|s| s.1))
            })
            .collect();

        let mut total_turnaround = 0.0;
        let mut total_waiting = 0.0;
        let mut total_response = 0.0;
        let mut counted = 0usize;
        let mut unscheduled = Vec::new();

        for stats in &per_process {
            match (stats.turnaround, stats.waiting, stats.response) {
                (Some(turnaround), Some(waiting), Some(response)) => {
                    total_turnaround += turnaround;
                    total_waiting += waiting;
                    total_response += response;
                    counted += 1;
                }
                _ => unscheduled.push(stats.pid.clone()),
            }
        }

        let mean = |total: f64| {
            if counted == 0 {
                0.0
            } else {
                total / counted as f64
            }
        };

        let makespan = timeline.t_end();
        let cpu_utilization = if makespan > 0.0 {
            timeline.busy_time() / makespan
        } else {
            0.0
        };

        let aggregate = AggregateStats {
            avg_turnaround: mean(total_turnaround),
            avg_waiting: mean(total_waiting),
            avg_response: mean(total_response),
            throughput: processes.len() as f64 / makespan.max(1.0),
            makespan,
            cpu_utilization,
            unscheduled,
        };

        Self {
            per_process,
            aggregate,
        }
    }

    /// Finds the statistics for a given process.
    pub fn for_pid(&self, pid: &str) -> Option<&PerProcessStats> {
        self.per_process.iter().find(|s| s.pid == pid)
    }

    /// Whether every process was scheduled.
    pub fn is_complete(&self) -> bool {
        self.aggregate.unscheduled.is_empty()
    }
}
