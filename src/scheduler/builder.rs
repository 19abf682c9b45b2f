//! Timeline construction for FCFS, SJF and Round Robin.
//!
//! # Algorithm
//!
//! 1. Stable-sort processes by arrival (ties keep insertion order).
//! 2. Start the clock at t=0.
//! 3. Whenever nothing is ready before the next arrival, emit one idle
//!    segment up to that arrival.
//! 4. Dispatch according to the discipline until every process is done.
//!
//! # Complexity
//! FCFS and RR: O(n log n + s) where s = emitted segments.
//! SJF: O(n²) rule evaluations in the worst case (ready set rescans).
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3

use std::collections::VecDeque;

use crate::dispatching::RuleEngine;
use crate::models::{
    arrival_order, effective_quantum, Algorithm, Process, ScheduleConfig, Timeline, MIN_QUANTUM,
    TIME_EPSILON,
};

/// Builds execution timelines from a process set.
///
/// Deterministic: identical inputs always yield an identical timeline.
/// Total over any process list; an empty list yields an empty timeline.
///
/// # Example
///
/// ```
/// use cpu_sched_sim::models::{Algorithm, Process};
/// use cpu_sched_sim::scheduler::TimelineBuilder;
///
/// let processes = vec![
///     Process::new("P1", 0.0, 6.0),
///     Process::new("P2", 2.0, 4.0),
/// ];
/// let timeline = TimelineBuilder::new(Algorithm::RoundRobin)
///     .with_quantum(2.0)
///     .build(&processes);
/// assert_eq!(timeline.t_end(), 10.0);
/// ```
#[derive(Debug, Clone)]
pub struct TimelineBuilder {
    algorithm: Algorithm,
    quantum: f64,
    rule_engine: RuleEngine,
}

impl TimelineBuilder {
    /// Creates a builder for the given discipline.
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            quantum: MIN_QUANTUM,
            rule_engine: RuleEngine::shortest_job_first(),
        }
    }

    /// Creates a builder from a build configuration.
    pub fn from_config(config: &ScheduleConfig) -> Self {
        Self::new(config.algorithm).with_quantum(config.quantum)
    }

    /// Sets the Round Robin quantum. Values below 1 are raised to 1.
    pub fn with_quantum(mut self, quantum: f64) -> Self {
        self.quantum = effective_quantum(quantum);
        self
    }

    /// Sets the rule engine used to pick among ready processes in SJF.
    ///
    /// Dispatch stays non-preemptive; only the selection order changes.
    pub fn with_rule_engine(mut self, engine: RuleEngine) -> Self {
        self.rule_engine = engine;
        self
    }

    /// Configured discipline.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Effective quantum.
    pub fn quantum(&self) -> f64 {
        self.quantum
    }

    /// Builds the timeline.
    pub fn build(&self, processes: &[Process]) -> Timeline {
        let timeline = match self.algorithm {
            Algorithm::Fcfs => self.build_fcfs(processes),
            Algorithm::Sjf => self.build_sjf(processes),
            Algorithm::RoundRobin => self.build_round_robin(processes),
        };

        tracing::debug!(
            algorithm = %self.algorithm,
            quantum = self.quantum,
            processes = processes.len(),
            segments = timeline.len(),
            t_end = timeline.t_end(),
            "Built timeline"
        );

        timeline
    }

    fn build_fcfs(&self, processes: &[Process]) -> Timeline {
        let mut timeline = Timeline::new();
        let mut time = 0.0_f64;

        for idx in arrival_order(processes) {
            let process = &processes[idx];
            if time < process.arrival {
                timeline.push_idle(time, process.arrival);
                time = process.arrival;
            }
            let end = time + process.burst;
            timeline.push_run(process.pid.clone(), time, end);
            time = end;
        }

        timeline
    }

    fn build_sjf(&self, processes: &[Process]) -> Timeline {
        let mut timeline = Timeline::new();
        let mut incoming: VecDeque<usize> = arrival_order(processes).into();
        // Kept in admission order so full ties resolve by insertion order.
        let mut ready: Vec<usize> = Vec::new();
        let mut completed = 0usize;
        let mut time = 0.0_f64;

        loop {
            admit_arrived(processes, &mut incoming, time, |next| ready.push(next));

            if ready.is_empty() {
                if idle_until_next_arrival(processes, &incoming, &mut timeline, &mut time) {
                    continue;
                }
                break;
            }

            let candidates: Vec<&Process> = ready.iter().map(|&idx| &processes[idx]).collect();
            let Some(pos) = self.rule_engine.select(&candidates) else {
                break;
            };
            let idx = ready.remove(pos);

            // Runs to completion even if a shorter job arrives meanwhile.
            let end = time + processes[idx].burst;
            timeline.push_run(processes[idx].pid.clone(), time, end);
            time = end;
            completed += 1;
        }

        debug_assert_eq!(
            completed,
            processes.len(),
            "SJF stopped with processes neither ready nor incoming"
        );
        timeline
    }

    fn build_round_robin(&self, processes: &[Process]) -> Timeline {
        let quantum = self.quantum;
        let mut timeline = Timeline::new();
        let mut incoming: VecDeque<usize> = arrival_order(processes).into();
        let mut queue: VecDeque<usize> = VecDeque::new();
        let mut remaining: Vec<f64> = processes.iter().map(|p| p.burst).collect();
        let mut completed = 0usize;
        let mut time = 0.0_f64;

        admit_arrived(processes, &mut incoming, time, |next| queue.push_back(next));

        loop {
            let Some(idx) = queue.pop_front() else {
                if idle_until_next_arrival(processes, &incoming, &mut timeline, &mut time) {
                    admit_arrived(processes, &mut incoming, time, |next| queue.push_back(next));
                    continue;
                }
                break;
            };

            let run = quantum.min(remaining[idx]);
            let end = time + run;
            timeline.push_run(processes[idx].pid.clone(), time, end);
            time = end;
            remaining[idx] -= run;

            // New arrivals queue ahead of the returning process.
            admit_arrived(processes, &mut incoming, time, |next| queue.push_back(next));
            if remaining[idx] > TIME_EPSILON {
                queue.push_back(idx);
            } else {
                completed += 1;
            }
        }

        debug_assert_eq!(
            completed,
            processes.len(),
            "Round Robin stopped with processes neither queued nor incoming"
        );
        timeline
    }
}

/// Builds a timeline without constructing a [`TimelineBuilder`] explicitly.
///
/// `quantum` is only used by Round Robin.
pub fn build_timeline(algorithm: Algorithm, processes: &[Process], quantum: f64) -> Timeline {
    TimelineBuilder::new(algorithm)
        .with_quantum(quantum)
        .build(processes)
}

/// Moves every incoming process with `arrival <= time` into the ready
/// structure, preserving arrival order.
fn admit_arrived(
    processes: &[Process],
    incoming: &mut VecDeque<usize>,
    time: f64,
    mut admit: impl FnMut(usize),
) {
    while let Some(&idx) = incoming.front() {
        if !processes[idx].has_arrived(time) {
            break;
        }
        incoming.pop_front();
        admit(idx);
    }
}

/// Idles the CPU until the next incoming arrival.
///
/// Returns `false` when nothing is left to arrive.
fn idle_until_next_arrival(
    processes: &[Process],
    incoming: &VecDeque<usize>,
    timeline: &mut Timeline,
    time: &mut f64,
) -> bool {
    let Some(&next) = incoming.front() else {
        return false;
    };
    let arrival = processes[next].arrival;
    timeline.push_idle(*time, arrival);
    *time = time.max(arrival);
    true
}
