//! Timeline builders and statistics.
//!
//! # Algorithms
//!
//! `TimelineBuilder` implements three single-CPU disciplines:
//! - **FCFS**: arrival order, non-preemptive.
//! - **SJF**: shortest burst among ready processes, non-preemptive.
//! - **Round Robin**: FIFO queue with a fixed quantum, preemptive.
//!
//! # Statistics
//!
//! `ScheduleStats` derives turnaround, waiting and response per process,
//! plus averages, throughput and CPU utilization.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod builder;
mod stats;

pub use builder::{build_timeline, TimelineBuilder};
pub use stats::{AggregateStats, PerProcessStats, ScheduleStats};
