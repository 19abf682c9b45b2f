//! CPU scheduling simulator.
//!
//! Converts a process set into an execution timeline under a classic
//! single-CPU discipline, derives performance statistics from that
//! timeline, and provides a playback cursor for point-in-time queries.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `Timeline`, `TimelineSegment`,
//!   `ScheduleConfig`, `Algorithm`
//! - **`validation`**: Input checks (empty set, duplicate pids, bad bursts)
//! - **`dispatching`**: Rule engine for choosing among ready processes
//! - **`scheduler`**: `TimelineBuilder` (FCFS, SJF, RR) and `ScheduleStats`
//! - **`playback`**: Cursor state machine (play, pause, step, reset, advance)
//! - **`schedule`**: Caller-owned `Schedule` tying the pieces together
//! - **`snapshot`**: Serializable export that replays to the same timeline
//!
//! # Example
//!
//! ```
//! use cpu_sched_sim::Schedule;
//! use cpu_sched_sim::models::{Algorithm, Process, ScheduleConfig};
//!
//! let processes = vec![
//!     Process::new("P1", 0.0, 6.0),
//!     Process::new("P2", 2.0, 4.0),
//!     Process::new("P3", 4.0, 5.0),
//!     Process::new("P4", 6.0, 2.0),
//! ];
//!
//! let mut schedule = Schedule::new();
//! let stats = schedule.build(processes, ScheduleConfig::new(Algorithm::Fcfs)).unwrap();
//! assert!((stats.aggregate.avg_waiting - 4.75).abs() < 1e-9);
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

pub mod dispatching;
pub mod error;
pub mod models;
pub mod playback;
pub mod schedule;
pub mod scheduler;
pub mod snapshot;
pub mod validation;

pub use error::ScheduleError;
pub use playback::{Playback, PlaybackState};
pub use schedule::Schedule;
pub use snapshot::Snapshot;
