//! CPU scheduling domain models.
//!
//! Provides the data types for scheduling inputs (processes, build
//! configuration) and outputs (timeline segments).
//!
//! # Domain Mappings
//!
//! | cpu-sched-sim | OS textbook | Gantt chart |
//! |---------------|-------------|-------------|
//! | Process | Job / PCB | Row label |
//! | TimelineSegment | CPU burst slice | Bar |
//! | Timeline | Dispatch trace | Chart |

mod config;
mod process;
mod timeline;

pub use config::{effective_quantum, Algorithm, ScheduleConfig, MIN_QUANTUM};
pub use process::Process;
pub use timeline::{Timeline, TimelineSegment, Violation, ViolationType};

pub(crate) use process::arrival_order;
pub(crate) use timeline::TIME_EPSILON;
