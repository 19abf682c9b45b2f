//! Dispatching rules and rule engine for non-preemptive selection.
//!
//! When the CPU becomes free, a non-preemptive discipline picks one
//! process among those that are ready. The rule engine makes that choice
//! composable: an ordered list of rules, each consulted only when the
//! earlier ones tie, and a final deterministic tie-breaker.
//!
//! # Usage
//!
//! ```
//! use cpu_sched_sim::dispatching::{RuleEngine, rules};
//!
//! // Shortest Job First: shortest burst, then earliest arrival.
//! let engine = RuleEngine::new()
//!     .with_rule(rules::ShortestBurst)
//!     .with_rule(rules::EarliestArrival);
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4

mod engine;
pub mod rules;

pub use engine::{RuleEngine, TieBreaker};

use crate::models::Process;
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (dispatched first).
pub type RuleScore = f64;

/// A dispatching rule that scores a ready process.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules should return smaller values
/// for processes that should run first.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "SJF", "FIFO").
    fn name(&self) -> &'static str;

    /// Scores a ready process. Lower = dispatched earlier.
    fn evaluate(&self, process: &Process) -> RuleScore;
}
