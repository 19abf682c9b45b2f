//! Rule engine for choosing among ready processes.
//!
//! Rules are applied in order: the first rule that tells two candidates
//! apart decides, later rules only break ties.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{rules, DispatchingRule};
use crate::models::Process;

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Keep candidate order (insertion order for ready sets).
    #[default]
    InsertionOrder,
    /// Deterministic by pid (lexicographic).
    ById,
}

/// Ordered rule list with a final tie-breaker.
///
/// Scores are compared exactly, so any two distinct scores decide the
/// choice regardless of magnitude. Selection is stable: when every rule
/// ties, the earlier candidate wins unless [`TieBreaker::ById`] is set.
///
/// # Example
/// ```
/// use cpu_sched_sim::dispatching::RuleEngine;
/// use cpu_sched_sim::models::Process;
///
/// let engine = RuleEngine::shortest_job_first();
/// let a = Process::new("A", 0.0, 5.0);
/// let b = Process::new("B", 1.0, 2.0);
/// assert_eq!(engine.select(&[&a, &b]), Some(1));
/// ```
#[derive(Clone, Default)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
    tie_breaker: TieBreaker,
}

impl RuleEngine {
    /// Creates an empty rule engine. Every candidate ties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shortest burst, then earliest arrival, then insertion order.
    pub fn shortest_job_first() -> Self {
        Self::new()
            .with_rule(rules::ShortestBurst)
            .with_rule(rules::EarliestArrival)
    }

    /// Appends a rule. It is consulted only when all earlier rules tie.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Returns the position of the process to dispatch next.
    ///
    /// Among equally-scored candidates the first one wins, so callers
    /// that keep candidates in insertion order get a stable choice.
    pub fn select(&self, candidates: &[&Process]) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (idx, candidate) in candidates.iter().enumerate() {
            match best {
                None => best = Some(idx),
                Some(b) => {
                    if self.compare(candidate, candidates[b]) == Ordering::Less {
                        best = Some(idx);
                    }
                }
            }
        }
        best
    }

    fn compare(&self, a: &Process, b: &Process) -> Ordering {
        let ordering = self
            .rules
            .iter()
            .map(|rule| rule.evaluate(a).total_cmp(&rule.evaluate(b)))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal);

        // All rules tied → use final tie-breaker
        match (ordering, self.tie_breaker) {
            (Ordering::Equal, TieBreaker::ById) => a.pid.cmp(&b.pid),
            (ordering, _) => ordering,
        }
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field(
                "rules",
                &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortest_burst_wins() {
        let long = Process::new("long", 0.0, 5.0);
        let short = Process::new("short", 0.0, 1.0);
        let medium = Process::new("medium", 0.0, 3.0);
        let engine = RuleEngine::new().with_rule(rules::ShortestBurst);

        assert_eq!(engine.select(&[&long, &short, &medium]), Some(1));
        assert_eq!(engine.select(&[&long, &medium]), Some(1));
    }

    #[test]
    fn test_tiny_bursts_are_not_tied() {
        let long = Process::new("long", 0.0, 8e-10);
        let short = Process::new("short", 0.0, 1e-10);
        let engine = RuleEngine::shortest_job_first();

        assert_eq!(engine.select(&[&long, &short]), Some(1));
        assert_eq!(engine.select(&[&short, &long]), Some(0));
    }

    #[test]
    fn test_later_rule_breaks_ties() {
        let a = Process::new("A", 2.0, 4.0);
        let b = Process::new("B", 1.0, 4.0); // Same burst, earlier arrival
        let engine = RuleEngine::shortest_job_first();

        assert_eq!(engine.select(&[&a, &b]), Some(1));
    }

    #[test]
    fn test_select_is_stable_on_full_tie() {
        let a = Process::new("Z", 0.0, 3.0);
        let b = Process::new("A", 0.0, 3.0);
        let engine = RuleEngine::shortest_job_first();

        // Insertion order wins over pid order
        assert_eq!(engine.select(&[&a, &b]), Some(0));
        assert_eq!(RuleEngine::new().select(&[&a, &b]), Some(0));
    }

    #[test]
    fn test_by_id_tie_breaker() {
        let a = Process::new("Z", 0.0, 3.0);
        let b = Process::new("A", 0.0, 3.0);
        let engine = RuleEngine::shortest_job_first().with_final_tie_breaker(TieBreaker::ById);

        assert_eq!(engine.select(&[&a, &b]), Some(1));
    }

    #[test]
    fn test_empty_candidates() {
        assert!(RuleEngine::shortest_job_first().select(&[]).is_none());
    }

    #[test]
    fn test_debug_lists_rule_names() {
        let debug = format!("{:?}", RuleEngine::shortest_job_first());
        assert!(debug.contains("SJF"));
        assert!(debug.contains("FIFO"));
    }
}
