//! Timeline (solution) model.
//!
//! A timeline is the ordered sequence of CPU segments produced by a
//! scheduling algorithm. Segments cover `[0, t_end]` without overlap;
//! windows where nothing is ready are covered by explicit idle segments.
//!
//! The timeline is produced once per build and is read-only afterwards.
//! All point-in-time queries used by playback live here as pure reads.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Process;

/// Tolerance for comparing accumulated simulation times.
pub(crate) const TIME_EPSILON: f64 = 1e-9;

/// A contiguous interval of CPU time.
///
/// `pid == None` marks an idle segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSegment {
    /// Running process, or `None` when the CPU is idle.
    pub pid: Option<String>,
    /// Start time (inclusive).
    pub start: f64,
    /// End time (exclusive).
    pub end: f64,
}

impl TimelineSegment {
    /// Creates a segment for a running process.
    pub fn run(pid: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            pid: Some(pid.into()),
            start,
            end,
        }
    }

    /// Creates an idle segment.
    pub fn idle(start: f64, end: f64) -> Self {
        Self {
            pid: None,
            start,
            end,
        }
    }

    /// Segment length.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether this is an idle segment.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.pid.is_none()
    }

    /// Whether `t` falls in `[start, end)`.
    #[inline]
    pub fn contains(&self, t: f64) -> bool {
        self.start <= t && t < self.end
    }

    /// Whether this segment belongs to `pid`.
    #[inline]
    pub fn is_for(&self, pid: &str) -> bool {
        self.pid.as_deref() == Some(pid)
    }
}

/// An ordered, gap-free sequence of segments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    /// Segments in time order.
    pub segments: Vec<TimelineSegment>,
}

/// A timeline integrity violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related process ID, or the segment index for structural problems.
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of timeline integrity violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Uncovered window between two segments (or before the first one).
    Gap,
    /// Two segments share time.
    Overlap,
    /// Segment with `start >= end` or non-finite bounds.
    EmptySegment,
    /// Segment references a pid that is not in the process set.
    UnknownProcess,
    /// A process runs before it arrives.
    EarlyStart,
    /// Segment durations of a process do not sum to its burst.
    BurstMismatch,
    /// A process has no segments at all.
    Unscheduled,
}

impl Violation {
    fn new(
        violation_type: ViolationType,
        entity_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violation_type,
            entity_id: entity_id.into(),
            message: message.into(),
        }
    }
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing segment list.
    pub fn from_segments(segments: Vec<TimelineSegment>) -> Self {
        Self { segments }
    }

    /// Appends a run segment.
    pub fn push_run(&mut self, pid: impl Into<String>, start: f64, end: f64) {
        self.segments.push(TimelineSegment::run(pid, start, end));
    }

    /// Appends an idle segment covering `[start, end)`.
    ///
    /// Zero-length (or inverted) windows are skipped. Returns whether a
    /// segment was emitted.
    pub fn push_idle(&mut self, start: f64, end: f64) -> bool {
        if end > start {
            self.segments.push(TimelineSegment::idle(start, end));
            true
        } else {
            false
        }
    }

    /// End of the final segment, 0 for an empty timeline.
    pub fn t_end(&self) -> f64 {
        self.segments.last().map_or(0.0, |s| s.end)
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the timeline has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterates over segments in time order.
    pub fn iter(&self) -> std::slice::Iter<'_, TimelineSegment> {
        self.segments.iter()
    }

    /// Returns all segments of a process.
    pub fn segments_for(&self, pid: &str) -> Vec<&TimelineSegment> {
        self.segments.iter().filter(|s| s.is_for(pid)).collect()
    }

    /// Start of the first segment of a process.
    pub fn first_start(&self, pid: &str) -> Option<f64> {
        self.segments.iter().find(|s| s.is_for(pid)).map(|s| s.start)
    }

    /// End of the last segment of a process.
    pub fn last_end(&self, pid: &str) -> Option<f64> {
        self.segments
            .iter()
            .rev()
            .find(|s| s.is_for(pid))
            .map(|s| s.end)
    }

    /// Total time spent running processes.
    pub fn busy_time(&self) -> f64 {
        self.segments
            .iter()
            .filter(|s| !s.is_idle())
            .map(TimelineSegment::duration)
            .sum()
    }

    /// Total idle time.
    pub fn idle_time(&self) -> f64 {
        self.segments
            .iter()
            .filter(|s| s.is_idle())
            .map(TimelineSegment::duration)
            .sum()
    }

    /// Segment covering time `t` (idle or not).
    pub fn segment_at(&self, t: f64) -> Option<&TimelineSegment> {
        // Segments are ordered and disjoint, so ends are increasing.
        let idx = self.segments.partition_point(|s| s.end <= t);
        self.segments.get(idx).filter(|s| s.contains(t))
    }

    /// Pid of the process running at time `t`.
    pub fn running_at(&self, t: f64) -> Option<&str> {
        self.segment_at(t).and_then(|s| s.pid.as_deref())
    }

    /// Processes that are ready (arrived, unfinished, not running) at `t`.
    ///
    /// Returned in arrival order; arrival ties keep input order.
    pub fn ready_at<'a>(&self, processes: &'a [Process], t: f64) -> Vec<&'a Process> {
        let running = self.running_at(t);
        super::process::arrival_order(processes)
            .into_iter()
            .map(|i| &processes[i])
            .filter(|p| p.has_arrived(t))
            .filter(|p| self.last_end(&p.pid).map_or(true, |finish| t < finish))
            .filter(|p| running != Some(p.pid.as_str()))
            .collect()
    }

    /// Portion of the timeline that has elapsed by time `t`.
    ///
    /// Segments starting before `t` are kept; the in-progress segment is
    /// clipped to end at `t`.
    pub fn visible_prefix(&self, t: f64) -> Timeline {
        let segments = self
            .segments
            .iter()
            .take_while(|s| s.start < t)
            .map(|s| TimelineSegment {
                pid: s.pid.clone(),
                start: s.start,
                end: s.end.min(t),
            })
            .collect();
        Timeline { segments }
    }

    /// Checks coverage, ordering and per-process conservation.
    ///
    /// Returns every violation found; an empty list means the timeline
    /// covers `[0, t_end]` and gives each process exactly its burst.
    pub fn check_integrity(&self, processes: &[Process]) -> Vec<Violation> {
        let mut violations = Vec::new();
        let by_pid: HashMap<&str, &Process> =
            processes.iter().map(|p| (p.pid.as_str(), p)).collect();
        let mut served: HashMap<&str, f64> = HashMap::new();

        let mut cursor = 0.0_f64;
        for (idx, seg) in self.segments.iter().enumerate() {
            let entity = seg.pid.clone().unwrap_or_else(|| format!("#{idx}"));

            if !(seg.start.is_finite() && seg.end.is_finite()) || seg.start >= seg.end {
                violations.push(Violation::new(
                    ViolationType::EmptySegment,
                    &entity,
                    format!("Segment {idx} spans [{}, {})", seg.start, seg.end),
                ));
            }

            if seg.start > cursor + TIME_EPSILON {
                violations.push(Violation::new(
                    ViolationType::Gap,
                    &entity,
                    format!("Uncovered window [{cursor}, {}) before segment {idx}", seg.start),
                ));
            } else if seg.start < cursor - TIME_EPSILON {
                violations.push(Violation::new(
                    ViolationType::Overlap,
                    &entity,
                    format!("Segment {idx} starts at {} before {cursor}", seg.start),
                ));
            }
            cursor = cursor.max(seg.end);

            let Some(pid) = seg.pid.as_deref() else {
                continue;
            };
            match by_pid.get(pid) {
                Some(process) => {
                    if seg.start < process.arrival - TIME_EPSILON {
                        violations.push(Violation::new(
                            ViolationType::EarlyStart,
                            pid,
                            format!(
                                "Process '{pid}' runs at {} before arriving at {}",
                                seg.start, process.arrival
                            ),
                        ));
                    }
                    *served.entry(pid).or_insert(0.0) += seg.duration();
                }
                None => violations.push(Violation::new(
                    ViolationType::UnknownProcess,
                    pid,
                    format!("Segment {idx} references unknown process '{pid}'"),
                )),
            }
        }

        for process in processes {
            match served.get(process.pid.as_str()) {
                None => violations.push(Violation::new(
                    ViolationType::Unscheduled,
                    &process.pid,
                    format!("Process '{}' has no timeline segments", process.pid),
                )),
                Some(&total) => {
                    let tolerance = TIME_EPSILON * process.burst.max(1.0) * 1e3;
                    if (total - process.burst).abs() > tolerance {
                        violations.push(Violation::new(
                            ViolationType::BurstMismatch,
                            &process.pid,
                            format!(
                                "Process '{}' received {total} of burst {}",
                                process.pid, process.burst
                            ),
                        ));
                    }
                }
            }
        }

        violations
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a TimelineSegment;
    type IntoIter = std::slice::Iter<'a, TimelineSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_timeline() -> Timeline {
        let mut t = Timeline::new();
        t.push_idle(0.0, 1.0);
        t.push_run("P1", 1.0, 3.0);
        t.push_run("P2", 3.0, 5.0);
        t.push_run("P1", 5.0, 6.0);
        t
    }

    fn sample_processes() -> Vec<Process> {
        vec![Process::new("P1", 1.0, 3.0), Process::new("P2", 2.0, 2.0)]
    }

    #[test]
    fn test_t_end() {
        assert_eq!(sample_timeline().t_end(), 6.0);
        assert_eq!(Timeline::new().t_end(), 0.0);
    }

    #[test]
    fn test_push_idle_skips_zero_length() {
        let mut t = Timeline::new();
        assert!(!t.push_idle(2.0, 2.0));
        assert!(t.is_empty());
        assert!(t.push_idle(0.0, 2.0));
        assert_eq!(t.len(), 1);
        assert!(t.segments[0].is_idle());
    }

    #[test]
    fn test_first_and_last() {
        let t = sample_timeline();
        assert_eq!(t.first_start("P1"), Some(1.0));
        assert_eq!(t.last_end("P1"), Some(6.0));
        assert_eq!(t.segments_for("P1").len(), 2);
        assert_eq!(t.first_start("P9"), None);
    }

    #[test]
    fn test_busy_and_idle_time() {
        let t = sample_timeline();
        assert!((t.busy_time() - 5.0).abs() < 1e-10);
        assert!((t.idle_time() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_running_at() {
        let t = sample_timeline();
        assert_eq!(t.running_at(0.5), None); // idle
        assert_eq!(t.running_at(1.0), Some("P1"));
        assert_eq!(t.running_at(2.999), Some("P1"));
        assert_eq!(t.running_at(3.0), Some("P2"));
        assert_eq!(t.running_at(5.5), Some("P1"));
        assert_eq!(t.running_at(6.0), None); // end is exclusive
        assert_eq!(t.running_at(-1.0), None);
    }

    fn ready_pids(t: &Timeline, processes: &[Process], at: f64) -> Vec<String> {
        t.ready_at(processes, at).iter().map(|p| p.pid.clone()).collect()
    }

    #[test]
    fn test_ready_at() {
        let t = sample_timeline();
        let processes = sample_processes();

        // P2 arrived at 2 but P1 is running
        assert_eq!(ready_pids(&t, &processes, 2.5), vec!["P2"]);

        // P2 running, P1 preempted and waiting
        assert_eq!(ready_pids(&t, &processes, 4.0), vec!["P1"]);

        // P2 finished at 5
        assert!(t.ready_at(&processes, 5.0).is_empty());
        // Nothing arrived yet
        assert!(t.ready_at(&processes, 0.5).is_empty());
    }

    #[test]
    fn test_visible_prefix_clips_in_progress() {
        let t = sample_timeline();
        let prefix = t.visible_prefix(4.0);
        assert_eq!(prefix.len(), 3);
        assert_eq!(prefix.segments[2], TimelineSegment::run("P2", 3.0, 4.0));

        let exact = t.visible_prefix(3.0);
        assert_eq!(exact.len(), 2);
        assert_eq!(exact.t_end(), 3.0);

        assert!(t.visible_prefix(0.0).is_empty());
        assert_eq!(t.visible_prefix(100.0), t);
    }

    #[test]
    fn test_integrity_ok() {
        assert!(sample_timeline().check_integrity(&sample_processes()).is_empty());
    }

    #[test]
    fn test_integrity_gap_and_overlap() {
        let t = Timeline::from_segments(vec![
            TimelineSegment::run("P1", 1.0, 3.0), // gap from 0
            TimelineSegment::run("P2", 2.5, 4.5), // overlap
        ]);
        let processes = vec![Process::new("P1", 0.0, 2.0), Process::new("P2", 0.0, 2.0)];
        let kinds: Vec<ViolationType> = t
            .check_integrity(&processes)
            .into_iter()
            .map(|v| v.violation_type)
            .collect();
        assert!(kinds.contains(&ViolationType::Gap));
        assert!(kinds.contains(&ViolationType::Overlap));
    }

    #[test]
    fn test_integrity_conservation() {
        let t = Timeline::from_segments(vec![TimelineSegment::run("P1", 0.0, 2.0)]);
        let processes = vec![Process::new("P1", 0.0, 3.0), Process::new("P2", 0.0, 1.0)];
        let violations = t.check_integrity(&processes);
        assert!(violations
            .iter()
            .any(|v| v.violation_type == ViolationType::BurstMismatch && v.entity_id == "P1"));
        assert!(violations
            .iter()
            .any(|v| v.violation_type == ViolationType::Unscheduled && v.entity_id == "P2"));
    }

    #[test]
    fn test_integrity_early_start_and_unknown() {
        let t = Timeline::from_segments(vec![
            TimelineSegment::run("P1", 0.0, 2.0),
            TimelineSegment::run("ghost", 2.0, 3.0),
        ]);
        let processes = vec![Process::new("P1", 1.0, 2.0)];
        let violations = t.check_integrity(&processes);
        assert!(violations
            .iter()
            .any(|v| v.violation_type == ViolationType::EarlyStart));
        assert!(violations
            .iter()
            .any(|v| v.violation_type == ViolationType::UnknownProcess));
    }

    #[test]
    fn test_serializes_as_array() {
        let t = Timeline::from_segments(vec![
            TimelineSegment::idle(0.0, 1.0),
            TimelineSegment::run("P1", 1.0, 2.0),
        ]);
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(
            json,
            r#"[{"pid":null,"start":0.0,"end":1.0},{"pid":"P1","start":1.0,"end":2.0}]"#
        );
    }
}
