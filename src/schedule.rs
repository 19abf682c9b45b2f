//! Caller-owned schedule instance.
//!
//! A `Schedule` holds one process set, its build configuration, the
//! resulting timeline and statistics, and the playback cursor. Builds are
//! atomic: either every piece is replaced together, or nothing changes.

use std::time::Duration;

use crate::error::ScheduleError;
use crate::models::{Process, ScheduleConfig, Timeline};
use crate::playback::{Playback, PlaybackState};
use crate::scheduler::{ScheduleStats, TimelineBuilder};
use crate::snapshot::Snapshot;
use crate::validation::validate_processes;

#[derive(Debug, Clone, PartialEq)]
struct Built {
    timeline: Timeline,
    stats: ScheduleStats,
}

/// A simulation instance.
///
/// Single-owner: hosts that share one across threads must serialize
/// access themselves.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use cpu_sched_sim::Schedule;
/// use cpu_sched_sim::models::{Algorithm, Process, ScheduleConfig};
///
/// let mut schedule = Schedule::new();
/// schedule
///     .build(
///         vec![Process::new("P1", 0.0, 3.0), Process::new("P2", 1.0, 2.0)],
///         ScheduleConfig::new(Algorithm::Fcfs),
///     )
///     .unwrap();
///
/// schedule.play();
/// schedule.advance(Duration::from_millis(3500));
/// assert_eq!(schedule.running_process(), Some("P2"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    processes: Vec<Process>,
    config: ScheduleConfig,
    built: Option<Built>,
    playback: Playback,
}

impl Schedule {
    /// Creates an empty, unbuilt schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty schedule with a preconfigured cursor.
    ///
    /// Only speed and scale carry over; the cursor starts idle.
    pub fn with_playback(mut playback: Playback) -> Self {
        playback.unload();
        Self {
            playback,
            ..Self::default()
        }
    }

    /// Restores a schedule from a snapshot.
    ///
    /// The snapshot must replay to its stored timeline.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, ScheduleError> {
        snapshot.verify()?;
        let config = snapshot.config();
        let mut schedule = Self::new();
        schedule.build(snapshot.processes, config)?;
        Ok(schedule)
    }

    /// Validates, builds, checks and commits a new schedule.
    ///
    /// On success the timeline, statistics and cursor are replaced
    /// together and the cursor sits at `config.start_at` (clamped).
    /// On failure the previous state is left untouched.
    pub fn build(
        &mut self,
        processes: Vec<Process>,
        config: ScheduleConfig,
    ) -> Result<&ScheduleStats, ScheduleError> {
        if let Err(errors) = validate_processes(&processes) {
            tracing::warn!(errors = errors.len(), "Rejected process set");
            return Err(ScheduleError::InvalidInput(errors));
        }

        let timeline = TimelineBuilder::from_config(&config).build(&processes);

        let violations = timeline.check_integrity(&processes);
        if !violations.is_empty() {
            let mut pids: Vec<String> = violations.iter().map(|v| v.entity_id.clone()).collect();
            pids.sort();
            pids.dedup();
            tracing::warn!(
                algorithm = %config.algorithm,
                violations = violations.len(),
                "Built timeline failed integrity check"
            );
            return Err(ScheduleError::DegenerateResult {
                pids,
                details: violations.into_iter().map(|v| v.message).collect(),
            });
        }

        let stats = ScheduleStats::calculate(&timeline, &processes);

        tracing::info!(
            algorithm = %config.algorithm,
            processes = processes.len(),
            t_end = timeline.t_end(),
            avg_waiting = stats.aggregate.avg_waiting,
            "Schedule built"
        );

        self.playback.load(timeline.t_end(), config.start_at);
        self.processes = processes;
        self.config = config;
        let built = self.built.insert(Built { timeline, stats });
        Ok(&built.stats)
    }

    /// Rebuilds the current process set under a new configuration.
    pub fn rebuild_with(
        &mut self,
        config: ScheduleConfig,
    ) -> Result<&ScheduleStats, ScheduleError> {
        if self.built.is_none() {
            return Err(ScheduleError::NotBuilt);
        }
        let processes = self.processes.clone();
        self.build(processes, config)
    }

    /// Whether a build has succeeded.
    pub fn is_built(&self) -> bool {
        self.built.is_some()
    }

    /// Processes of the current build, in input order.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    pub fn timeline(&self) -> Option<&Timeline> {
        self.built.as_ref().map(|b| &b.timeline)
    }

    pub fn stats(&self) -> Option<&ScheduleStats> {
        self.built.as_ref().map(|b| &b.stats)
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut Playback {
        &mut self.playback
    }

    // ======================== Cursor control ========================

    pub fn sim_time(&self) -> f64 {
        self.playback.sim_time()
    }

    pub fn state(&self) -> PlaybackState {
        self.playback.state()
    }

    pub fn play(&mut self) -> bool {
        self.playback.play()
    }

    pub fn pause(&mut self) -> bool {
        self.playback.pause()
    }

    pub fn step(&mut self) -> f64 {
        self.playback.step()
    }

    pub fn step_by(&mut self, delta: f64) -> f64 {
        self.playback.step_by(delta)
    }

    pub fn reset(&mut self) {
        self.playback.reset()
    }

    pub fn advance(&mut self, real_dt: Duration) -> bool {
        self.playback.advance(real_dt)
    }

    pub fn set_speed(&mut self, speed: f64) -> Result<(), ScheduleError> {
        self.playback.set_speed(speed)
    }

    // ======================== Queries at the cursor ========================

    /// Process running at the cursor.
    pub fn running_process(&self) -> Option<&str> {
        self.timeline()?.running_at(self.sim_time())
    }

    /// Processes waiting for the CPU at the cursor, in arrival order.
    pub fn ready_set(&self) -> Vec<&Process> {
        match self.timeline() {
            Some(timeline) => timeline.ready_at(&self.processes, self.sim_time()),
            None => Vec::new(),
        }
    }

    /// Elapsed portion of the timeline at the cursor.
    pub fn visible_prefix(&self) -> Timeline {
        self.timeline()
            .map(|t| t.visible_prefix(self.sim_time()))
            .unwrap_or_default()
    }

    /// Exports the current build.
    pub fn snapshot(&self) -> Result<Snapshot, ScheduleError> {
        let built = self.built.as_ref().ok_or(ScheduleError::NotBuilt)?;
        Ok(Snapshot {
            algorithm: self.config.algorithm,
            quantum: self.config.effective_quantum(),
            start_at: self.config.start_at,
            processes: self.processes.clone(),
            timeline: built.timeline.clone(),
            stats: built.stats.clone(),
        })
    }
}
