//! Playback cursor over a built timeline.
//!
//! The cursor tracks a simulated time in `[0, t_end]` and a play state.
//! It never touches the timeline itself; callers combine
//! [`Playback::sim_time`] with the timeline queries to render a frame.
//!
//! # States
//!
//! | From | Operation | To |
//! |------|-----------|----|
//! | any | `load` | Ready |
//! | Ready / Paused | `play` | Playing |
//! | Playing | `pause` | Paused |
//! | Ready / Paused / Playing | `step` | unchanged |
//! | any | `reset` | Ready (Idle if never loaded) |
//! | any | `unload` | Idle |
//! | Playing | `advance` hits `t_end` | Paused |
//!
//! Time advances only through explicit calls; the host decides how
//! often to call [`Playback::advance`] (frame callback, fixed tick, test).

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ScheduleError;

/// Cursor play state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No schedule loaded.
    #[default]
    Idle,
    /// Loaded, not yet played.
    Ready,
    Playing,
    Paused,
}

/// Simulated-time cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct Playback {
    sim_time: f64,
    t_end: f64,
    state: PlaybackState,
    speed: f64,
    scale: f64,
}

impl Default for Playback {
    fn default() -> Self {
        Self::new()
    }
}

impl Playback {
    /// Default step size for [`Playback::step`].
    pub const DEFAULT_STEP: f64 = 1.0;

    /// Creates an idle cursor (speed 1, one sim unit per real second).
    pub fn new() -> Self {
        Self {
            sim_time: 0.0,
            t_end: 0.0,
            state: PlaybackState::Idle,
            speed: 1.0,
            scale: 1.0,
        }
    }

    /// Sets how many simulated units elapse per real second at speed 1.
    ///
    /// Non-finite or non-positive values are ignored.
    pub fn with_scale(mut self, scale: f64) -> Self {
        if scale.is_finite() && scale > 0.0 {
            self.scale = scale;
        }
        self
    }

    /// Current simulated time.
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    /// End of the loaded timeline.
    pub fn t_end(&self) -> f64 {
        self.t_end
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Whether the cursor is advancing with [`Playback::advance`].
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Whether the cursor sits at the end of the timeline.
    pub fn is_finished(&self) -> bool {
        self.state != PlaybackState::Idle && self.sim_time >= self.t_end
    }

    /// Fraction of the timeline elapsed (0.0..1.0).
    pub fn progress(&self) -> f64 {
        if self.t_end > 0.0 {
            self.sim_time / self.t_end
        } else {
            0.0
        }
    }

    /// Loads a timeline of length `t_end`, placing the cursor at `start_at`.
    ///
    /// `start_at` is clamped to `[0, t_end]`; NaN counts as 0.
    pub fn load(&mut self, t_end: f64, start_at: f64) {
        self.t_end = t_end.max(0.0);
        self.sim_time = self.clamp(start_at);
        self.state = PlaybackState::Ready;
    }

    /// Drops the loaded timeline, keeping speed and scale.
    pub fn unload(&mut self) {
        self.sim_time = 0.0;
        self.t_end = 0.0;
        self.state = PlaybackState::Idle;
    }

    /// Starts playing. Returns whether the state changed.
    pub fn play(&mut self) -> bool {
        match self.state {
            PlaybackState::Ready | PlaybackState::Paused => {
                self.state = PlaybackState::Playing;
                true
            }
            PlaybackState::Idle | PlaybackState::Playing => false,
        }
    }

    /// Pauses playback. Returns whether the state changed.
    pub fn pause(&mut self) -> bool {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
            true
        } else {
            false
        }
    }

    /// Steps forward by [`Playback::DEFAULT_STEP`].
    pub fn step(&mut self) -> f64 {
        self.step_by(Self::DEFAULT_STEP)
    }

    /// Moves the cursor by `delta`, clamped to `[0, t_end]`.
    ///
    /// Play state is unchanged. No-op while idle. Returns the new time.
    pub fn step_by(&mut self, delta: f64) -> f64 {
        if self.state != PlaybackState::Idle && delta.is_finite() {
            self.sim_time = self.clamp(self.sim_time + delta);
        }
        self.sim_time
    }

    /// Rewinds to 0 and stops playing.
    pub fn reset(&mut self) {
        self.sim_time = 0.0;
        if self.state != PlaybackState::Idle {
            self.state = PlaybackState::Ready;
        }
    }

    /// Sets playback speed. Must be finite and positive.
    pub fn set_speed(&mut self, speed: f64) -> Result<(), ScheduleError> {
        if !(speed.is_finite() && speed > 0.0) {
            return Err(ScheduleError::InvalidSpeed(speed));
        }
        self.speed = speed;
        Ok(())
    }

    /// Advances by `real_dt` of wall-clock time while playing.
    ///
    /// Simulated time grows by `real_dt × speed × scale`, clamped to
    /// `t_end`. Reaching `t_end` pauses playback. Returns whether the
    /// cursor moved.
    pub fn advance(&mut self, real_dt: Duration) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }

        let before = self.sim_time;
        let target = before + real_dt.as_secs_f64() * self.speed * self.scale;
        self.sim_time = self.clamp(target);

        if target >= self.t_end {
            self.state = PlaybackState::Paused;
            tracing::debug!(t_end = self.t_end, "Playback reached end of timeline");
        }

        self.sim_time > before
    }

    fn clamp(&self, t: f64) -> f64 {
        if t.is_nan() {
            return 0.0;
        }
        t.clamp(0.0, self.t_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(t_end: f64) -> Playback {
        let mut p = Playback::new();
        p.load(t_end, 0.0);
        p
    }

    #[test]
    fn test_initial_state() {
        let p = Playback::new();
        assert_eq!(p.state(), PlaybackState::Idle);
        assert_eq!(p.sim_time(), 0.0);
        assert!(!p.is_finished());
    }

    #[test]
    fn test_load_clamps_start() {
        let mut p = Playback::new();
        p.load(10.0, 25.0);
        assert_eq!(p.state(), PlaybackState::Ready);
        assert_eq!(p.sim_time(), 10.0);

        p.load(10.0, -4.0);
        assert_eq!(p.sim_time(), 0.0);

        p.load(10.0, f64::NAN);
        assert_eq!(p.sim_time(), 0.0);

        p.load(10.0, 3.5);
        assert_eq!(p.sim_time(), 3.5);
    }

    #[test]
    fn test_play_pause_transitions() {
        let mut p = Playback::new();
        assert!(!p.play()); // idle

        p.load(10.0, 0.0);
        assert!(p.play());
        assert!(p.is_playing());
        assert!(!p.play()); // already playing

        assert!(p.pause());
        assert_eq!(p.state(), PlaybackState::Paused);
        assert!(!p.pause());

        assert!(p.play());
        assert!(p.is_playing());
    }

    #[test]
    fn test_step_keeps_state_and_clamps() {
        let mut p = loaded(2.5);
        assert_eq!(p.step(), 1.0);
        assert_eq!(p.state(), PlaybackState::Ready);
        p.play();
        assert_eq!(p.step(), 2.0);
        assert!(p.is_playing());
        assert_eq!(p.step(), 2.5);
        assert_eq!(p.step_by(-10.0), 0.0);
        assert_eq!(p.step_by(f64::NAN), 0.0);
    }

    #[test]
    fn test_unload_returns_to_idle() {
        let mut playback = Playback::new().with_scale(4.0);
        playback.set_speed(2.0).unwrap();
        playback.load(10.0, 3.0);
        playback.play();

        playback.unload();
        assert_eq!(playback.state(), PlaybackState::Idle);
        assert_eq!(playback.sim_time(), 0.0);
        assert_eq!(playback.t_end(), 0.0);
        assert_eq!(playback.speed(), 2.0);
        assert_eq!(playback.scale(), 4.0);
        assert!(!playback.play());
        assert_eq!(playback.step(), 0.0);
    }

    #[test]
    fn test_step_idle_is_noop() {
        let mut p = Playback::new();
        assert_eq!(p.step(), 0.0);
        assert_eq!(p.state(), PlaybackState::Idle);
    }

    #[test]
    fn test_reset() {
        let mut p = loaded(10.0);
        p.step_by(4.0);
        p.play();
        p.reset();
        assert_eq!(p.sim_time(), 0.0);
        assert_eq!(p.state(), PlaybackState::Ready);

        let mut idle = Playback::new();
        idle.reset();
        assert_eq!(idle.state(), PlaybackState::Idle);
    }

    #[test]
    fn test_advance_only_while_playing() {
        let mut p = loaded(10.0);
        assert!(!p.advance(Duration::from_secs(1)));
        assert_eq!(p.sim_time(), 0.0);

        p.play();
        assert!(p.advance(Duration::from_millis(500)));
        assert!((p.sim_time() - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_advance_speed_and_scale() {
        let mut p = Playback::new().with_scale(4.0);
        p.load(100.0, 0.0);
        p.set_speed(2.5).unwrap();
        p.play();
        p.advance(Duration::from_secs(1));
        assert!((p.sim_time() - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_advance_clamps_and_auto_pauses() {
        let mut p = loaded(3.0);
        p.play();
        p.advance(Duration::from_secs(2));
        assert!(p.is_playing());
        assert!(p.advance(Duration::from_secs(5)));
        assert_eq!(p.sim_time(), 3.0);
        assert_eq!(p.state(), PlaybackState::Paused);
        assert!(p.is_finished());
        assert_eq!(p.progress(), 1.0);
    }

    #[test]
    fn test_invalid_speed() {
        let mut p = loaded(3.0);
        assert!(matches!(p.set_speed(0.0), Err(ScheduleError::InvalidSpeed(_))));
        assert!(p.set_speed(-1.0).is_err());
        assert!(p.set_speed(f64::INFINITY).is_err());
        assert_eq!(p.speed(), 1.0);
    }

    #[test]
    fn test_with_scale_ignores_invalid() {
        assert_eq!(Playback::new().with_scale(0.0).scale(), 1.0);
        assert_eq!(Playback::new().with_scale(f64::NAN).scale(), 1.0);
    }

    #[test]
    fn test_zero_length_timeline() {
        let mut p = loaded(0.0);
        assert_eq!(p.progress(), 0.0);
        p.play();
        p.advance(Duration::from_millis(16));
        assert_eq!(p.sim_time(), 0.0);
        assert_eq!(p.state(), PlaybackState::Paused);
    }
}
