//! Playback clock for a loaded plan.
//!
//! A [`Timeline`] owns the current plan time and the play/pause state. It
//! knows nothing about actions or events; the [`crate::Player`] asks it for
//! the time and reconciles everything else against that value.
//!
//! # Invariants
//!
//! 1. `0.0 <= current_time() <= total_duration()` at all times.
//! 2. Time advances only while [`PlaybackState::Playing`].
//! 3. Reaching `total_duration` while playing leaves the timeline Stopped or
//!    Paused (per [`EndBehavior`]) with the time clamped to the end.
//! 4. `seek` never changes the playback state.
//!
//! # Failure Modes
//!
//! - `play()` without a loaded plan returns `false` and changes nothing.
//! - Non-finite seek targets are treated as 0.
//! - A non-positive or non-finite speed is rejected by [`Timeline::set_speed`].
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//! use planscope_config::PlaybackConfig;
//! use planscope_player::{PlaybackState, Timeline};
//!
//! let mut timeline = Timeline::new(&PlaybackConfig::default());
//! timeline.load(10.0);
//! assert!(timeline.play());
//!
//! timeline.advance(Duration::from_secs(4));
//! assert_eq!(timeline.current_time(), 4.0);
//!
//! timeline.advance(Duration::from_secs(20));
//! assert_eq!(timeline.current_time(), 10.0);
//! assert_eq!(timeline.state(), PlaybackState::Stopped);
//! ```

use std::fmt;
use std::time::{Duration, Instant};

use planscope_config::{EndBehavior, PlaybackConfig};
use tracing::{debug, info};

/// Playback state of a [`Timeline`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlaybackState {
    /// Not advancing; the initial state and the state after `reset`.
    #[default]
    Stopped,
    /// Advancing by `elapsed * speed` on every tick.
    Playing,
    /// Not advancing; resumes from the same time.
    Paused,
}

impl PlaybackState {
    pub fn tag(self) -> &'static str {
        match self {
            PlaybackState::Stopped => "stopped",
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused",
        }
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Seekable plan clock.
#[derive(Debug, Clone)]
pub struct Timeline {
    total_duration: f64,
    current_time: f64,
    state: PlaybackState,
    speed: f64,
    end_behavior: EndBehavior,
    loaded: bool,
    last_tick: Option<Instant>,
}

impl Timeline {
    pub fn new(config: &PlaybackConfig) -> Self {
        Self {
            total_duration: 0.0,
            current_time: 0.0,
            state: PlaybackState::Stopped,
            speed: config.speed,
            end_behavior: config.end_behavior,
            loaded: false,
            last_tick: None,
        }
    }

    /// Loads a plan of the given length and rewinds.
    pub fn load(&mut self, total_duration: f64) {
        self.total_duration = if total_duration.is_finite() {
            total_duration.max(0.0)
        } else {
            0.0
        };
        self.loaded = true;
        self.reset();
    }

    /// Forgets the loaded plan.
    pub fn unload(&mut self) {
        self.loaded = false;
        self.total_duration = 0.0;
        self.reset();
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn end_behavior(&self) -> EndBehavior {
        self.end_behavior
    }

    /// Returns true once the clock sits at the end of a loaded plan.
    pub fn is_at_end(&self) -> bool {
        self.loaded && self.current_time >= self.total_duration
    }

    /// Fraction of the plan played, in `[0, 1]`. An empty plan counts as done.
    pub fn progress(&self) -> f64 {
        if self.total_duration <= 0.0 {
            return if self.loaded { 1.0 } else { 0.0 };
        }
        (self.current_time / self.total_duration).clamp(0.0, 1.0)
    }

    /// Changes the playback speed. Returns false for a non-positive speed.
    pub fn set_speed(&mut self, speed: f64) -> bool {
        if !(speed.is_finite() && speed > 0.0) {
            return false;
        }
        self.speed = speed;
        true
    }

    pub fn set_end_behavior(&mut self, end_behavior: EndBehavior) {
        self.end_behavior = end_behavior;
    }

    /// Stopped/Paused to Playing. Returns false when no plan is loaded.
    pub fn play(&mut self) -> bool {
        if !self.loaded {
            debug!(event = "playback", "play ignored: no plan loaded");
            return false;
        }
        if self.state != PlaybackState::Playing {
            self.transition(PlaybackState::Playing);
        }
        true
    }

    /// Playing to Paused. Returns false in any other state.
    pub fn pause(&mut self) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }
        self.transition(PlaybackState::Paused);
        true
    }

    /// Moves the clock to `time`, clamped to the plan. Returns the new time.
    pub fn seek(&mut self, time: f64) -> f64 {
        let target = if time.is_finite() { time } else { 0.0 };
        self.current_time = target.clamp(0.0, self.total_duration);
        debug!(
            event = "seek",
            requested = time,
            time = self.current_time,
            state = self.state.tag(),
        );
        self.current_time
    }

    /// Back to Stopped at time zero.
    pub fn reset(&mut self) {
        self.current_time = 0.0;
        if self.state != PlaybackState::Stopped {
            self.transition(PlaybackState::Stopped);
        }
        self.last_tick = None;
    }

    /// Advances by a wall-clock interval while playing. Returns the new time.
    pub fn advance(&mut self, elapsed: Duration) -> f64 {
        if self.state != PlaybackState::Playing {
            return self.current_time;
        }
        self.current_time += elapsed.as_secs_f64() * self.speed;
        if self.current_time >= self.total_duration {
            self.current_time = self.total_duration;
            let end_state = match self.end_behavior {
                EndBehavior::Stop => PlaybackState::Stopped,
                EndBehavior::Pause => PlaybackState::Paused,
            };
            self.transition(end_state);
        }
        self.current_time
    }

    /// Advances by the wall-clock time since the previous tick.
    ///
    /// The first tick after `play` only records `now`.
    pub fn tick(&mut self, now: Instant) -> f64 {
        if self.state != PlaybackState::Playing {
            self.last_tick = None;
            return self.current_time;
        }
        let elapsed = match self.last_tick.replace(now) {
            Some(previous) => now.saturating_duration_since(previous),
            None => Duration::ZERO,
        };
        self.advance(elapsed)
    }

    fn transition(&mut self, next: PlaybackState) {
        info!(
            event = "playback",
            from = self.state.tag(),
            to = next.tag(),
            time = self.current_time,
        );
        self.state = next;
        if next != PlaybackState::Playing {
            self.last_tick = None;
        }
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(&PlaybackConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(total: f64) -> Timeline {
        let mut timeline = Timeline::default();
        timeline.load(total);
        timeline
    }

    #[test]
    fn test_play_requires_plan() {
        let mut timeline = Timeline::default();
        assert!(!timeline.play());
        assert_eq!(timeline.state(), PlaybackState::Stopped);
    }

    #[test]
    fn test_state_transitions() {
        let mut timeline = loaded(10.0);
        assert!(!timeline.pause());
        assert!(timeline.play());
        assert!(timeline.is_playing());
        assert!(timeline.pause());
        assert_eq!(timeline.state(), PlaybackState::Paused);
        assert!(timeline.play());
        timeline.reset();
        assert_eq!(timeline.state(), PlaybackState::Stopped);
        assert_eq!(timeline.current_time(), 0.0);
    }

    #[test]
    fn test_advance_only_while_playing() {
        let mut timeline = loaded(10.0);
        timeline.advance(Duration::from_secs(3));
        assert_eq!(timeline.current_time(), 0.0);

        timeline.play();
        timeline.advance(Duration::from_millis(2500));
        assert_eq!(timeline.current_time(), 2.5);

        timeline.pause();
        timeline.advance(Duration::from_secs(3));
        assert_eq!(timeline.current_time(), 2.5);
    }

    #[test]
    fn test_speed_scales_advance() {
        let mut timeline = loaded(10.0);
        assert!(timeline.set_speed(2.0));
        assert!(!timeline.set_speed(0.0));
        assert!(!timeline.set_speed(f64::NAN));
        timeline.play();
        timeline.advance(Duration::from_secs(2));
        assert_eq!(timeline.current_time(), 4.0);
    }

    #[test]
    fn test_end_behavior() {
        let mut timeline = loaded(5.0);
        timeline.play();
        timeline.advance(Duration::from_secs(6));
        assert_eq!(timeline.state(), PlaybackState::Stopped);
        assert!(timeline.is_at_end());

        let config = PlaybackConfig {
            end_behavior: EndBehavior::Pause,
            ..PlaybackConfig::default()
        };
        let mut timeline = Timeline::new(&config);
        timeline.load(5.0);
        timeline.play();
        timeline.advance(Duration::from_secs(6));
        assert_eq!(timeline.state(), PlaybackState::Paused);
        assert_eq!(timeline.current_time(), 5.0);
    }

    #[test]
    fn test_seek_clamps_and_keeps_state() {
        let mut timeline = loaded(10.0);
        timeline.play();
        assert_eq!(timeline.seek(-3.0), 0.0);
        assert_eq!(timeline.seek(42.0), 10.0);
        assert_eq!(timeline.seek(f64::INFINITY), 0.0);
        assert_eq!(timeline.seek(7.5), 7.5);
        assert_eq!(timeline.state(), PlaybackState::Playing);
    }

    #[test]
    fn test_tick_uses_wall_clock_delta() {
        let mut timeline = loaded(10.0);
        let start = Instant::now();
        timeline.play();
        assert_eq!(timeline.tick(start), 0.0);
        assert_eq!(timeline.tick(start + Duration::from_secs(1)), 1.0);
        assert_eq!(timeline.tick(start + Duration::from_secs(3)), 3.0);

        timeline.pause();
        assert_eq!(timeline.tick(start + Duration::from_secs(5)), 3.0);
        timeline.play();
        assert_eq!(timeline.tick(start + Duration::from_secs(6)), 3.0);
        assert_eq!(timeline.tick(start + Duration::from_secs(7)), 4.0);
    }

    #[test]
    fn test_progress() {
        let mut timeline = Timeline::default();
        assert_eq!(timeline.progress(), 0.0);
        timeline.load(8.0);
        timeline.seek(2.0);
        assert_eq!(timeline.progress(), 0.25);
        timeline.load(0.0);
        assert_eq!(timeline.progress(), 1.0);
    }

    #[test]
    fn test_unload() {
        let mut timeline = loaded(4.0);
        timeline.play();
        timeline.unload();
        assert!(!timeline.is_loaded());
        assert_eq!(timeline.state(), PlaybackState::Stopped);
        assert!(!timeline.play());
    }
}
