//! Playback facade.
//!
//! [`Player`] owns the timeline, the scheduler and the fluent store for one
//! loaded plan. Callers drive it with `advance`/`tick` from their own frame
//! loop and read back a [`Frame`]; nothing is reachable through globals.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use planscope_config::{FluentConfig, PlanscopeConfig};
use planscope_core::{Plan, PlanAction};
use tracing::info;

use crate::effects::{resolve_effects, PlanContext};
use crate::fluents::FluentStore;
use crate::listener::AnimationListener;
use crate::scheduler::EventScheduler;
use crate::timeline::{PlaybackState, Timeline};

/// What the rendering side needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub time: f64,
    pub state: PlaybackState,
    pub current_action: Option<PlanAction>,
    pub next_action: Option<PlanAction>,
    pub fluents: BTreeMap<String, f64>,
}

#[derive(Debug)]
pub struct Player {
    timeline: Timeline,
    scheduler: EventScheduler,
    fluents: FluentStore,
    fluent_config: FluentConfig,
    plan: Option<Plan>,
}

impl Player {
    pub fn new(config: &PlanscopeConfig) -> Self {
        Self {
            timeline: Timeline::new(&config.playback),
            scheduler: EventScheduler::new(),
            fluents: FluentStore::new(),
            fluent_config: config.fluents.clone(),
            plan: None,
        }
    }

    /// Replaces the loaded plan, resolving effects against `context`.
    pub fn load(&mut self, plan: Plan, context: &PlanContext<'_>) {
        let resolved = resolve_effects(&plan, context, &self.fluent_config);
        self.scheduler.schedule(&plan, &resolved);
        self.fluents = resolved.store;
        self.timeline.load(plan.total_duration);
        info!(
            event = "plan_loaded",
            dialect = plan.dialect.tag(),
            actions = plan.len(),
            events = self.scheduler.len(),
            fluents = self.fluents.len(),
            total_duration = plan.total_duration,
        );
        self.plan = Some(plan);
    }

    pub fn unload(&mut self) {
        self.plan = None;
        self.scheduler.clear();
        self.fluents.clear();
        self.timeline.unload();
    }

    pub fn plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn scheduler(&self) -> &EventScheduler {
        &self.scheduler
    }

    pub fn fluents(&self) -> &FluentStore {
        &self.fluents
    }

    pub fn add_listener(&mut self, listener: Arc<dyn AnimationListener>) {
        self.scheduler.add_listener(listener);
    }

    pub fn set_speed(&mut self, speed: f64) -> bool {
        self.timeline.set_speed(speed)
    }

    /// Starts playback. A finished plan is rewound first.
    ///
    /// Returns false when no plan is loaded.
    pub fn play(&mut self) -> bool {
        if self.plan.is_none() {
            return self.timeline.play();
        }
        if self.timeline.is_at_end() && self.timeline.state() != PlaybackState::Playing {
            self.reset();
        }
        let playing = self.timeline.play();
        self.scheduler
            .update(self.timeline.current_time(), &mut self.fluents);
        playing
    }

    pub fn pause(&mut self) -> bool {
        self.timeline.pause()
    }

    /// Jumps to `time` (clamped) and brings events and fluents in line.
    pub fn seek(&mut self, time: f64) -> Frame {
        let time = self.timeline.seek(time);
        self.scheduler.seek_to_time(time, &mut self.fluents);
        self.frame()
    }

    /// Stopped at zero with every event pending and fluents at their initial values.
    pub fn reset(&mut self) {
        self.timeline.reset();
        self.scheduler.clear_all();
        self.fluents.reset();
        info!(event = "playback", action = "reset");
    }

    /// Advances by a wall-clock interval.
    pub fn advance(&mut self, elapsed: Duration) -> Frame {
        let time = self.timeline.advance(elapsed);
        self.scheduler.update(time, &mut self.fluents);
        self.frame()
    }

    /// Advances by the wall-clock time since the previous tick.
    pub fn tick(&mut self, now: Instant) -> Frame {
        let time = self.timeline.tick(now);
        self.scheduler.update(time, &mut self.fluents);
        self.frame()
    }

    /// The current frame without advancing.
    pub fn frame(&self) -> Frame {
        let time = self.timeline.current_time();
        let (current_action, next_action) = match &self.plan {
            Some(plan) => (
                plan.action_at(time).cloned(),
                plan.next_action_after(time).cloned(),
            ),
            None => (None, None),
        };
        Frame {
            time,
            state: self.timeline.state(),
            current_action,
            next_action,
            fluents: self.fluents.snapshot(),
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(&PlanscopeConfig::default())
    }
}
