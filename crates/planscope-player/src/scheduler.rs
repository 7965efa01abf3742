//! Animation event scheduler.
//!
//! The scheduler reconciles its events against a plan time. Fluent effects
//! of an event are applied exactly once, against the fluent values current at
//! that moment, when the event reaches [`EventStatus::Completed`]; the status lives on the event itself, so
//! repeated updates at the same time and scrubbing back and forth cannot
//! apply an effect twice. Only [`EventScheduler::clear_all`] rewinds a
//! completed event.
//!
//! Events are evaluated in registration order, which is action order
//! (ascending start time, ties in parse order).

use std::fmt::Debug;
use std::sync::Arc;

use planscope_core::Plan;
use tracing::{debug, trace, warn};

use crate::effects::ResolvedEffects;
use crate::event::{events_for_action, AnimationEvent, EventStatus};
use crate::fluents::FluentStore;
use crate::listener::AnimationListener;

/// What one reconciliation pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateReport {
    pub started: usize,
    pub completed: usize,
}

#[derive(Default)]
pub struct EventScheduler {
    events: Vec<AnimationEvent>,
    listeners: Vec<Arc<dyn AnimationListener>>,
}

impl EventScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self, listener: Arc<dyn AnimationListener>) {
        self.listeners.push(listener);
    }

    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Replaces the event set with the fan-out of every plan action.
    pub fn schedule(&mut self, plan: &Plan, effects: &ResolvedEffects) {
        self.events = plan
            .actions
            .iter()
            .enumerate()
            .flat_map(|(i, action)| events_for_action(action, effects.for_action(i)))
            .collect();
        debug!(
            actions = plan.len(),
            events = self.events.len(),
            "events scheduled"
        );
    }

    pub fn events(&self) -> &[AnimationEvent] {
        &self.events
    }

    pub fn event(&self, id: &str) -> Option<&AnimationEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.events.iter().filter(|e| e.is_completed()).count()
    }

    /// Events currently running, in registration order.
    pub fn active_events(&self) -> impl Iterator<Item = &AnimationEvent> {
        self.events
            .iter()
            .filter(|e| e.status == EventStatus::Started)
    }

    /// Starts, advances and completes events for `time`.
    pub fn update(&mut self, time: f64, store: &mut FluentStore) -> UpdateReport {
        let mut report = UpdateReport::default();
        for event in &mut self.events {
            step(event, time, store, &self.listeners, &mut report);
        }
        report
    }

    /// Restores consistency at an arbitrary `time`.
    ///
    /// Started markers and interpolation state are dropped and every event
    /// is re-evaluated at `time`. Completed events stay completed; those
    /// overlapping `time` are replayed to listeners as progress only.
    pub fn seek_to_time(&mut self, time: f64, store: &mut FluentStore) -> UpdateReport {
        for event in &mut self.events {
            if event.status == EventStatus::Started {
                event.status = EventStatus::Pending;
                event.progress = 0.0;
            }
        }

        let mut report = UpdateReport::default();
        for event in &mut self.events {
            if event.status == EventStatus::Completed {
                if event.overlaps(time) {
                    let progress = event.progress_at(time);
                    notify(&self.listeners, event, false, |l, e| {
                        l.on_event_progress(e, progress)
                    });
                }
                continue;
            }
            step(event, time, store, &self.listeners, &mut report);
        }
        debug!(
            event = "seek",
            time,
            started = report.started,
            completed = report.completed,
        );
        report
    }

    /// Returns every event to `Pending`. Fluent values are the caller's to reset.
    pub fn clear_all(&mut self) {
        for event in &mut self.events {
            event.status = EventStatus::Pending;
            event.progress = 0.0;
        }
    }

    /// Drops all events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Debug for EventScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventScheduler")
            .field("events", &self.events.len())
            .field("completed", &self.completed_count())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

fn step(
    event: &mut AnimationEvent,
    time: f64,
    store: &mut FluentStore,
    listeners: &[Arc<dyn AnimationListener>],
    report: &mut UpdateReport,
) {
    if event.status == EventStatus::Pending {
        if event.start_time > time {
            return;
        }
        event.status = EventStatus::Started;
        event.progress = 0.0;
        report.started += 1;
        debug!(
            event = "event_started",
            id = %event.id,
            kind = event.kind.tag(),
            object = %event.object_id,
            time,
        );
        notify(listeners, event, true, |l, e| l.on_event_started(e));
    }

    if event.status == EventStatus::Started {
        let progress = event.progress_at(time);
        if progress >= 1.0 {
            complete(event, store, listeners);
            report.completed += 1;
        } else {
            event.progress = progress;
            trace!(id = %event.id, progress, "event progress");
            notify(listeners, event, false, |l, e| l.on_event_progress(e, progress));
        }
    }
}

fn complete(
    event: &mut AnimationEvent,
    store: &mut FluentStore,
    listeners: &[Arc<dyn AnimationListener>],
) {
    if event.status == EventStatus::Completed {
        return;
    }
    let applied = store.apply_all(event.numeric_effects());
    event.status = EventStatus::Completed;
    event.progress = 1.0;
    debug!(
        event = "event_completed",
        id = %event.id,
        kind = event.kind.tag(),
        effects = applied,
    );
    notify(listeners, event, false, |l, e| l.on_event_completed(e));
}

fn notify(
    listeners: &[Arc<dyn AnimationListener>],
    event: &AnimationEvent,
    warn_on_skip: bool,
    call: impl Fn(&dyn AnimationListener, &AnimationEvent),
) {
    for listener in listeners {
        if !listener.has_object(&event.object_id) {
            if warn_on_skip {
                warn!(
                    event = "event_skipped",
                    id = %event.id,
                    object = %event.object_id,
                    "unknown scene object"
                );
            }
            continue;
        }
        call(listener.as_ref(), event);
    }
}

#[cfg(test)]
mod tests;
