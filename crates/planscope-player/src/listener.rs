//! Hooks for the rendering side.
//!
//! Listeners are registered on the [`crate::EventScheduler`] as
//! `Arc<dyn AnimationListener>` and called synchronously in registration
//! order. A listener that does not know an event's object is skipped for
//! that event; fluent effects are applied regardless.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use planscope_player::{AnimationEvent, AnimationListener, EventScheduler};
//!
//! #[derive(Debug)]
//! struct Printer;
//! impl AnimationListener for Printer {
//!     fn on_event_started(&self, event: &AnimationEvent) {
//!         println!("{} {}", event.kind, event.object_id);
//!     }
//! }
//!
//! let mut scheduler = EventScheduler::new();
//! scheduler.add_listener(Arc::new(Printer));
//! assert_eq!(scheduler.listener_count(), 1);
//! ```

use std::collections::HashSet;
use std::fmt::Debug;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::info;

use crate::event::AnimationEvent;

/// Receives event lifecycle notifications.
pub trait AnimationListener: Send + Sync + Debug {
    /// Whether the scene has an object with this id.
    fn has_object(&self, _object_id: &str) -> bool {
        true
    }

    /// Called once when the event starts, or again after a seek restarts it.
    fn on_event_started(&self, event: &AnimationEvent);

    /// Called with the interpolation fraction while the event runs.
    fn on_event_progress(&self, _event: &AnimationEvent, _progress: f64) {}

    /// Called exactly once per event between `clear_all` calls.
    fn on_event_completed(&self, _event: &AnimationEvent) {}
}

/// Logs every notification through `tracing`.
#[derive(Debug, Clone, Default)]
pub struct LoggingAnimationListener {
    prefix: String,
}

impl LoggingAnimationListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl AnimationListener for LoggingAnimationListener {
    fn on_event_started(&self, event: &AnimationEvent) {
        info!(
            event = "event_started",
            prefix = %self.prefix,
            id = %event.id,
            kind = event.kind.tag(),
            object = %event.object_id,
            start = event.start_time,
        );
    }

    fn on_event_completed(&self, event: &AnimationEvent) {
        info!(
            event = "event_completed",
            prefix = %self.prefix,
            id = %event.id,
            kind = event.kind.tag(),
            object = %event.object_id,
            end = event.end_time(),
        );
    }
}

/// Counts notifications; optionally knows only a fixed set of objects.
#[derive(Debug, Default)]
pub struct CountingAnimationListener {
    known_objects: Option<HashSet<String>>,
    started_count: AtomicUsize,
    progress_count: AtomicUsize,
    completed_count: AtomicUsize,
}

impl CountingAnimationListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// A listener whose scene contains only `objects`.
    pub fn with_objects<I, S>(objects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known_objects: Some(objects.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn started_count(&self) -> usize {
        self.started_count.load(Ordering::SeqCst)
    }

    pub fn progress_count(&self) -> usize {
        self.progress_count.load(Ordering::SeqCst)
    }

    pub fn completed_count(&self) -> usize {
        self.completed_count.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.started_count.store(0, Ordering::SeqCst);
        self.progress_count.store(0, Ordering::SeqCst);
        self.completed_count.store(0, Ordering::SeqCst);
    }
}

impl AnimationListener for CountingAnimationListener {
    fn has_object(&self, object_id: &str) -> bool {
        self.known_objects
            .as_ref()
            .map_or(true, |known| known.contains(object_id))
    }

    fn on_event_started(&self, _event: &AnimationEvent) {
        self.started_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_event_progress(&self, _event: &AnimationEvent, _progress: f64) {
        self.progress_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_event_completed(&self, _event: &AnimationEvent) {
        self.completed_count.fetch_add(1, Ordering::SeqCst);
    }
}
