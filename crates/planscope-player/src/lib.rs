//! Deterministic, seekable plan playback.
//!
//! - [`Timeline`] - play/pause/seek clock
//! - [`FluentStore`] - clamped numeric state
//! - [`resolve_effects`] - ground numeric effects per action
//! - [`EventScheduler`] - exactly-once animation events
//! - [`Player`] - the above wired together for one plan
//!
//! Everything runs on the caller's thread; the scheduler is the single
//! writer of fluent state.

pub mod effects;
pub mod event;
pub mod fluents;
pub mod listener;
pub mod player;
pub mod scheduler;
pub mod timeline;

pub use effects::{
    ground_domain_effects, heuristic_effect, resolve_effects, GroundEffect, PlanContext,
    ResolvedEffects,
};
pub use event::{
    classify_verb, events_for_action, AnimationEvent, EventData, EventFanOut, EventKind,
    EventStatus,
};
pub use fluents::{split_key, FluentStore};
pub use listener::{AnimationListener, CountingAnimationListener, LoggingAnimationListener};
pub use player::{Frame, Player};
pub use scheduler::{EventScheduler, UpdateReport};
pub use timeline::{PlaybackState, Timeline};
