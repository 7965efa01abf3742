//! Animation events derived from plan actions.
//!
//! Each action fans out into one or two [`AnimationEvent`]s through a verb
//! table: the verb event (move, pick, ...) plus a `Numeric` event carrying
//! the action's resolved fluent changes, when it has any.

use std::fmt;

use planscope_core::PlanAction;
use smallvec::SmallVec;

use crate::effects::GroundEffect;

/// Events produced by one action.
pub type EventFanOut = SmallVec<[AnimationEvent; 2]>;

/// Visual category of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Move,
    Pick,
    Drop,
    Load,
    Unload,
    Numeric,
    Custom,
}

impl EventKind {
    pub fn tag(self) -> &'static str {
        match self {
            EventKind::Move => "move",
            EventKind::Pick => "pick",
            EventKind::Drop => "drop",
            EventKind::Load => "load",
            EventKind::Unload => "unload",
            EventKind::Numeric => "numeric",
            EventKind::Custom => "custom",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Lifecycle of an event. Only [`crate::EventScheduler::clear_all`] moves an
/// event backwards out of `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EventStatus {
    #[default]
    Pending,
    Started,
    Completed,
}

/// Payload handed to the rendering side.
#[derive(Debug, Clone, PartialEq)]
pub enum EventData {
    Move {
        from: Option<String>,
        to: Option<String>,
    },
    /// Pick, drop, load and unload.
    Transfer {
        item: Option<String>,
        place: Option<String>,
    },
    Numeric {
        effects: Vec<GroundEffect>,
    },
    Custom {
        action: String,
        args: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationEvent {
    /// `<action id>:<kind>`, unique within one schedule.
    pub id: String,
    pub kind: EventKind,
    /// Scene object the event animates.
    pub object_id: String,
    pub action_id: String,
    pub start_time: f64,
    pub duration: f64,
    pub data: EventData,
    pub(crate) status: EventStatus,
    pub(crate) progress: f64,
}

impl AnimationEvent {
    pub fn new(action: &PlanAction, kind: EventKind, data: EventData) -> Self {
        Self {
            id: format!("{}:{}", action.id, kind.tag()),
            kind,
            object_id: action.args.first().cloned().unwrap_or_else(|| action.name.clone()),
            action_id: action.id.clone(),
            start_time: action.start_time,
            duration: action.duration,
            data,
            status: EventStatus::Pending,
            progress: 0.0,
        }
    }

    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }

    pub fn status(&self) -> EventStatus {
        self.status
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_completed(&self) -> bool {
        self.status == EventStatus::Completed
    }

    /// Fraction of the event elapsed at `time`, in `[0, 1]`.
    pub fn progress_at(&self, time: f64) -> f64 {
        if time >= self.end_time() {
            1.0
        } else if self.duration <= 0.0 || time <= self.start_time {
            0.0
        } else {
            ((time - self.start_time) / self.duration).clamp(0.0, 1.0)
        }
    }

    /// Half-open overlap with `[start, end)`; zero-length events overlap their instant.
    pub fn overlaps(&self, time: f64) -> bool {
        self.start_time <= time
            && (time < self.end_time() || (self.duration <= 0.0 && time == self.start_time))
    }

    /// Fluent changes carried by a `Numeric` event.
    pub fn numeric_effects(&self) -> &[GroundEffect] {
        match &self.data {
            EventData::Numeric { effects } => effects,
            _ => &[],
        }
    }
}

const MOVE_VERBS: &[&str] = &["move", "drive", "navigate", "fly", "walk", "travel", "goto"];
const PICK_VERBS: &[&str] = &["pick", "grab", "take", "lift"];
const DROP_VERBS: &[&str] = &["drop", "put", "place", "release"];
const NUMERIC_VERBS: &[&str] = &["recharge", "charge", "refuel"];

fn has_verb(words: &[&str], verbs: &[&str]) -> bool {
    words.iter().any(|w| verbs.iter().any(|v| w.starts_with(v)))
}

/// Maps an action name to its verb event kind.
///
/// A verb matches when any `-`/`_` separated word of the name starts with it,
/// so `pick-up` and `pickup` are picks but `unload` is not a load.
pub fn classify_verb(name: &str) -> EventKind {
    let words: SmallVec<[&str; 4]> = name.split(['-', '_']).collect();
    if has_verb(&words, &["unload"]) {
        EventKind::Unload
    } else if has_verb(&words, &["load"]) {
        EventKind::Load
    } else if has_verb(&words, PICK_VERBS) {
        EventKind::Pick
    } else if has_verb(&words, DROP_VERBS) {
        EventKind::Drop
    } else if has_verb(&words, MOVE_VERBS) {
        EventKind::Move
    } else if has_verb(&words, NUMERIC_VERBS) {
        EventKind::Numeric
    } else {
        EventKind::Custom
    }
}

/// Fans one action out into its events.
pub fn events_for_action(action: &PlanAction, effects: &[GroundEffect]) -> EventFanOut {
    let kind = classify_verb(&action.name);
    let mut events = EventFanOut::new();
    let args = &action.args;

    let data = match kind {
        EventKind::Move => {
            let n = args.len();
            EventData::Move {
                from: (n >= 3).then(|| args[n - 2].clone()),
                to: (n >= 2).then(|| args[n - 1].clone()),
            }
        }
        EventKind::Pick | EventKind::Drop | EventKind::Load | EventKind::Unload => {
            EventData::Transfer {
                item: args.get(1).cloned(),
                place: args.get(2).cloned(),
            }
        }
        EventKind::Numeric => EventData::Numeric {
            effects: effects.to_vec(),
        },
        EventKind::Custom => EventData::Custom {
            action: action.name.clone(),
            args: args.clone(),
        },
    };
    events.push(AnimationEvent::new(action, kind, data));

    if kind != EventKind::Numeric && !effects.is_empty() {
        events.push(AnimationEvent::new(
            action,
            EventKind::Numeric,
            EventData::Numeric {
                effects: effects.to_vec(),
            },
        ));
    }
    events
}
