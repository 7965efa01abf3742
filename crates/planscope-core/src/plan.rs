//! Canonical time-indexed plans.
//!
//! Every planner-output dialect converges on these types. Invariants:
//! - `end_time == start_time + duration` and `duration >= 0` for every action
//! - actions are sorted ascending by `start_time` (stable: ties keep parse order)
//! - `total_duration` is the latest action end (0 for an empty plan)

use crate::dialect::Dialect;
use crate::pddl::NumericOp;

/// Where an action sits relative to a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ActionStatus {
    Pending,
    Active,
    Completed,
}

/// A ground numeric effect attached to a plan action, e.g. `increase (fuel t1) 5`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanNumericEffect {
    /// Fluent key, e.g. `fuel(t1)`.
    pub fluent: String,
    pub operation: NumericOp,
    pub value: f64,
}

/// One scheduled action of a plan.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanAction {
    pub id: String,
    pub name: String,
    pub args: Vec<String>,
    pub start_time: f64,
    pub duration: f64,
    pub end_time: f64,
    pub numeric_effects: Vec<PlanNumericEffect>,
    /// Name of the grammar rule that recognised the line, if parsed from text.
    pub source_rule: Option<String>,
}

impl PlanAction {
    /// Creates an action; negative durations are clamped to zero.
    pub fn new(name: impl Into<String>, args: Vec<String>, start_time: f64, duration: f64) -> Self {
        let duration = duration.max(0.0);
        Self {
            id: String::new(),
            name: name.into(),
            args,
            start_time,
            duration,
            end_time: start_time + duration,
            numeric_effects: Vec::new(),
            source_rule: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_source_rule(mut self, rule: impl Into<String>) -> Self {
        self.source_rule = Some(rule.into());
        self
    }

    pub fn with_numeric_effects(mut self, effects: Vec<PlanNumericEffect>) -> Self {
        self.numeric_effects = effects;
        self
    }

    /// Moves the action to a new start time, keeping the duration.
    pub fn shift_to(&mut self, start_time: f64) {
        self.start_time = start_time;
        self.end_time = start_time + self.duration;
    }

    /// Half-open containment: `[start_time, end_time)`.
    pub fn contains(&self, time: f64) -> bool {
        self.start_time <= time && time < self.end_time
    }

    pub fn status_at(&self, time: f64) -> ActionStatus {
        if time < self.start_time {
            ActionStatus::Pending
        } else if time < self.end_time {
            ActionStatus::Active
        } else {
            ActionStatus::Completed
        }
    }

    /// PDDL-style rendering `(name arg1 arg2)`.
    pub fn signature(&self) -> String {
        if self.args.is_empty() {
            format!("({})", self.name)
        } else {
            format!("({} {})", self.name, self.args.join(" "))
        }
    }
}

/// A continuous process reported by a PDDL+ planner.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanProcess {
    pub name: String,
    pub args: Vec<String>,
    pub start_time: f64,
    pub end_time: f64,
}

/// Grounding statistics (`|f|`, `|a|`, grounding time).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroundingMetrics {
    pub facts: Option<u64>,
    pub actions: Option<u64>,
    pub time: Option<f64>,
}

/// A `g(n)=.. h(n)=..` sample from a search log.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchNodeSample {
    pub g: f64,
    pub h: f64,
}

impl SearchNodeSample {
    /// Combined priority `f(n) = g(n) + h(n)`.
    pub fn f(&self) -> f64 {
        self.g + self.h
    }
}

/// Search statistics scraped from a planner transcript.
///
/// Every field is optional; absent labels leave it `None`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchMetrics {
    pub plan_length: Option<u64>,
    pub plan_cost: Option<f64>,
    pub planning_time: Option<f64>,
    pub search_time: Option<f64>,
    pub heuristic_time: Option<f64>,
    pub expanded_nodes: Option<u64>,
    pub states_evaluated: Option<u64>,
    pub dead_ends: Option<u64>,
    pub duplicates: Option<u64>,
    pub grounding: Option<GroundingMetrics>,
    pub search_nodes: Vec<SearchNodeSample>,
}

impl SearchMetrics {
    /// Returns true when nothing was scraped.
    pub fn is_empty(&self) -> bool {
        *self == SearchMetrics::default()
    }
}

/// The canonical plan.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plan {
    pub dialect: Dialect,
    pub actions: Vec<PlanAction>,
    pub processes: Vec<PlanProcess>,
    pub total_duration: f64,
    pub makespan: f64,
    pub cost: f64,
    pub metrics: SearchMetrics,
}

impl Plan {
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// First action (in list order) whose `[start, end)` interval contains `time`.
    pub fn action_at(&self, time: f64) -> Option<&PlanAction> {
        self.actions.iter().find(|a| a.contains(time))
    }

    /// First action that starts strictly after `time`.
    pub fn next_action_after(&self, time: f64) -> Option<&PlanAction> {
        self.actions.iter().find(|a| a.start_time > time)
    }

    /// Actions active at `time`, in list order.
    pub fn active_actions(&self, time: f64) -> impl Iterator<Item = &PlanAction> {
        self.actions.iter().filter(move |a| a.contains(time))
    }

    pub fn find_action(&self, id: &str) -> Option<&PlanAction> {
        self.actions.iter().find(|a| a.id == id)
    }

    /// Replaces the dialect tag, e.g. to upgrade Temporal to Metric-Temporal
    /// once the domain has been classified.
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Composite quality in `(0, 1]`: the mean of a length score and a time score.
    ///
    /// `length_score = 1 / (1 + actions)`; `time_score = 1 / (1 + search_time)`,
    /// or 1.0 when no search time was reported.
    pub fn quality(&self) -> f64 {
        let length_score = 1.0 / (1.0 + self.actions.len() as f64);
        let time_score = self
            .metrics
            .search_time
            .or(self.metrics.planning_time)
            .map_or(1.0, |t| 1.0 / (1.0 + t.max(0.0)));
        (length_score + time_score) / 2.0
    }
}

/// A best-effort parse result: the value plus advisory diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    pub errors: Vec<String>,
}

impl<T> Parsed<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            errors: Vec::new(),
        }
    }

    pub fn with_errors(value: T, errors: Vec<String>) -> Self {
        Self { value, errors }
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Parsed<U> {
        Parsed {
            value: f(self.value),
            errors: self.errors,
        }
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}
