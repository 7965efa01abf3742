//! Typed PDDL records.
//!
//! These are produced by the `planscope-pddl` parser and consumed by the
//! classifier, the validator and effect grounding in the player.

mod domain;
mod expr;
mod problem;


pub use domain::{
    ActionKind, PddlAction, PddlDomain, PddlFunction, PddlParameter, PddlPredicate, PddlType,
};
pub use expr::{NumericCondition, NumericEffect, NumericExpr, NumericOp};
pub use problem::{Metric, MetricDirection, NumericInit, PddlObject, PddlProblem};

/// Built-in root of every type hierarchy.
pub const OBJECT_TYPE: &str = "object";

/// Temporal annotation of a condition or effect inside a durative action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Timing {
    /// Not wrapped in any timing specifier.
    #[default]
    Instant,
    AtStart,
    AtEnd,
    OverAll,
}

/// A ground or lifted atom such as `(at ?r roomA)`.
///
/// Negation is encoded in the predicate name as `not-<predicate>`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PddlFact {
    pub predicate: String,
    pub args: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub timing: Timing,
}

impl PddlFact {
    /// Prefix marking a negated fact.
    pub const NEGATION_PREFIX: &'static str = "not-";

    pub fn new(predicate: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            predicate: predicate.into(),
            args,
            timing: Timing::Instant,
        }
    }

    /// Builds the synthetic negated form of a fact.
    pub fn negated(predicate: &str, args: Vec<String>) -> Self {
        Self::new(format!("{}{}", Self::NEGATION_PREFIX, predicate), args)
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub fn is_negated(&self) -> bool {
        self.predicate.starts_with(Self::NEGATION_PREFIX)
    }

    /// Predicate name with any negation prefix removed.
    pub fn base_predicate(&self) -> &str {
        self.predicate
            .strip_prefix(Self::NEGATION_PREFIX)
            .unwrap_or(&self.predicate)
    }
}
