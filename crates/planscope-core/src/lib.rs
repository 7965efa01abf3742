//! planscope Core - Core types for plan playback
//!
//! This crate provides the fundamental data model shared by every planscope crate:
//! - Planning dialect tags and domain classification types
//! - Typed PDDL domain/problem records
//! - The canonical time-indexed `Plan` and its `PlanAction`s
//! - Numeric fluents with clamped mutation
//! - The common error type

pub mod dialect;
pub mod error;
pub mod fluent;
pub mod pddl;
pub mod plan;

#[cfg(test)]
mod fluent_tests;

pub use dialect::{Dialect, DomainType};
pub use error::{PlanscopeError, Result};
pub use fluent::{fluent_key, FluentKind, NumericFluent};
pub use pddl::{
    ActionKind, Metric, MetricDirection, NumericCondition, NumericEffect, NumericExpr, NumericInit,
    NumericOp, PddlAction, PddlDomain, PddlFact, PddlFunction, PddlObject, PddlParameter,
    PddlPredicate, PddlProblem, PddlType, Timing, OBJECT_TYPE,
};
pub use plan::{
    ActionStatus, GroundingMetrics, Parsed, Plan, PlanAction, PlanNumericEffect, PlanProcess,
    SearchMetrics, SearchNodeSample,
};
