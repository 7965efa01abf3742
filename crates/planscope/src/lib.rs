//! planscope - planner output in, seekable plan playback out
//!
//! Load a PDDL domain, a problem and a planner transcript, then drive the
//! resulting [`Player`] from your own frame loop.
//!
//! # Example
//!
//! ```rust
//! use planscope::prelude::*;
//!
//! let domain = "(define (domain d) (:predicates (at ?x)) \
//!               (:action move :parameters (?x) :precondition (at ?x) :effect (at ?x)))";
//! let problem = "(define (problem p) (:domain d) (:objects a) (:init (at a)) (:goal (at a)))";
//! let output = "0: (move a)\n1: (move a)\n";
//!
//! let mut session = Session::from_texts(domain, problem, output, &PlanscopeConfig::default())
//!     .unwrap();
//! assert_eq!(session.domain_type(), DomainType::Classical);
//!
//! let frame = session.player.seek(1.5);
//! assert_eq!(frame.time, 1.5);
//! ```

// Data model
pub use planscope_core::{
    Dialect, DomainType, FluentKind, NumericFluent, PddlDomain, PddlProblem, Plan, PlanAction,
    PlanNumericEffect, PlanscopeError, Result, SearchMetrics,
};

// Configuration
pub use planscope_config::{
    ConfigError, EndBehavior, FluentConfig, HeuristicRule, ParserConfig, PlanscopeConfig,
    PlaybackConfig,
};

// PDDL front end
pub use planscope_pddl::{
    classify_domain_type, get_domain_classification_summary, parse_domain, parse_problem,
    validate_domain_problem, DomainClassification,
};

// Planner transcripts
pub use planscope_parser::{
    detect_planner_type, extract_metrics, parse_planner_output, parse_solution, PlanParser,
};

// Playback
pub use planscope_player::{
    AnimationEvent, AnimationListener, CountingAnimationListener, EventKind, EventScheduler,
    EventStatus, FluentStore, Frame, GroundEffect, LoggingAnimationListener, PlanContext,
    PlaybackState, Player, Timeline,
};

#[cfg(feature = "console")]
pub use planscope_console as console;

mod session;
pub use session::{Diagnostics, Session};

pub mod prelude {
    pub use super::{Dialect, DomainType, Plan, PlanAction, PlanscopeError};
    pub use super::{EndBehavior, PlanscopeConfig};
    pub use super::{AnimationEvent, AnimationListener, Frame, PlaybackState, Player};
    pub use super::{Diagnostics, Session};
}
