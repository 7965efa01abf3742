//! planscope planner-output parsing
//!
//! Turns free-form planner transcripts into canonical [`Plan`]s:
//! - [`filter`]: bounds the block of candidate action lines
//! - [`detect`]: ordered dialect detection table
//! - [`grammar`]: per-dialect tables of named line rules
//! - [`metrics`]: search-statistics scrape
//! - [`builder`]: plan assembly and the [`PlanParser`] entry point
//! - [`solution`]: legacy `.soln` reader
//!
//! [`Plan`]: planscope_core::Plan

pub mod builder;
pub mod detect;
pub mod filter;
pub mod grammar;
pub mod metrics;
pub mod solution;

pub use builder::{build_plan, parse_planner_output, PlanParser};
pub use detect::{
    detect_planner_type, detect_with_trace, Detection, DetectionRule, CLASSICAL_DEFAULT,
    DETECTION_RULES,
};
pub use filter::{is_statistics_line, plan_lines};
pub use grammar::{
    inline_numeric_effects, parse_classical_line, parse_line, parse_numeric_line,
    parse_pddl_plus_line, parse_temporal_line, LineRule, LineShape, CLASSICAL_RULES,
    TEMPORAL_RULES,
};
pub use metrics::{extract_metrics, extract_processes};
pub use solution::parse_solution;
