//! Plan assembly.
//!
//! Parsed actions are stable-sorted by start time (ties keep parse order),
//! given sequential ids, and wrapped with totals and scraped metrics.

use planscope_config::ParserConfig;
use planscope_core::{Dialect, Plan, PlanAction, PlanscopeError, Result, SearchMetrics};
use tracing::{info, trace, warn};

use crate::detect::detect_with_trace;
use crate::filter::plan_lines;
use crate::grammar::parse_line;
use crate::metrics::{extract_metrics, extract_processes};
use crate::solution::parse_solution;

/// Assembles a plan from parsed actions.
///
/// `total_duration` and `makespan` are the latest action end (0 when empty);
/// `cost` is the scraped plan cost or, failing that, the action count.
pub fn build_plan(dialect: Dialect, mut actions: Vec<PlanAction>, metrics: SearchMetrics) -> Plan {
    actions.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
    for (i, action) in actions.iter_mut().enumerate() {
        action.id = format!("action-{}", i);
    }

    let total_duration = actions.iter().map(|a| a.end_time).fold(0.0, f64::max);
    let cost = metrics.plan_cost.unwrap_or(actions.len() as f64);

    Plan {
        dialect,
        actions,
        processes: Vec::new(),
        total_duration,
        makespan: total_duration,
        cost,
        metrics,
    }
}

/// Planner-output parser carrying the duration settings.
///
/// # Examples
///
/// ```
/// use planscope_core::Dialect;
/// use planscope_parser::PlanParser;
///
/// let plan = PlanParser::default()
///     .parse("0: (pick ball1 rooma wally)\n1: (move rooma roomb)")
///     .unwrap();
/// assert_eq!(plan.dialect, Dialect::Classical);
/// assert_eq!(plan.len(), 2);
/// assert_eq!(plan.total_duration, 2.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PlanParser {
    config: ParserConfig,
}

impl PlanParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Detects the dialect, then parses with its grammar.
    pub fn parse(&self, text: &str) -> Result<Plan> {
        let detection = detect_with_trace(text);
        self.parse_as(text, detection.dialect)
    }

    /// Parses with the grammar of a known dialect.
    ///
    /// Returns [`PlanscopeError::NoValidActions`] when no line is recognised.
    pub fn parse_as(&self, text: &str, dialect: Dialect) -> Result<Plan> {
        let mut actions = Vec::new();
        for line in plan_lines(text) {
            match parse_line(dialect, line, actions.len(), &self.config) {
                Some(action) => actions.push(action),
                None => trace!(line, "skipping unrecognised line"),
            }
        }

        if actions.is_empty() {
            warn!(event = "plan_built", dialect = dialect.tag(), "no valid actions");
            return Err(PlanscopeError::NoValidActions);
        }

        let mut plan = build_plan(dialect, actions, extract_metrics(text));
        if dialect == Dialect::PddlPlus {
            plan.processes = extract_processes(text);
        }

        info!(
            event = "plan_built",
            dialect = plan.dialect.tag(),
            actions = plan.len(),
            total_duration = plan.total_duration,
            cost = plan.cost,
        );
        Ok(plan)
    }

    /// Parses a legacy solution file.
    pub fn parse_solution(&self, text: &str) -> Result<Plan> {
        parse_solution(text, &self.config)
    }
}

/// Parses planner output with default settings.
pub fn parse_planner_output(text: &str) -> Result<Plan> {
    PlanParser::default().parse(text)
}
