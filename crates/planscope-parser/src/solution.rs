//! Legacy solution files (`.soln`).
//!
//! VAL/OPTIC-style files: `;` header lines carrying `Cost` and `Time`, then
//! one action per line as `t: (action args) [d]` or plain `(action args)`.
//! This reader does its own dialect sniff and reads each action group with
//! the PDDL s-expression reader, but yields the same [`Plan`] shape as
//! [`crate::PlanParser`].

use planscope_config::ParserConfig;
use planscope_core::{Dialect, Plan, PlanAction, PlanscopeError, Result, SearchMetrics};
use planscope_pddl::{read_all, SExpr};
use tracing::info;

use crate::builder::build_plan;
use crate::grammar::inline_numeric_effects;

const NUMERIC_OPERATORS: [&str; 3] = ["increase", "decrease", "assign"];

/// Header values of a solution file.
#[derive(Debug, Default, PartialEq)]
struct Header {
    cost: Option<f64>,
    time: Option<f64>,
}

fn header_value(rest: &str) -> Option<f64> {
    rest.trim_start_matches(|c: char| c == ':' || c == '=' || c.is_whitespace())
        .split_whitespace()
        .next()?
        .parse()
        .ok()
}

fn read_header(text: &str) -> Header {
    let mut header = Header::default();
    for line in text.lines() {
        let Some(comment) = line.trim().strip_prefix(';') else {
            continue;
        };
        let comment = comment.trim().to_lowercase();
        if let Some(rest) = comment.strip_prefix("cost") {
            header.cost = header.cost.or_else(|| header_value(rest));
        } else if let Some(rest) = comment.strip_prefix("time") {
            header.time = header.time.or_else(|| header_value(rest));
        }
    }
    header
}

/// Body line split into timestamp, action group and trailing text.
struct SolutionLine<'a> {
    time: Option<f64>,
    group: &'a str,
    rest: &'a str,
}

fn split_line(line: &str) -> Option<SolutionLine<'_>> {
    let open = line.find('(')?;
    let close = open + line[open..].find(')')?;
    let prefix = line[..open].trim().trim_end_matches(':').trim();
    let time = if prefix.is_empty() {
        None
    } else {
        Some(prefix.parse().ok()?)
    };
    Some(SolutionLine {
        time,
        group: &line[open..=close],
        rest: &line[close + 1..],
    })
}

fn bracket_duration(rest: &str) -> Option<f64> {
    let open = rest.find('[')?;
    let close = open + rest[open..].find(']')?;
    rest[open + 1..close].trim().parse().ok()
}

fn sniff(lines: &[SolutionLine<'_>]) -> Dialect {
    if lines.iter().any(|l| bracket_duration(l.rest).is_some()) {
        Dialect::Temporal
    } else if lines.iter().any(|l| {
        let rest = l.rest.to_lowercase();
        NUMERIC_OPERATORS.iter().any(|op| rest.contains(op))
    }) {
        Dialect::Numeric
    } else {
        Dialect::Classical
    }
}

/// Parses a legacy solution file into a [`Plan`].
pub fn parse_solution(text: &str, config: &ParserConfig) -> Result<Plan> {
    let header = read_header(text);
    let lines: Vec<SolutionLine<'_>> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with(';'))
        .filter_map(split_line)
        .collect();
    let dialect = sniff(&lines);

    let mut actions = Vec::with_capacity(lines.len());
    for line in &lines {
        let Some(SExpr::List(items)) = read_all(&line.group.to_lowercase()).into_iter().next()
        else {
            continue;
        };
        let Some((name, args)) = items.split_first() else {
            continue;
        };
        let Some(name) = name.as_atom() else {
            continue;
        };
        let args = args
            .iter()
            .filter_map(|a| a.as_atom().map(str::to_string))
            .collect();

        let step = actions.len() as f64 * config.classical_step_duration;
        let (start, duration) = match dialect {
            Dialect::Temporal => {
                let duration = bracket_duration(line.rest).unwrap_or(config.default_action_duration);
                let duration = if duration <= 0.0 {
                    config.zero_duration_substitute
                } else {
                    duration
                };
                (line.time.unwrap_or(step), duration)
            }
            _ => (line.time.unwrap_or(step), config.classical_step_duration),
        };

        let mut action = PlanAction::new(name, args, start, duration).with_source_rule("solution");
        if dialect == Dialect::Numeric {
            action = action.with_numeric_effects(inline_numeric_effects(line.rest));
        }
        actions.push(action);
    }

    if actions.is_empty() {
        return Err(PlanscopeError::NoValidActions);
    }

    let metrics = SearchMetrics {
        plan_cost: header.cost,
        planning_time: header.time,
        ..SearchMetrics::default()
    };
    let plan = build_plan(dialect, actions, metrics);
    info!(
        event = "plan_built",
        source = "solution",
        dialect = plan.dialect.tag(),
        actions = plan.len(),
        total_duration = plan.total_duration,
    );
    Ok(plan)
}
