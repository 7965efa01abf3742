//! Per-dialect action-line grammars.
//!
//! Each dialect owns an ordered table of named [`LineRule`]s; the first rule
//! whose pattern matches wins and its name is recorded on the action as
//! [`PlanAction::source_rule`]. Names and arguments are lower-cased.
//!
//! # Examples
//!
//! ```
//! use planscope_config::ParserConfig;
//! use planscope_parser::parse_temporal_line;
//!
//! let config = ParserConfig::default();
//! let action = parse_temporal_line("1.5: (MOVE r1 a b) [2.0]", 0, &config).unwrap();
//! assert_eq!(action.name, "move");
//! assert_eq!(action.start_time, 1.5);
//! assert_eq!(action.end_time, 3.5);
//! assert_eq!(action.source_rule.as_deref(), Some("bracket-duration"));
//! ```

use std::sync::LazyLock;

use planscope_config::ParserConfig;
use planscope_core::{fluent_key, Dialect, NumericOp, PlanAction, PlanNumericEffect};
use regex::{Captures, Regex};

/// How a matching line is turned into timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineShape {
    /// `t: (action args) [d]`
    BracketDuration,
    /// `[start,end]: action args`
    Interval,
    /// `at t: action args`
    AtTime,
    /// `t: action args`
    TimedBare,
    /// `t: (action args)`
    TimedParen,
    /// `(action args)` with an optional `n:` prefix
    IndexedParen,
    /// `action args` with an optional trailing `(cost)`
    Bare,
}

/// A named line pattern.
pub struct LineRule {
    pub name: &'static str,
    pub shape: LineShape,
    pattern: LazyLock<Regex>,
}

impl LineRule {
    /// Applies the rule to a trimmed line. `index` is the number of actions
    /// accepted so far and is the start time of unnumbered classical steps.
    pub fn apply(&self, line: &str, index: usize, config: &ParserConfig) -> Option<PlanAction> {
        let caps = self.pattern.captures(line)?;
        let (start, duration, name_group) = match self.shape {
            LineShape::BracketDuration => {
                let duration = number(&caps, 4)?;
                (number(&caps, 1)?, temporal_duration(duration, config), 2)
            }
            LineShape::Interval => {
                let (start, end) = (number(&caps, 1)?, number(&caps, 2)?);
                (start, temporal_duration(end - start, config), 3)
            }
            LineShape::AtTime | LineShape::TimedBare | LineShape::TimedParen => {
                (number(&caps, 1)?, config.default_action_duration, 2)
            }
            LineShape::IndexedParen => {
                let start = match caps.get(1) {
                    Some(_) => number(&caps, 1)?,
                    None => index as f64 * config.classical_step_duration,
                };
                (start, config.classical_step_duration, 2)
            }
            LineShape::Bare => (
                index as f64 * config.classical_step_duration,
                config.classical_step_duration,
                1,
            ),
        };

        let name = caps.get(name_group)?.as_str().to_lowercase();
        let args = caps
            .get(name_group + 1)
            .map(|m| {
                m.as_str()
                    .split_whitespace()
                    .map(str::to_lowercase)
                    .collect()
            })
            .unwrap_or_default();

        Some(PlanAction::new(name, args, start, duration).with_source_rule(self.name))
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.pattern.is_match(line)
    }
}

impl std::fmt::Debug for LineRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineRule")
            .field("name", &self.name)
            .field("shape", &self.shape)
            .finish()
    }
}

fn number(caps: &Captures<'_>, group: usize) -> Option<f64> {
    caps.get(group)?.as_str().parse().ok()
}

/// Zero durations become the configured small positive substitute.
fn temporal_duration(duration: f64, config: &ParserConfig) -> f64 {
    if duration <= 0.0 {
        config.zero_duration_substitute
    } else {
        duration
    }
}

/// Classical rules, in priority order.
pub static CLASSICAL_RULES: [LineRule; 2] = [
    LineRule {
        name: "indexed-paren",
        shape: LineShape::IndexedParen,
        pattern: LazyLock::new(|| {
            Regex::new(r"(?i)^(?:(\d+(?:\.\d+)?)\s*:\s*)?\(\s*([^()\s]+)((?:\s+[^()\s]+)*)\s*\)")
                .expect("indexed-paren regex")
        }),
    },
    LineRule {
        name: "bare",
        shape: LineShape::Bare,
        pattern: LazyLock::new(|| {
            Regex::new(r"(?i)^([a-z][\w-]*)((?:\s+[\w-]+)+)(?:\s+\(\d+(?:\.\d+)?\))?\s*$")
                .expect("bare regex")
        }),
    },
];

/// Temporal rules, in priority order.
pub static TEMPORAL_RULES: [LineRule; 5] = [
    LineRule {
        name: "bracket-duration",
        shape: LineShape::BracketDuration,
        pattern: LazyLock::new(|| {
            Regex::new(
                r"(?i)^(\d+(?:\.\d+)?)\s*:\s*\(\s*([^()\s]+)((?:\s+[^()\s]+)*)\s*\)\s*\[\s*(\d+(?:\.\d+)?)\s*\]",
            )
            .expect("bracket-duration regex")
        }),
    },
    LineRule {
        name: "interval",
        shape: LineShape::Interval,
        pattern: LazyLock::new(|| {
            Regex::new(
                r"(?i)^\[\s*(\d+(?:\.\d+)?)\s*,\s*(\d+(?:\.\d+)?)\s*\]\s*:\s*\(?\s*([^()\s]+)((?:\s+[^()\s]+)*)\s*\)?\s*$",
            )
            .expect("interval regex")
        }),
    },
    LineRule {
        name: "at-time",
        shape: LineShape::AtTime,
        pattern: LazyLock::new(|| {
            Regex::new(
                r"(?i)^at\s+(\d+(?:\.\d+)?)\s*:\s*\(?\s*([^()\s]+)((?:\s+[^()\s]+)*)\s*\)?\s*$",
            )
            .expect("at-time regex")
        }),
    },
    LineRule {
        name: "timed-bare",
        shape: LineShape::TimedBare,
        pattern: LazyLock::new(|| {
            Regex::new(r"(?i)^(\d+(?:\.\d+)?)\s*:\s*([a-z][^()\s]*)((?:\s+[^()\s]+)*)\s*$")
                .expect("timed-bare regex")
        }),
    },
    LineRule {
        name: "timed-paren",
        shape: LineShape::TimedParen,
        pattern: LazyLock::new(|| {
            Regex::new(r"(?i)^(\d+(?:\.\d+)?)\s*:\s*\(\s*([^()\s]+)((?:\s+[^()\s]+)*)\s*\)")
                .expect("timed-paren regex")
        }),
    },
];

static INLINE_NUMERIC_EFFECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(increase|decrease|assign)\s*\(\s*([^()\s]+)((?:\s+[^()\s]+)*)\s*\)\s*(-?\d+(?:\.\d+)?)",
    )
    .expect("inline numeric effect regex")
});

fn first_match(rules: &[LineRule], line: &str, index: usize, config: &ParserConfig) -> Option<PlanAction> {
    rules.iter().find_map(|rule| rule.apply(line, index, config))
}

/// Classical line: `n: (action args)`, `(action args)` or `action args`.
pub fn parse_classical_line(line: &str, index: usize, config: &ParserConfig) -> Option<PlanAction> {
    first_match(&CLASSICAL_RULES, line, index, config)
}

/// Temporal line; falls back to the classical grammar.
pub fn parse_temporal_line(line: &str, index: usize, config: &ParserConfig) -> Option<PlanAction> {
    first_match(&TEMPORAL_RULES, line, index, config)
        .or_else(|| parse_classical_line(line, index, config))
}

/// Temporal line plus inline `increase|decrease|assign (fn args) v` effects.
pub fn parse_numeric_line(line: &str, index: usize, config: &ParserConfig) -> Option<PlanAction> {
    let action = parse_temporal_line(line, index, config)?;
    let effects = inline_numeric_effects(line);
    Some(if effects.is_empty() {
        action
    } else {
        action.with_numeric_effects(effects)
    })
}

/// PDDL+ lines share the temporal grammar.
pub fn parse_pddl_plus_line(line: &str, index: usize, config: &ParserConfig) -> Option<PlanAction> {
    parse_temporal_line(line, index, config)
}

/// Dispatches to the grammar of `dialect`.
pub fn parse_line(
    dialect: Dialect,
    line: &str,
    index: usize,
    config: &ParserConfig,
) -> Option<PlanAction> {
    match dialect {
        Dialect::Classical => parse_classical_line(line, index, config),
        Dialect::Temporal | Dialect::MetricTemporal => parse_temporal_line(line, index, config),
        Dialect::Numeric => parse_numeric_line(line, index, config),
        Dialect::PddlPlus => parse_pddl_plus_line(line, index, config),
    }
}

/// Scans a raw line for inline numeric effects.
pub fn inline_numeric_effects(line: &str) -> Vec<PlanNumericEffect> {
    INLINE_NUMERIC_EFFECT
        .captures_iter(line)
        .filter_map(|caps| {
            let operation = NumericOp::from_keyword(&caps[1].to_lowercase())?;
            let args: Vec<String> = caps[3].split_whitespace().map(str::to_lowercase).collect();
            Some(PlanNumericEffect {
                fluent: fluent_key(&caps[2].to_lowercase(), &args),
                operation,
                value: caps[4].parse().ok()?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests;
