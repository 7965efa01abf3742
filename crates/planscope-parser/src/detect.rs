//! Planner-output dialect detection.
//!
//! [`DETECTION_RULES`] is evaluated in ascending priority over the lower-cased
//! transcript; the first rule that matches decides the dialect. When none
//! matches the transcript is Classical, even if its lines carry timestamps.
//!
//! # Examples
//!
//! ```
//! use planscope_core::Dialect;
//! use planscope_parser::{detect_planner_type, detect_with_trace};
//!
//! assert_eq!(detect_planner_type("0.0: (move r1 a b)"), Dialect::Classical);
//!
//! let lpg = "; lpg-td\n0.0003: (pick ball1 rooma wally) [0.0000]";
//! let detection = detect_with_trace(lpg);
//! assert_eq!(detection.dialect, Dialect::Temporal);
//! assert_eq!(detection.rule, "temporal");
//! ```

use std::sync::LazyLock;

use planscope_core::Dialect;
use regex::Regex;
use tracing::info;

/// Name reported when no rule matched.
pub const CLASSICAL_DEFAULT: &str = "classical-default";

/// One rung of the detection cascade.
pub struct DetectionRule {
    /// Lower runs first.
    pub priority: u8,
    pub name: &'static str,
    pub dialect: Dialect,
    /// Receives the lower-cased transcript.
    pub matches: fn(&str) -> bool,
}

impl std::fmt::Debug for DetectionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetectionRule")
            .field("priority", &self.priority)
            .field("name", &self.name)
            .field("dialect", &self.dialect)
            .finish()
    }
}

/// Which dialect was detected and which rule decided it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    pub dialect: Dialect,
    pub rule: &'static str,
}

static PDDL_PLUS_CUES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:process|event|continuous|rate|concurrent)").expect("pddl+ cue regex")
});

static NUMERIC_CUES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bnumeric\b|\b(?:increase|decrease|assign)\s*\(|\bscale-(?:up|down)\b|\)\s+[+-]\d")
        .expect("numeric cue regex")
});

static DURATIVE_CUES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"durative|duration|makespan|temporal|\bat start\b|\bat end\b|\bover all\b|\blpg|\boptic\b|\bpopf|\btfd\b",
    )
    .expect("durative cue regex")
});

// Line shapes only temporal planners emit. A bare `t: (action)` is not one.
static DURATIVE_STRUCTURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^\s*(?:\d+(?:\.\d+)?\s*:\s*\([^()]*\)\s*\[\s*\d+(?:\.\d+)?\s*\]|\[\s*\d+(?:\.\d+)?\s*,\s*\d+(?:\.\d+)?\s*\]\s*:|at\s+\d+(?:\.\d+)?\s*:)",
    )
    .expect("durative structure regex")
});

fn has_pddl_plus_cue(text: &str) -> bool {
    PDDL_PLUS_CUES.is_match(text)
}

fn has_numeric_cue(text: &str) -> bool {
    NUMERIC_CUES.is_match(text)
}

fn has_temporal_cue(text: &str) -> bool {
    DURATIVE_CUES.is_match(text) && DURATIVE_STRUCTURE.is_match(text)
}

/// The detection cascade, sorted by priority.
pub static DETECTION_RULES: [DetectionRule; 3] = [
    DetectionRule {
        priority: 10,
        name: "pddl-plus",
        dialect: Dialect::PddlPlus,
        matches: has_pddl_plus_cue,
    },
    DetectionRule {
        priority: 20,
        name: "numeric",
        dialect: Dialect::Numeric,
        matches: has_numeric_cue,
    },
    DetectionRule {
        priority: 30,
        name: "temporal",
        dialect: Dialect::Temporal,
        matches: has_temporal_cue,
    },
];

/// Detects the dialect and reports the deciding rule.
pub fn detect_with_trace(text: &str) -> Detection {
    let lower = text.to_lowercase();
    let detection = DETECTION_RULES
        .iter()
        .find(|rule| (rule.matches)(&lower))
        .map_or(
            Detection {
                dialect: Dialect::Classical,
                rule: CLASSICAL_DEFAULT,
            },
            |rule| Detection {
                dialect: rule.dialect,
                rule: rule.name,
            },
        );

    info!(
        event = "planner_detected",
        dialect = detection.dialect.tag(),
        rule = detection.rule,
    );
    detection
}

/// Detects the dialect of a planner transcript.
pub fn detect_planner_type(text: &str) -> Dialect {
    detect_with_trace(text).dialect
}
