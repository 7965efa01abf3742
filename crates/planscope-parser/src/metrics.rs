//! Best-effort scrape of search statistics.
//!
//! Every field of [`SearchMetrics`] is optional; a label that does not occur
//! leaves its field `None`. Times labelled `msec`/`ms` are converted to
//! seconds, other times are kept as reported.

use std::sync::LazyLock;

use planscope_core::{GroundingMetrics, PlanProcess, SearchMetrics, SearchNodeSample};
use regex::{Captures, Regex};

macro_rules! static_regex {
    ($name:ident, $pattern:literal) => {
        static $name: LazyLock<Regex> =
            LazyLock::new(|| Regex::new($pattern).expect(stringify!($name)));
    };
}

static_regex!(PLAN_LENGTH, r"(?i)plan[- ]length\s*:\s*(\d+)");
static_regex!(
    PLAN_COST,
    r"(?im)^[;\s]*(?:metric(?:value)?(?:\s*\([^)]*\))?|plan cost|cost)\s*[:=]?\s*(-?\d+(?:\.\d+)?)"
);
static_regex!(
    PLANNING_TIME,
    r"(?i)planning time\s*(?:\((msec|ms|sec|s)\))?\s*:?\s*(\d+(?:\.\d+)?)[ \t]*(msec|ms|seconds|sec|s)?\b"
);
static_regex!(BARE_TIME, r"(?im)^;\s*time\s+(\d+(?:\.\d+)?)");
static_regex!(
    SEARCH_TIME,
    r"(?i)search time\s*(?:\((msec|ms|sec|s)\))?\s*:?\s*(\d+(?:\.\d+)?)[ \t]*(msec|ms|seconds|sec|s)?\b"
);
static_regex!(
    HEURISTIC_TIME,
    r"(?i)heuristic time\s*(?:\((msec|ms|sec|s)\))?\s*:?\s*(\d+(?:\.\d+)?)[ \t]*(msec|ms|seconds|sec|s)?\b"
);
static_regex!(
    GROUNDING_TIME,
    r"(?i)grounding time\s*(?:\((msec|ms|sec|s)\))?\s*:?\s*(\d+(?:\.\d+)?)[ \t]*(msec|ms|seconds|sec|s)?\b"
);
static_regex!(EXPANDED_NODES, r"(?i)expanded nodes\s*:?\s*(\d+)");
static_regex!(EXPANDED_STATES, r"(?i)expanded\s+(\d+)\s+state");
static_regex!(STATES_EVALUATED, r"(?i)states evaluated(?:\s+so far)?\s*:?\s*(\d+)");
static_regex!(DEAD_ENDS, r"(?i)dead-ends(?:\s+detected)?\s*:?\s*(\d+)");
static_regex!(DUPLICATES, r"(?i)duplicates(?:\s+detected)?\s*:?\s*(\d+)");
static_regex!(GROUNDED_FACTS, r"\|[fF]\|\s*:\s*(\d+)");
static_regex!(GROUNDED_ACTIONS, r"\|[aA]\|\s*:\s*(\d+)");
static_regex!(
    SEARCH_NODE,
    r"(?i)g\(n\)\s*=\s*(-?\d+(?:\.\d+)?)\s*,?\s*h\(n\)\s*=\s*(-?\d+(?:\.\d+)?)"
);

fn first_u64(re: &Regex, text: &str) -> Option<u64> {
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

fn first_f64(re: &Regex, text: &str) -> Option<f64> {
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

/// Reads a `label (unit): value unit` capture, converting milliseconds.
fn seconds(caps: &Captures<'_>) -> Option<f64> {
    let value: f64 = caps.get(2)?.as_str().parse().ok()?;
    let unit = caps
        .get(1)
        .or_else(|| caps.get(3))
        .map(|m| m.as_str().to_ascii_lowercase());
    Some(match unit.as_deref() {
        Some("msec") | Some("ms") => value / 1000.0,
        _ => value,
    })
}

fn time(re: &Regex, text: &str) -> Option<f64> {
    seconds(&re.captures(text)?)
}

/// Scrapes every recognised statistic from a transcript.
pub fn extract_metrics(text: &str) -> SearchMetrics {
    let grounding = GroundingMetrics {
        facts: first_u64(&GROUNDED_FACTS, text),
        actions: first_u64(&GROUNDED_ACTIONS, text),
        time: time(&GROUNDING_TIME, text),
    };

    SearchMetrics {
        plan_length: first_u64(&PLAN_LENGTH, text),
        plan_cost: first_f64(&PLAN_COST, text),
        planning_time: time(&PLANNING_TIME, text).or_else(|| first_f64(&BARE_TIME, text)),
        search_time: time(&SEARCH_TIME, text),
        heuristic_time: time(&HEURISTIC_TIME, text),
        expanded_nodes: first_u64(&EXPANDED_NODES, text)
            .or_else(|| first_u64(&EXPANDED_STATES, text)),
        states_evaluated: first_u64(&STATES_EVALUATED, text),
        dead_ends: first_u64(&DEAD_ENDS, text),
        duplicates: first_u64(&DUPLICATES, text),
        grounding: (grounding != GroundingMetrics::default()).then_some(grounding),
        search_nodes: SEARCH_NODE
            .captures_iter(text)
            .filter_map(|caps| {
                Some(SearchNodeSample {
                    g: caps.get(1)?.as_str().parse().ok()?,
                    h: caps.get(2)?.as_str().parse().ok()?,
                })
            })
            .collect(),
    }
}

/// Continuous processes reported by a PDDL+ planner.
///
/// Transcripts are not mined for processes yet; the list is always empty.
pub fn extract_processes(_text: &str) -> Vec<PlanProcess> {
    Vec::new()
}
