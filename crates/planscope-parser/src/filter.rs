//! Plan-line pre-filter.
//!
//! Keeps only the lines that can carry actions: comments and blank lines are
//! dropped, everything up to a `found plan:` marker is dropped when the marker
//! exists, and scanning stops at the first search-statistics line.

use std::sync::LazyLock;

use regex::Regex;

const FOUND_PLAN_MARKER: &str = "found plan:";

static STATISTICS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:plan-length\s*:|metric\b|planning time|search time|expanded nodes)")
        .expect("statistics line regex")
});

fn is_comment(line: &str) -> bool {
    line.starts_with(';') || line.starts_with('#')
}

/// Returns true for a line that ends the plan block.
pub fn is_statistics_line(line: &str) -> bool {
    STATISTICS_LINE.is_match(line)
}

/// Trimmed candidate action lines of a planner transcript, in order.
pub fn plan_lines(text: &str) -> Vec<&str> {
    let lines: Vec<&str> = text.lines().collect();
    let start = lines
        .iter()
        .position(|l| l.to_lowercase().contains(FOUND_PLAN_MARKER))
        .map_or(0, |i| i + 1);

    let mut kept = Vec::new();
    for line in &lines[start..] {
        let line = line.trim();
        if line.is_empty() || is_comment(line) {
            continue;
        }
        if is_statistics_line(line) {
            break;
        }
        kept.push(line);
    }
    kept
}
