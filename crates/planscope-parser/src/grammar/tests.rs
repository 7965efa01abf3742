use planscope_config::ParserConfig;
use planscope_core::{Dialect, NumericOp};
use proptest::prelude::*;

use super::*;

fn config() -> ParserConfig {
    ParserConfig::default()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_classical_indexed_line() {
    let action = parse_classical_line("0: (pick ball1 rooma wally)", 0, &config()).unwrap();
    assert_eq!(action.name, "pick");
    assert_eq!(action.args, vec!["ball1", "rooma", "wally"]);
    assert_eq!(action.start_time, 0.0);
    assert_eq!(action.duration, 1.0);
    assert_eq!(action.end_time, 1.0);
    assert_eq!(action.source_rule.as_deref(), Some("indexed-paren"));
}

#[test]
fn test_classical_unnumbered_uses_position() {
    let action = parse_classical_line("(move rooma roomb)", 4, &config()).unwrap();
    assert_eq!(action.start_time, 4.0);
    assert_eq!(action.end_time, 5.0);
}

#[test]
fn test_classical_bare_line_with_cost() {
    let action = parse_classical_line("pick ball1 rooma left (1)", 2, &config()).unwrap();
    assert_eq!(action.name, "pick");
    assert_eq!(action.args, vec!["ball1", "rooma", "left"]);
    assert_eq!(action.start_time, 2.0);
    assert_eq!(action.source_rule.as_deref(), Some("bare"));
}

#[test]
fn test_classical_rejects_prose() {
    assert!(parse_classical_line("Search stopped without finding a solution.", 0, &config()).is_none());
    assert!(parse_classical_line("done", 0, &config()).is_none());
    assert!(parse_classical_line("Temporal plan (makespan 3.0):", 0, &config()).is_none());
}

#[test]
fn test_lpg_zero_duration_substituted() {
    let action =
        parse_temporal_line("0.0003: (PICK BALL1 ROOMA WALLY) [0.0000]", 0, &config()).unwrap();
    assert_eq!(action.name, "pick");
    assert_eq!(action.args, vec!["ball1", "rooma", "wally"]);
    assert_eq!(action.start_time, 0.0003);
    assert_eq!(action.duration, 0.1);
    assert!(approx(action.end_time, 0.1003));
}

#[test]
fn test_interval_line() {
    let action = parse_temporal_line("[1.0,1.5]: pick r1 ball1 roomb", 0, &config()).unwrap();
    assert_eq!(action.start_time, 1.0);
    assert_eq!(action.duration, 0.5);
    assert_eq!(action.args, vec!["r1", "ball1", "roomb"]);
    assert_eq!(action.source_rule.as_deref(), Some("interval"));
}

#[test]
fn test_at_form_line() {
    let action = parse_temporal_line("at 2.0: move r1 roomb rooma", 0, &config()).unwrap();
    assert_eq!(action.start_time, 2.0);
    assert_eq!(action.duration, 1.0);
    assert_eq!(action.source_rule.as_deref(), Some("at-time"));
}

#[test]
fn test_timed_bare_and_timed_paren_default_duration() {
    let bare = parse_temporal_line("3.0: load t1 p1", 0, &config()).unwrap();
    assert_eq!(bare.source_rule.as_deref(), Some("timed-bare"));
    assert_eq!(bare.duration, 1.0);

    let paren = parse_temporal_line("3.0: (load t1 p1)", 0, &config()).unwrap();
    assert_eq!(paren.source_rule.as_deref(), Some("timed-paren"));
    assert_eq!(paren.end_time, 4.0);
}

#[test]
fn test_temporal_falls_back_to_classical() {
    let action = parse_temporal_line("(move a b)", 1, &config()).unwrap();
    assert_eq!(action.source_rule.as_deref(), Some("indexed-paren"));
    assert_eq!(action.start_time, 1.0);
}

#[test]
fn test_config_durations_apply() {
    let config = ParserConfig {
        default_action_duration: 2.5,
        zero_duration_substitute: 0.01,
        classical_step_duration: 3.0,
    };
    assert_eq!(parse_temporal_line("1: (a)", 0, &config).unwrap().duration, 2.5);
    assert_eq!(parse_temporal_line("1: (a) [0]", 0, &config).unwrap().duration, 0.01);
    let step = parse_classical_line("(a)", 2, &config).unwrap();
    assert_eq!((step.start_time, step.duration), (6.0, 3.0));
}

#[test]
fn test_numeric_line_inline_effects() {
    let action = parse_numeric_line(
        "0.0: (move r1 wp0 wp1) decrease (battery r1) 20 increase (total-cost) 1",
        0,
        &config(),
    )
    .unwrap();
    assert_eq!(action.name, "move");
    assert_eq!(action.numeric_effects.len(), 2);
    assert_eq!(action.numeric_effects[0].fluent, "battery(r1)");
    assert_eq!(action.numeric_effects[0].operation, NumericOp::Decrease);
    assert_eq!(action.numeric_effects[0].value, 20.0);
    assert_eq!(action.numeric_effects[1].fluent, "total-cost");
}

#[test]
fn test_assign_recognised() {
    let effects = inline_numeric_effects("ASSIGN (Speed R1) 3.5");
    assert_eq!(effects[0].fluent, "speed(r1)");
    assert_eq!(effects[0].operation, NumericOp::Assign);
    assert_eq!(effects[0].value, 3.5);
}

#[test]
fn test_parse_line_dispatch() {
    let line = "0.5: (a x) [2]";
    assert_eq!(
        parse_line(Dialect::Classical, line, 0, &config()).unwrap().duration,
        1.0
    );
    assert_eq!(
        parse_line(Dialect::PddlPlus, line, 0, &config()).unwrap().duration,
        2.0
    );
}

#[test]
fn test_rule_tables_have_unique_names() {
    let mut names: Vec<&str> = CLASSICAL_RULES
        .iter()
        .chain(TEMPORAL_RULES.iter())
        .map(|r| r.name)
        .collect();
    let total = names.len();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), total);
}

proptest! {
    #[test]
    fn test_duration_invariant_holds_for_every_grammar(
        start in 0.0f64..1000.0,
        duration in 0.0f64..100.0,
        dialect in proptest::sample::select(Dialect::ALL.to_vec()),
    ) {
        let lines = [
            format!("{:.4}: (act a b) [{:.4}]", start, duration),
            format!("[{:.3},{:.3}]: act a b", start, start + duration),
            format!("at {:.3}: act a b", start),
            format!("{:.3}: act a b", start),
            format!("{:.3}: (act a b)", start),
            "(act a b)".to_string(),
            "act a b".to_string(),
        ];
        for line in &lines {
            if let Some(action) = parse_line(dialect, line, 3, &config()) {
                prop_assert!(action.duration > 0.0);
                prop_assert_eq!(action.end_time, action.start_time + action.duration);
            }
        }
    }
}
