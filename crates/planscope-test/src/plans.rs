//! Hand-built canonical plans.

use planscope_core::{Dialect, NumericOp, Plan, PlanAction, PlanNumericEffect};

fn finish(dialect: Dialect, actions: Vec<PlanAction>) -> Plan {
    let actions: Vec<PlanAction> = actions
        .into_iter()
        .enumerate()
        .map(|(i, a)| a.with_id(format!("action-{}", i)))
        .collect();
    let total = actions.iter().map(|a| a.end_time).fold(0.0, f64::max);
    Plan {
        dialect,
        cost: actions.len() as f64,
        actions,
        total_duration: total,
        makespan: total,
        ..Plan::default()
    }
}

fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Three back-to-back temporal actions spanning `[0, 10]`.
pub fn three_action_plan() -> Plan {
    finish(
        Dialect::Temporal,
        vec![
            PlanAction::new("move", args(&["r1", "rooma", "roomb"]), 0.0, 4.0),
            PlanAction::new("pick", args(&["r1", "ball1", "roomb"]), 4.0, 2.0),
            PlanAction::new("move", args(&["r1", "roomb", "rooma"]), 6.0, 4.0),
        ],
    )
}

/// Three numeric actions with explicit battery effects, spanning `[0, 3]`.
pub fn numeric_plan() -> Plan {
    let effect = |operation, value| PlanNumericEffect {
        fluent: "battery(r1)".to_string(),
        operation,
        value,
    };
    finish(
        Dialect::Numeric,
        vec![
            PlanAction::new("move", args(&["r1", "wp0", "wp1"]), 0.0, 1.0)
                .with_numeric_effects(vec![effect(NumericOp::Decrease, 20.0)]),
            PlanAction::new("recharge", args(&["r1", "wp1"]), 1.0, 1.0)
                .with_numeric_effects(vec![effect(NumericOp::Increase, 50.0)]),
            PlanAction::new("move", args(&["r1", "wp1", "wp2"]), 2.0, 1.0)
                .with_numeric_effects(vec![effect(NumericOp::Decrease, 30.0)]),
        ],
    )
}
