use super::*;
use planscope_core::{PddlDomain, PddlProblem};
use planscope_pddl::{parse_domain, parse_problem};
use planscope_test::{domains, numeric_plan, problems, three_action_plan};

fn rovers() -> (PddlDomain, PddlProblem) {
    let domain = parse_domain(domains::NUMERIC_ROVERS).unwrap().value;
    let problem = parse_problem(problems::NUMERIC_ROVERS).unwrap().value;
    (domain, problem)
}

fn action(name: &str, args: &[&str]) -> PlanAction {
    PlanAction::new(name, args.iter().map(|a| a.to_string()).collect(), 0.0, 1.0)
}

#[test]
fn test_transcript_effects_without_context() {
    let plan = numeric_plan();
    let resolved = resolve_effects(&plan, &PlanContext::new(), &FluentConfig::default());

    assert_eq!(resolved.per_action.len(), 3);
    assert_eq!(resolved.for_action(1)[0].operation, NumericOp::Increase);
    assert_eq!(resolved.store.len(), 1);
    assert_eq!(resolved.store.value("battery(r1)"), Some(100.0));
}

#[test]
fn test_grounded_domain_effects() {
    let (domain, problem) = rovers();
    let store = FluentStore::from_problem(&problem, &FluentConfig::default());

    let effects = ground_domain_effects(&action("move", &["r1", "wp0", "wp1"]), &domain, &store);
    assert_eq!(effects.len(), 2);
    assert_eq!(effects[0].fluent, "battery(r1)");
    assert_eq!(effects[0].operation, NumericOp::Decrease);
    assert_eq!(effects[0].operand(&store), Some(20.0));
    assert_eq!(effects[1].fluent, "total-cost");
    assert_eq!(effects[1].constant_value(), Some(1.0));

    let effects = ground_domain_effects(&action("move", &["r1", "wp1", "wp2"]), &domain, &store);
    assert_eq!(effects[0].operand(&store), Some(30.0));
}

#[test]
fn test_unevaluable_domain_effect_is_dropped() {
    let (domain, problem) = rovers();
    let store = FluentStore::from_problem(&problem, &FluentConfig::default());
    let effects = ground_domain_effects(&action("move", &["r1", "wp2", "wp0"]), &domain, &store);
    assert_eq!(effects.len(), 1);
    assert_eq!(effects[0].fluent, "total-cost");
}

#[test]
fn test_transcript_overrides_domain_per_fluent() {
    let (domain, problem) = rovers();
    let plan = numeric_plan();
    let context = PlanContext::new()
        .with_domain(&domain, DomainType::Numeric)
        .with_problem(&problem);
    let resolved = resolve_effects(&plan, &context, &FluentConfig::default());

    let first = resolved.for_action(0);
    assert_eq!(first.len(), 2);
    assert_eq!(first[0].fluent, "battery(r1)");
    assert_eq!(first[0].constant_value(), Some(20.0));
    assert_eq!(first[1].fluent, "total-cost");

    assert_eq!(resolved.store.value("battery(r1)"), Some(60.0));
    assert_eq!(resolved.store.value("total-cost"), Some(0.0));
}

#[test]
fn test_heuristic_fallback() {
    let plan = three_action_plan();
    let resolved = resolve_effects(&plan, &PlanContext::new(), &FluentConfig::default());

    let moves = resolved.for_action(0);
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].fluent, "battery(r1)");
    assert_eq!(moves[0].operation, NumericOp::Decrease);
    assert_eq!(moves[0].constant_value(), Some(20.0));

    let pick = resolved.for_action(1);
    assert_eq!(pick[0].fluent, "battery(r1)");
    assert_eq!(pick[0].constant_value(), Some(5.0));
    assert_eq!(resolved.store.value("battery(r1)"), Some(100.0));
}

#[test]
fn test_heuristic_prefers_argument_owning_the_fluent() {
    let mut store = FluentStore::new();
    store.ensure("battery(wally)", &FluentConfig::default());
    let effect = heuristic_effect(
        &action("pick", &["ball1", "rooma", "wally"]),
        &store,
        &FluentConfig::default(),
    )
    .unwrap();
    assert_eq!(effect.fluent, "battery(wally)");

    let effect = heuristic_effect(&action("recharge", &[]), &store, &FluentConfig::default()).unwrap();
    assert_eq!(effect.fluent, "battery");
    assert_eq!(effect.operation, NumericOp::Increase);
}

#[test]
fn test_heuristics_disabled() {
    let config = FluentConfig::default();
    let plan = three_action_plan();
    let resolved = resolve_effects(
        &plan,
        &PlanContext::new(),
        &FluentConfig {
            use_heuristics: false,
            ..config
        },
    );
    assert!(resolved.per_action.iter().all(Vec::is_empty));
    assert!(resolved.store.is_empty());
}

#[test]
fn test_classical_resolves_nothing() {
    let domain = parse_domain(domains::GRIPPER).unwrap().value;
    let plan = three_action_plan();
    let context = PlanContext::new().with_domain(&domain, DomainType::Classical);
    let resolved = resolve_effects(&plan, &context, &FluentConfig::default());
    assert!(resolved.store.is_empty());
    assert_eq!(resolved.per_action.len(), 3);
    assert!(resolved.per_action.iter().all(Vec::is_empty));

    let classical = three_action_plan().with_dialect(Dialect::Classical);
    assert!(PlanContext::new().is_classical(&classical));
}

const COUNTER_DOMAIN: &str = "
(define (domain counter)
  (:requirements :numeric-fluents)
  (:functions (level ?r) (rate ?r))
  (:action step
    :parameters (?r)
    :effect (and (assign (level ?r) (+ (level ?r) 10))
                 (increase (rate ?r) (* ?duration (level ?r))))))
";

const COUNTER_PROBLEM: &str = "
(define (problem count-three)
  (:domain counter)
  (:objects r1)
  (:init (= (level r1) 0) (= (rate r1) 0))
  (:goal (and)))
";

fn counter_plan() -> Plan {
    let actions = (0..3)
        .map(|i| {
            PlanAction::new("step", vec!["r1".into()], i as f64, 1.0)
                .with_id(format!("action-{}", i))
        })
        .collect();
    Plan {
        dialect: Dialect::Numeric,
        actions,
        total_duration: 3.0,
        makespan: 3.0,
        cost: 3.0,
        ..Plan::default()
    }
}

#[test]
fn test_grounding_keeps_fluent_operands() {
    let domain = parse_domain(COUNTER_DOMAIN).unwrap().value;
    let problem = parse_problem(COUNTER_PROBLEM).unwrap().value;
    let store = FluentStore::from_problem(&problem, &FluentConfig::default());

    let effects = ground_domain_effects(&action("step", &["r1"]), &domain, &store);
    assert_eq!(effects.len(), 2);
    assert_eq!(effects[0].fluent, "level(r1)");
    assert_eq!(effects[0].operation, NumericOp::Assign);
    assert_eq!(effects[0].constant_value(), None);
    assert_eq!(effects[0].value.fluent_names(), vec!["level"]);
    assert_eq!(effects[1].value.to_string(), "(* 1 (level r1))");
}

#[test]
fn test_self_referential_effects_accumulate() {
    let domain = parse_domain(COUNTER_DOMAIN).unwrap().value;
    let problem = parse_problem(COUNTER_PROBLEM).unwrap().value;
    let context = PlanContext::new()
        .with_domain(&domain, DomainType::Numeric)
        .with_problem(&problem);
    let mut resolved = resolve_effects(&counter_plan(), &context, &FluentConfig::default());

    for i in 0..3 {
        let effects = resolved.for_action(i).to_vec();
        assert_eq!(resolved.store.apply_all(&effects), 2);
    }
    assert_eq!(resolved.store.value("level(r1)"), Some(30.0));
    // rate reads level before each step: 0 + 10 + 20
    assert_eq!(resolved.store.value("rate(r1)"), Some(30.0));
}
