//! Condition, effect and numeric-expression walkers.

use planscope_core::{NumericCondition, NumericEffect, NumericExpr, NumericOp, PddlFact, Timing};

use crate::sexpr::SExpr;

const COMPARATORS: [&str; 5] = [">", ">=", "<", "<=", "="];
const ARITHMETIC: [&str; 4] = ["+", "-", "*", "/"];

/// Accumulates the output of a condition or effect walk.
#[derive(Debug, Default)]
pub(crate) struct Collected {
    pub facts: Vec<PddlFact>,
    pub numeric_conditions: Vec<NumericCondition>,
    pub numeric_effects: Vec<NumericEffect>,
    pub errors: Vec<String>,
}

/// Splits a `(at start X)` / `(at end X)` / `(over all X)` wrapper.
fn timing_wrapper(expr: &SExpr) -> Option<(Timing, &SExpr)> {
    let items = expr.as_list()?;
    let (first, second, body) = match items {
        [first, second, body] => (first.as_atom()?, second.as_atom()?, body),
        _ => return None,
    };
    let timing = match (first, second) {
        ("at", "start") => Timing::AtStart,
        ("at", "end") => Timing::AtEnd,
        ("over", "all") => Timing::OverAll,
        _ => return None,
    };
    Some((timing, body))
}

pub(crate) fn fact_from(expr: &SExpr, timing: Timing) -> Option<PddlFact> {
    let predicate = expr.head()?;
    let args = expr
        .tail()
        .iter()
        .filter_map(|a| a.as_atom().map(str::to_string))
        .collect();
    Some(PddlFact::new(predicate, args).with_timing(timing))
}

fn is_numeric_operand(expr: &SExpr) -> bool {
    match expr {
        SExpr::List(_) => true,
        SExpr::Atom(a) => a.parse::<f64>().is_ok() || a == "#t" || a == "?duration",
    }
}

/// Walks a precondition/goal tree.
pub(crate) fn collect_conditions(expr: &SExpr, timing: Timing, out: &mut Collected) {
    if let Some((inner_timing, body)) = timing_wrapper(expr) {
        collect_conditions(body, inner_timing, out);
        return;
    }
    let Some(head) = expr.head() else {
        // `()` is an empty condition
        if !matches!(expr, SExpr::List(items) if items.is_empty()) {
            out.errors.push(format!("Malformed condition '{}'", expr));
        }
        return;
    };
    let tail = expr.tail();
    match head {
        "and" | "or" | "imply" => {
            for child in tail {
                collect_conditions(child, timing, out);
            }
        }
        "exists" | "forall" | "preference" => {
            if let Some(body) = tail.last() {
                collect_conditions(body, timing, out);
            }
        }
        "not" => match tail.first().and_then(|inner| fact_from(inner, timing)) {
            Some(inner) => out
                .facts
                .push(PddlFact::negated(&inner.predicate, inner.args).with_timing(timing)),
            None => out.errors.push(format!("Malformed negation '{}'", expr)),
        },
        cmp if COMPARATORS.contains(&cmp)
            && tail.len() == 2
            && tail.iter().any(is_numeric_operand) =>
        {
            out.numeric_conditions.push(NumericCondition {
                comparator: cmp.to_string(),
                left: parse_numeric_expr(&tail[0]),
                right: parse_numeric_expr(&tail[1]),
                timing,
            });
        }
        _ => {
            if let Some(fact) = fact_from(expr, timing) {
                out.facts.push(fact);
            }
        }
    }
}

/// Walks an effect tree.
pub(crate) fn collect_effects(expr: &SExpr, timing: Timing, out: &mut Collected) {
    if let Some((inner_timing, body)) = timing_wrapper(expr) {
        collect_effects(body, inner_timing, out);
        return;
    }
    let Some(head) = expr.head() else {
        if !matches!(expr, SExpr::List(items) if items.is_empty()) {
            out.errors.push(format!("Malformed effect '{}'", expr));
        }
        return;
    };
    let tail = expr.tail();
    match head {
        "and" => {
            for child in tail {
                collect_effects(child, timing, out);
            }
        }
        "forall" | "when" => {
            if let Some(body) = tail.last() {
                collect_effects(body, timing, out);
            }
        }
        "not" => match tail.first().and_then(|inner| fact_from(inner, timing)) {
            Some(inner) => out
                .facts
                .push(PddlFact::negated(&inner.predicate, inner.args).with_timing(timing)),
            None => out.errors.push(format!("Malformed negation '{}'", expr)),
        },
        keyword => match NumericOp::from_keyword(keyword) {
            Some(operation) => match numeric_effect(operation, tail, timing) {
                Some(effect) => out.numeric_effects.push(effect),
                None => out
                    .errors
                    .push(format!("Malformed numeric effect '{}'", expr)),
            },
            None => {
                if let Some(fact) = fact_from(expr, timing) {
                    out.facts.push(fact);
                }
            }
        },
    }
}

fn numeric_effect(operation: NumericOp, tail: &[SExpr], timing: Timing) -> Option<NumericEffect> {
    let [target, value] = tail else {
        return None;
    };
    let (function, args) = match target {
        SExpr::Atom(name) => (name.clone(), Vec::new()),
        SExpr::List(_) => (target.head()?.to_string(), target.atoms().split_off(1)),
    };
    Some(NumericEffect {
        function,
        args,
        operation,
        value: parse_numeric_expr(value),
        timing,
    })
}

/// Parses a numeric expression: literal, variable, function term or arithmetic node.
pub(crate) fn parse_numeric_expr(expr: &SExpr) -> NumericExpr {
    match expr {
        SExpr::Atom(atom) => match atom.parse::<f64>() {
            Ok(value) => NumericExpr::Number { value },
            Err(_) => NumericExpr::Variable { name: atom.clone() },
        },
        SExpr::List(items) => match items.split_first() {
            Some((SExpr::Atom(op), operands)) if ARITHMETIC.contains(&op.as_str()) => {
                NumericExpr::Operation {
                    operator: op.clone(),
                    operands: operands.iter().map(parse_numeric_expr).collect(),
                }
            }
            Some((SExpr::Atom(name), args)) => NumericExpr::Fluent {
                name: name.clone(),
                args: args
                    .iter()
                    .filter_map(|a| a.as_atom().map(str::to_string))
                    .collect(),
            },
            _ => NumericExpr::number(0.0),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sexpr::read_all;

    fn expr(text: &str) -> SExpr {
        read_all(text).remove(0)
    }

    #[test]
    fn test_and_not_conditions() {
        let mut out = Collected::default();
        collect_conditions(&expr("(and (at ?r ?from) (not (busy ?r)))"), Timing::Instant, &mut out);
        assert_eq!(out.facts.len(), 2);
        assert_eq!(out.facts[0].predicate, "at");
        assert_eq!(out.facts[0].args, vec!["?r", "?from"]);
        assert_eq!(out.facts[1].predicate, "not-busy");
    }

    #[test]
    fn test_timed_conditions_unwrapped() {
        let mut out = Collected::default();
        collect_conditions(
            &expr("(and (at start (at ?r ?from)) (over all (free ?r)))"),
            Timing::Instant,
            &mut out,
        );
        assert_eq!(out.facts[0].predicate, "at");
        assert_eq!(out.facts[0].timing, Timing::AtStart);
        assert_eq!(out.facts[1].timing, Timing::OverAll);
    }

    #[test]
    fn test_numeric_condition() {
        let mut out = Collected::default();
        collect_conditions(&expr("(>= (battery ?r) 10)"), Timing::Instant, &mut out);
        assert!(out.facts.is_empty());
        assert_eq!(out.numeric_conditions.len(), 1);
        assert_eq!(out.numeric_conditions[0].comparator, ">=");
        assert_eq!(out.numeric_conditions[0].right.as_number(), Some(10.0));
    }

    #[test]
    fn test_object_equality_is_a_fact() {
        let mut out = Collected::default();
        collect_conditions(&expr("(not (= ?from ?to))"), Timing::Instant, &mut out);
        assert_eq!(out.facts[0].predicate, "not-=");
        assert!(out.numeric_conditions.is_empty());
    }

    #[test]
    fn test_effects_split_boolean_and_numeric() {
        let mut out = Collected::default();
        collect_effects(
            &expr("(and (at ?r ?to) (not (at ?r ?from)) (decrease (battery ?r) (* 2 (distance ?from ?to))))"),
            Timing::Instant,
            &mut out,
        );
        assert_eq!(out.facts.len(), 2);
        assert_eq!(out.facts[1].predicate, "not-at");
        let effect = &out.numeric_effects[0];
        assert_eq!(effect.function, "battery");
        assert_eq!(effect.args, vec!["?r"]);
        assert_eq!(effect.operation, NumericOp::Decrease);
        assert_eq!(effect.value.to_string(), "(* 2 (distance ?from ?to))");
    }

    #[test]
    fn test_timed_numeric_effect() {
        let mut out = Collected::default();
        collect_effects(&expr("(at end (increase (total-cost) 4))"), Timing::Instant, &mut out);
        let effect = &out.numeric_effects[0];
        assert_eq!(effect.timing, Timing::AtEnd);
        assert_eq!(effect.function, "total-cost");
        assert!(effect.args.is_empty());
        assert_eq!(effect.value.as_number(), Some(4.0));
    }

    #[test]
    fn test_forall_when_recurse() {
        let mut out = Collected::default();
        collect_effects(
            &expr("(forall (?b - ball) (when (carry ?r ?b) (at ?b ?to)))"),
            Timing::Instant,
            &mut out,
        );
        assert_eq!(out.facts.len(), 1);
        assert_eq!(out.facts[0].predicate, "at");
    }

    #[test]
    fn test_malformed_numeric_effect_reported() {
        let mut out = Collected::default();
        collect_effects(&expr("(increase (fuel ?t))"), Timing::Instant, &mut out);
        assert!(out.numeric_effects.is_empty());
        assert_eq!(out.errors.len(), 1);
    }

    #[test]
    fn test_parse_numeric_expr_shapes() {
        assert_eq!(parse_numeric_expr(&SExpr::atom("3.5")).as_number(), Some(3.5));
        assert_eq!(
            parse_numeric_expr(&SExpr::atom("#t")),
            NumericExpr::Variable { name: "#t".to_string() }
        );
        assert_eq!(
            parse_numeric_expr(&expr("(speed r1)")),
            NumericExpr::Fluent {
                name: "speed".to_string(),
                args: vec!["r1".to_string()],
            }
        );
    }
}
