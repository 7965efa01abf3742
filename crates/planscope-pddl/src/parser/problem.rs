//! `(define (problem ...))` walker.

use planscope_core::{
    Metric, MetricDirection, NumericInit, PddlFact, PddlObject, PddlProblem, Timing, OBJECT_TYPE,
};

use super::effects::{collect_conditions, fact_from, parse_numeric_expr, Collected};
use super::typed_list::typed_names;
use crate::sexpr::SExpr;

/// Walks the sections of a problem `define` form.
pub(crate) fn parse_problem_form(define: &SExpr, errors: &mut Vec<String>) -> PddlProblem {
    let mut problem = PddlProblem::default();

    for section in define.tail() {
        let Some(keyword) = section.head() else {
            errors.push(format!("Unexpected top-level item '{}'", section));
            continue;
        };
        let body = section.tail();
        match keyword {
            "problem" => match body.first().and_then(SExpr::as_atom) {
                Some(name) => problem.name = name.to_string(),
                None => errors.push("Problem name is missing".to_string()),
            },
            ":domain" => match body.first().and_then(SExpr::as_atom) {
                Some(name) => problem.domain = name.to_string(),
                None => errors.push("Problem :domain is missing a name".to_string()),
            },
            ":objects" => {
                problem.objects = typed_names(body, OBJECT_TYPE)
                    .into_iter()
                    .map(|(name, ty)| PddlObject::new(name, ty))
                    .collect();
            }
            ":init" => parse_init(body, &mut problem, errors),
            ":goal" => {
                let mut goal = Collected::default();
                for condition in body {
                    collect_conditions(condition, Timing::Instant, &mut goal);
                }
                problem.goal = goal.facts;
                errors.extend(goal.errors);
            }
            ":metric" => problem.metric = parse_metric(section, errors),
            // Problems may restate requirements; nothing to keep.
            ":requirements" => {}
            other => errors.push(format!("Unknown problem section '{}'", other)),
        }
    }

    problem
}

fn parse_init(body: &[SExpr], problem: &mut PddlProblem, errors: &mut Vec<String>) {
    for entry in body {
        let tail = entry.tail();
        match entry.head() {
            Some("=") => match numeric_init(tail) {
                Some(init) => problem.numeric_init.push(init),
                None => errors.push(format!("Malformed numeric init '{}'", entry)),
            },
            Some("not") => match tail.first().and_then(|f| fact_from(f, Timing::Instant)) {
                Some(fact) => problem.init.push(PddlFact::negated(&fact.predicate, fact.args)),
                None => errors.push(format!("Malformed negated init '{}'", entry)),
            },
            // `(at 10 (fact))` timed initial literal
            Some("at") if is_timed_literal(tail) => {
                errors.push(format!("Timed initial literal skipped '{}'", entry));
            }
            Some(_) => {
                if let Some(fact) = fact_from(entry, Timing::Instant) {
                    problem.init.push(fact);
                }
            }
            None => errors.push(format!("Malformed init entry '{}'", entry)),
        }
    }
}

fn is_timed_literal(tail: &[SExpr]) -> bool {
    matches!(tail, [SExpr::Atom(time), SExpr::List(_)] if time.parse::<f64>().is_ok())
}

fn numeric_init(tail: &[SExpr]) -> Option<NumericInit> {
    let [target, value] = tail else {
        return None;
    };
    let value = value.as_atom()?.parse::<f64>().ok()?;
    let (function, args) = match target {
        SExpr::Atom(name) => (name.clone(), Vec::new()),
        SExpr::List(_) => (target.head()?.to_string(), target.atoms().split_off(1)),
    };
    Some(NumericInit {
        function,
        args,
        value,
    })
}

fn parse_metric(section: &SExpr, errors: &mut Vec<String>) -> Option<Metric> {
    let [direction, expression] = section.tail() else {
        errors.push(format!("Malformed metric '{}'", section));
        return None;
    };
    let direction = match direction.as_atom() {
        Some("minimize") => MetricDirection::Minimize,
        Some("maximize") => MetricDirection::Maximize,
        _ => {
            errors.push(format!("Unknown metric direction '{}'", direction));
            return None;
        }
    };
    Some(Metric {
        direction,
        expression: parse_numeric_expr(expression),
    })
}
