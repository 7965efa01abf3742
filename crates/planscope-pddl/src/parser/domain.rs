//! `(define (domain ...))` walker.

use planscope_core::{
    ActionKind, PddlAction, PddlDomain, PddlFunction, PddlObject, PddlParameter, PddlPredicate,
    PddlType, Timing, OBJECT_TYPE,
};

use super::effects::{collect_conditions, collect_effects, Collected};
use super::typed_list::{parse_typed_list, typed_names};
use crate::sexpr::SExpr;

/// Walks the sections of a domain `define` form.
pub(crate) fn parse_domain_form(define: &SExpr, errors: &mut Vec<String>) -> PddlDomain {
    let mut domain = PddlDomain::default();

    for section in define.tail() {
        let Some(keyword) = section.head() else {
            errors.push(format!("Unexpected top-level item '{}'", section));
            continue;
        };
        let body = section.tail();
        match keyword {
            "domain" => match body.first().and_then(SExpr::as_atom) {
                Some(name) => domain.name = name.to_string(),
                None => errors.push("Domain name is missing".to_string()),
            },
            ":requirements" => {
                domain.requirements = body
                    .iter()
                    .filter_map(|r| r.as_atom().map(str::to_string))
                    .collect();
            }
            ":types" => domain.types = parse_types(body),
            ":constants" => {
                domain.constants = typed_names(body, OBJECT_TYPE)
                    .into_iter()
                    .map(|(name, ty)| PddlObject::new(name, ty))
                    .collect();
            }
            ":predicates" => domain.predicates = parse_predicates(body, errors),
            ":functions" => domain.functions = parse_functions(body, errors),
            ":action" => push_operator(&mut domain.actions, section, ActionKind::Action, errors),
            ":durative-action" => push_operator(
                &mut domain.actions,
                section,
                ActionKind::DurativeAction,
                errors,
            ),
            ":process" => push_operator(&mut domain.processes, section, ActionKind::Process, errors),
            ":event" => push_operator(&mut domain.events, section, ActionKind::Event, errors),
            other => errors.push(format!("Unknown domain section '{}'", other)),
        }
    }

    domain
}

fn parse_types(body: &[SExpr]) -> Vec<PddlType> {
    parse_typed_list(body)
        .into_iter()
        .filter_map(|(item, parent)| {
            let name = item.as_atom()?;
            Some(PddlType::new(name, parent))
        })
        .collect()
}

fn parameters(items: &[SExpr]) -> Vec<PddlParameter> {
    typed_names(items, OBJECT_TYPE)
        .into_iter()
        .map(|(name, ty)| PddlParameter::new(name, ty))
        .collect()
}

fn parse_predicates(body: &[SExpr], errors: &mut Vec<String>) -> Vec<PddlPredicate> {
    let mut predicates = Vec::with_capacity(body.len());
    for decl in body {
        match decl.head() {
            Some(name) => predicates.push(PddlPredicate {
                name: name.to_string(),
                parameters: parameters(decl.tail()),
            }),
            None => errors.push(format!("Malformed predicate declaration '{}'", decl)),
        }
    }
    predicates
}

fn parse_functions(body: &[SExpr], errors: &mut Vec<String>) -> Vec<PddlFunction> {
    let mut functions = Vec::new();
    for (decl, return_type) in parse_typed_list(body) {
        match decl.head() {
            Some(name) => functions.push(PddlFunction {
                name: name.to_string(),
                parameters: parameters(decl.tail()),
                return_type,
            }),
            None => errors.push(format!("Malformed function declaration '{}'", decl)),
        }
    }
    functions
}

fn push_operator(
    target: &mut Vec<PddlAction>,
    section: &SExpr,
    kind: ActionKind,
    errors: &mut Vec<String>,
) {
    if let Some(operator) = parse_operator(section, kind, errors) {
        target.push(operator);
    }
}

/// Parses `(:action NAME :key value ...)` and its durative/process/event forms.
fn parse_operator(section: &SExpr, kind: ActionKind, errors: &mut Vec<String>) -> Option<PddlAction> {
    let body = section.tail();
    let Some(name) = body.first().and_then(SExpr::as_atom) else {
        errors.push(format!("Operator without a name '{}'", section));
        return None;
    };

    let mut operator = PddlAction::new(name, kind);
    operator.source = section.to_string();
    let mut collected = Collected::default();

    for pair in body[1..].chunks(2) {
        let [key, value] = pair else {
            errors.push(format!("Operator '{}': missing value for '{}'", name, pair[0]));
            break;
        };
        match key.as_atom() {
            Some(":parameters") => {
                operator.parameters = parameters(value.as_list().unwrap_or(&[]));
            }
            Some(":precondition") | Some(":condition") => {
                let mut conditions = Collected::default();
                collect_conditions(value, Timing::Instant, &mut conditions);
                operator.preconditions.extend(conditions.facts);
                operator
                    .numeric_conditions
                    .extend(conditions.numeric_conditions);
                collected.errors.extend(conditions.errors);
            }
            Some(":effect") => collect_effects(value, Timing::Instant, &mut collected),
            Some(":duration") => operator.duration = Some(value.to_string()),
            _ => errors.push(format!("Operator '{}': unknown key '{}'", name, key)),
        }
    }

    operator.effects = collected.facts;
    operator.numeric_effects = collected.numeric_effects;
    errors.extend(
        collected
            .errors
            .into_iter()
            .map(|e| format!("Operator '{}': {}", name, e)),
    );
    Some(operator)
}
