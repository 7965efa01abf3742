//! Numeric effect resolution.
//!
//! Every plan action is given a list of ground effects before playback.
//! Sources, most specific first:
//!
//! 1. effects printed in the transcript next to the action;
//! 2. the domain operator's declared numeric effects, grounded with the
//!    action's arguments (a transcript effect on the same fluent wins);
//! 3. the configured heuristic table, only when 1 and 2 yield nothing.
//!
//! Grounding binds parameters and the action duration but keeps the operand
//! as an expression. It is evaluated against the live store when the event
//! carrying it completes, so `(assign (level ?r) (+ (level ?r) 10))`
//! accumulates across repeated actions.
//!
//! Classical plans resolve to no effects and an empty store.

use std::collections::HashMap;

use planscope_config::FluentConfig;
use planscope_core::{
    fluent_key, Dialect, DomainType, NumericExpr, NumericOp, PddlDomain, PddlProblem, Plan,
    PlanAction, PlanNumericEffect,
};
use tracing::{debug, trace};

use crate::fluents::FluentStore;

/// Planning context the effects are resolved against.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanContext<'a> {
    pub domain: Option<&'a PddlDomain>,
    pub problem: Option<&'a PddlProblem>,
    /// Classifier verdict; `Unknown` defers to the plan's own dialect.
    pub domain_type: DomainType,
}

impl<'a> PlanContext<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_domain(mut self, domain: &'a PddlDomain, domain_type: DomainType) -> Self {
        self.domain = Some(domain);
        self.domain_type = domain_type;
        self
    }

    pub fn with_problem(mut self, problem: &'a PddlProblem) -> Self {
        self.problem = Some(problem);
        self
    }

    /// Classical domains skip fluent tracking entirely.
    pub fn is_classical(&self, plan: &Plan) -> bool {
        match self.domain_type {
            DomainType::Classical => true,
            DomainType::Unknown => plan.dialect == Dialect::Classical,
            _ => false,
        }
    }
}

/// A ground effect whose operand may still read other fluents.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundEffect {
    /// Fluent key, e.g. `battery(r1)`.
    pub fluent: String,
    pub operation: NumericOp,
    /// Operand with parameters and `?duration` bound.
    pub value: NumericExpr,
}

impl GroundEffect {
    pub fn constant(fluent: impl Into<String>, operation: NumericOp, value: f64) -> Self {
        Self {
            fluent: fluent.into(),
            operation,
            value: NumericExpr::number(value),
        }
    }

    /// The operand when it does not depend on any fluent.
    pub fn constant_value(&self) -> Option<f64> {
        self.value.as_number()
    }

    /// Evaluates the operand against the current values in `store`.
    pub fn operand(&self, store: &FluentStore) -> Option<f64> {
        self.value.evaluate(&|key| store.value(key))
    }
}

impl From<&PlanNumericEffect> for GroundEffect {
    fn from(effect: &PlanNumericEffect) -> Self {
        Self::constant(effect.fluent.clone(), effect.operation, effect.value)
    }
}

/// Resolution output: the seeded store and one effect list per action.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedEffects {
    pub store: FluentStore,
    /// Indexed like `plan.actions`.
    pub per_action: Vec<Vec<GroundEffect>>,
}

impl ResolvedEffects {
    pub fn for_action(&self, index: usize) -> &[GroundEffect] {
        self.per_action.get(index).map_or(&[], Vec::as_slice)
    }
}

/// Resolves the effects of every action and seeds the fluent store.
pub fn resolve_effects(plan: &Plan, context: &PlanContext<'_>, config: &FluentConfig) -> ResolvedEffects {
    if context.is_classical(plan) {
        debug!(actions = plan.len(), "classical plan: no numeric fluents");
        return ResolvedEffects {
            store: FluentStore::new(),
            per_action: vec![Vec::new(); plan.len()],
        };
    }

    let mut store = context
        .problem
        .map(|p| FluentStore::from_problem(p, config))
        .unwrap_or_default();

    let mut per_action = Vec::with_capacity(plan.len());
    for action in &plan.actions {
        let effects = resolve_action(action, context.domain, &store, config);
        for effect in &effects {
            store.ensure(&effect.fluent, config);
        }
        trace!(action = %action.id, effects = effects.len(), "effects resolved");
        per_action.push(effects);
    }

    ResolvedEffects { store, per_action }
}

fn resolve_action(
    action: &PlanAction,
    domain: Option<&PddlDomain>,
    store: &FluentStore,
    config: &FluentConfig,
) -> Vec<GroundEffect> {
    let mut effects: Vec<GroundEffect> = action
        .numeric_effects
        .iter()
        .map(GroundEffect::from)
        .collect();
    if let Some(domain) = domain {
        for grounded in ground_domain_effects(action, domain, store) {
            if !effects.iter().any(|e| e.fluent == grounded.fluent) {
                effects.push(grounded);
            }
        }
    }
    if effects.is_empty() {
        effects.extend(heuristic_effect(action, store, config));
    }
    effects
}

/// Grounds the operator's declared numeric effects with the action's arguments.
///
/// `?duration` and `#t` are bound to the action's duration. Effects whose
/// operand references a fluent the store does not know are dropped.
pub fn ground_domain_effects(
    action: &PlanAction,
    domain: &PddlDomain,
    store: &FluentStore,
) -> Vec<GroundEffect> {
    let Some(operator) = domain.all_operators().find(|op| op.name == action.name) else {
        return Vec::new();
    };
    let bindings: HashMap<String, String> = operator
        .parameter_names()
        .map(str::to_string)
        .zip(action.args.iter().cloned())
        .collect();

    operator
        .numeric_effects
        .iter()
        .filter_map(|effect| {
            let args: Vec<String> = effect
                .args
                .iter()
                .map(|a| bindings.get(a).cloned().unwrap_or_else(|| a.clone()))
                .collect();
            let grounded = GroundEffect {
                fluent: fluent_key(&effect.function, &args),
                operation: effect.operation,
                value: bind_duration(effect.value.substitute(&bindings), action.duration),
            };
            if grounded.operand(store).is_none() {
                debug!(
                    action = %action.id,
                    fluent = %grounded.fluent,
                    "unevaluable domain effect skipped"
                );
                return None;
            }
            Some(grounded)
        })
        .collect()
}

fn bind_duration(expr: NumericExpr, duration: f64) -> NumericExpr {
    match expr {
        NumericExpr::Variable { name } if name == "?duration" || name == "#t" => {
            NumericExpr::number(duration)
        }
        NumericExpr::Operation { operator, operands } => NumericExpr::Operation {
            operator,
            operands: operands
                .into_iter()
                .map(|o| bind_duration(o, duration))
                .collect(),
        },
        other => other,
    }
}

/// The first matching heuristic rule, bound to the acting object.
///
/// The acting object is the first argument that already owns the rule's
/// fluent, falling back to the first argument.
pub fn heuristic_effect(
    action: &PlanAction,
    store: &FluentStore,
    config: &FluentConfig,
) -> Option<GroundEffect> {
    let rule = config.heuristic_for(&action.name)?;
    let agent = action
        .args
        .iter()
        .find(|arg| store.contains(&fluent_key(&rule.fluent, std::slice::from_ref(*arg))))
        .or_else(|| action.args.first());
    let fluent = match agent {
        Some(agent) => fluent_key(&rule.fluent, std::slice::from_ref(agent)),
        None => rule.fluent.clone(),
    };
    let operation = if rule.delta < 0.0 {
        NumericOp::Decrease
    } else {
        NumericOp::Increase
    };
    Some(GroundEffect::constant(fluent, operation, rule.delta.abs()))
}

#[cfg(test)]
mod tests;
