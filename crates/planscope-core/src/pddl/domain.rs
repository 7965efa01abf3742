//! Domain records.

use super::{NumericCondition, NumericEffect, PddlFact, OBJECT_TYPE};

/// A declared type and its parent (`None` means the implicit `object`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PddlType {
    pub name: String,
    pub parent: Option<String>,
}

impl PddlType {
    pub fn new(name: impl Into<String>, parent: Option<String>) -> Self {
        Self {
            name: name.into(),
            parent,
        }
    }
}

/// A typed parameter `?r - robot`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PddlParameter {
    pub name: String,
    pub param_type: String,
}

impl PddlParameter {
    pub fn new(name: impl Into<String>, param_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PddlPredicate {
    pub name: String,
    pub parameters: Vec<PddlParameter>,
}

/// A numeric function declaration `(battery ?r - robot) - number`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PddlFunction {
    pub name: String,
    pub parameters: Vec<PddlParameter>,
    pub return_type: Option<String>,
}

/// Which section keyword introduced an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ActionKind {
    #[default]
    Action,
    DurativeAction,
    Process,
    Event,
}

/// An operator: action, durative action, process or event.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PddlAction {
    pub name: String,
    pub kind: ActionKind,
    pub parameters: Vec<PddlParameter>,
    /// Raw `:duration` constraint rendered as text, e.g. `(= ?duration 5)`.
    pub duration: Option<String>,
    pub preconditions: Vec<PddlFact>,
    pub numeric_conditions: Vec<NumericCondition>,
    pub effects: Vec<PddlFact>,
    pub numeric_effects: Vec<NumericEffect>,
    /// The operator's full s-expression rendered back to text.
    ///
    /// Classification runs its textual cues over this.
    pub source: String,
}

impl PddlAction {
    pub fn new(name: impl Into<String>, kind: ActionKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Self::default()
        }
    }

    /// True when the operator uses durative syntax.
    pub fn is_durative(&self) -> bool {
        self.kind == ActionKind::DurativeAction
            || self.duration.is_some()
            || self.source.contains("at start")
            || self.source.contains("at end")
            || self.source.contains("over all")
    }

    pub fn has_numeric_effects(&self) -> bool {
        !self.numeric_effects.is_empty()
    }

    /// Parameter names in declaration order.
    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(|p| p.name.as_str())
    }
}

/// A parsed domain.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PddlDomain {
    pub name: String,
    pub requirements: Vec<String>,
    pub types: Vec<PddlType>,
    /// Domain constants, typed like problem objects.
    pub constants: Vec<super::PddlObject>,
    pub predicates: Vec<PddlPredicate>,
    pub functions: Vec<PddlFunction>,
    pub actions: Vec<PddlAction>,
    pub processes: Vec<PddlAction>,
    pub events: Vec<PddlAction>,
}

impl PddlDomain {
    /// Upper bound on hierarchy walks; protects against cyclic type declarations.
    const MAX_TYPE_DEPTH: usize = 64;

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn has_requirement(&self, requirement: &str) -> bool {
        self.requirements.iter().any(|r| r == requirement)
    }

    pub fn find_type(&self, name: &str) -> Option<&PddlType> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn find_predicate(&self, name: &str) -> Option<&PddlPredicate> {
        self.predicates.iter().find(|p| p.name == name)
    }

    pub fn find_function(&self, name: &str) -> Option<&PddlFunction> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Looks up an operator by name across actions, processes and events.
    pub fn find_action(&self, name: &str) -> Option<&PddlAction> {
        self.all_operators().find(|a| a.name == name)
    }

    /// Actions, then processes, then events.
    pub fn all_operators(&self) -> impl Iterator<Item = &PddlAction> {
        self.actions
            .iter()
            .chain(self.processes.iter())
            .chain(self.events.iter())
    }

    /// Returns true if `name` is declared or is the built-in `object` type.
    pub fn is_known_type(&self, name: &str) -> bool {
        name == OBJECT_TYPE
            || self.find_type(name).is_some()
            || self.types.iter().any(|t| t.parent.as_deref() == Some(name))
    }

    /// Ancestors of `name`, nearest first, ending at `object`.
    ///
    /// The walk is bounded, so a cyclic declaration terminates.
    pub fn type_ancestors(&self, name: &str) -> Vec<String> {
        let mut ancestors = Vec::new();
        let mut current = name.to_string();
        for _ in 0..Self::MAX_TYPE_DEPTH {
            let Some(parent) = self.find_type(&current).and_then(|t| t.parent.clone()) else {
                break;
            };
            if parent == name || ancestors.contains(&parent) {
                break;
            }
            ancestors.push(parent.clone());
            current = parent;
        }
        if ancestors.last().map(String::as_str) != Some(OBJECT_TYPE) && name != OBJECT_TYPE {
            ancestors.push(OBJECT_TYPE.to_string());
        }
        ancestors
    }

    /// Returns true if `child` equals `ancestor` or descends from it.
    pub fn is_subtype_of(&self, child: &str, ancestor: &str) -> bool {
        child == ancestor || self.type_ancestors(child).iter().any(|t| t == ancestor)
    }
}
