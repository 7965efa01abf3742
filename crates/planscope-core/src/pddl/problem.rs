//! Problem records.

use super::{NumericExpr, PddlFact, OBJECT_TYPE};
use crate::fluent::fluent_key;

/// A typed object. The type is never empty; untyped objects get `object`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PddlObject {
    pub name: String,
    pub object_type: String,
}

impl PddlObject {
    pub fn new(name: impl Into<String>, object_type: impl Into<String>) -> Self {
        let object_type = object_type.into();
        Self {
            name: name.into(),
            object_type: if object_type.is_empty() {
                OBJECT_TYPE.to_string()
            } else {
                object_type
            },
        }
    }
}

/// An initial numeric value `(= (battery r1) 100)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NumericInit {
    pub function: String,
    pub args: Vec<String>,
    pub value: f64,
}

impl NumericInit {
    pub fn key(&self) -> String {
        fluent_key(&self.function, &self.args)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MetricDirection {
    Minimize,
    Maximize,
}

/// The problem's `:metric` section.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metric {
    pub direction: MetricDirection,
    pub expression: NumericExpr,
}

/// A parsed problem.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PddlProblem {
    pub name: String,
    pub domain: String,
    pub objects: Vec<PddlObject>,
    pub init: Vec<PddlFact>,
    pub goal: Vec<PddlFact>,
    pub numeric_init: Vec<NumericInit>,
    pub metric: Option<Metric>,
}

impl PddlProblem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn find_object(&self, name: &str) -> Option<&PddlObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// Objects whose declared type is exactly `object_type`.
    pub fn objects_of_type<'a>(
        &'a self,
        object_type: &'a str,
    ) -> impl Iterator<Item = &'a PddlObject> {
        self.objects.iter().filter(move |o| o.object_type == object_type)
    }

    /// Initial value of a numeric fluent by key, if declared.
    pub fn initial_value(&self, key: &str) -> Option<f64> {
        self.numeric_init
            .iter()
            .find(|n| n.key() == key)
            .map(|n| n.value)
    }
}
