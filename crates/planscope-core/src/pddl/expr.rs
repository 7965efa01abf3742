//! Numeric expressions, effects and conditions.

use std::collections::HashMap;
use std::fmt;

use super::Timing;
use crate::fluent::fluent_key;

/// Numeric effect operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum NumericOp {
    Increase,
    Decrease,
    Assign,
    ScaleUp,
    ScaleDown,
}

impl NumericOp {
    /// Parses the PDDL keyword (`increase`, `scale-up`, ...).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "increase" => Some(NumericOp::Increase),
            "decrease" => Some(NumericOp::Decrease),
            "assign" => Some(NumericOp::Assign),
            "scale-up" => Some(NumericOp::ScaleUp),
            "scale-down" => Some(NumericOp::ScaleDown),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            NumericOp::Increase => "increase",
            NumericOp::Decrease => "decrease",
            NumericOp::Assign => "assign",
            NumericOp::ScaleUp => "scale-up",
            NumericOp::ScaleDown => "scale-down",
        }
    }

    /// Applies the operator to `current` with operand `amount`.
    ///
    /// Scaling down by zero leaves the value unchanged.
    pub fn apply(self, current: f64, amount: f64) -> f64 {
        match self {
            NumericOp::Increase => current + amount,
            NumericOp::Decrease => current - amount,
            NumericOp::Assign => amount,
            NumericOp::ScaleUp => current * amount,
            NumericOp::ScaleDown if amount == 0.0 => current,
            NumericOp::ScaleDown => current / amount,
        }
    }
}

impl fmt::Display for NumericOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A numeric expression tree as found in effects, conditions and metrics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum NumericExpr {
    Number { value: f64 },
    /// Function application such as `(battery ?r)`.
    Fluent { name: String, args: Vec<String> },
    /// Bare atom: a parameter (`?duration`), `#t`, or a zero-ary function name.
    Variable { name: String },
    /// Arithmetic node such as `(* #t (rate ?r))`.
    Operation {
        operator: String,
        operands: Vec<NumericExpr>,
    },
}

impl NumericExpr {
    pub fn number(value: f64) -> Self {
        NumericExpr::Number { value }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            NumericExpr::Number { value } => Some(*value),
            _ => None,
        }
    }

    /// Replaces lifted parameters (`?x`) with the bound objects.
    pub fn substitute(&self, bindings: &HashMap<String, String>) -> NumericExpr {
        let bind = |arg: &String| bindings.get(arg).cloned().unwrap_or_else(|| arg.clone());
        match self {
            NumericExpr::Number { value } => NumericExpr::Number { value: *value },
            NumericExpr::Fluent { name, args } => NumericExpr::Fluent {
                name: name.clone(),
                args: args.iter().map(bind).collect(),
            },
            NumericExpr::Variable { name } => NumericExpr::Variable { name: bind(name) },
            NumericExpr::Operation { operator, operands } => NumericExpr::Operation {
                operator: operator.clone(),
                operands: operands.iter().map(|o| o.substitute(bindings)).collect(),
            },
        }
    }

    /// Evaluates the expression, resolving fluents and variables by key.
    ///
    /// Returns `None` when a referenced value is unknown or the operator is
    /// not arithmetic.
    pub fn evaluate(&self, resolve: &dyn Fn(&str) -> Option<f64>) -> Option<f64> {
        match self {
            NumericExpr::Number { value } => Some(*value),
            NumericExpr::Fluent { name, args } => resolve(&fluent_key(name, args)),
            NumericExpr::Variable { name } => resolve(name),
            NumericExpr::Operation { operator, operands } => {
                let values = operands
                    .iter()
                    .map(|o| o.evaluate(resolve))
                    .collect::<Option<Vec<f64>>>()?;
                match (operator.as_str(), values.as_slice()) {
                    ("-", [single]) => Some(-single),
                    ("+", [first, rest @ ..]) => Some(rest.iter().fold(*first, |a, b| a + b)),
                    ("-", [first, rest @ ..]) => Some(rest.iter().fold(*first, |a, b| a - b)),
                    ("*", [first, rest @ ..]) => Some(rest.iter().fold(*first, |a, b| a * b)),
                    ("/", [a, b]) if *b != 0.0 => Some(a / b),
                    _ => None,
                }
            }
        }
    }

    /// Collects the names of every fluent referenced by the expression.
    pub fn fluent_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_fluent_names(&mut names);
        names
    }

    fn collect_fluent_names<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            NumericExpr::Fluent { name, .. } => out.push(name),
            NumericExpr::Operation { operands, .. } => {
                for operand in operands {
                    operand.collect_fluent_names(out);
                }
            }
            NumericExpr::Number { .. } | NumericExpr::Variable { .. } => {}
        }
    }
}

impl fmt::Display for NumericExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericExpr::Number { value } => write!(f, "{}", value),
            NumericExpr::Fluent { name, args } if args.is_empty() => write!(f, "({})", name),
            NumericExpr::Fluent { name, args } => write!(f, "({} {})", name, args.join(" ")),
            NumericExpr::Variable { name } => f.write_str(name),
            NumericExpr::Operation { operator, operands } => {
                write!(f, "({}", operator)?;
                for operand in operands {
                    write!(f, " {}", operand)?;
                }
                f.write_str(")")
            }
        }
    }
}

/// A numeric effect `(increase (fuel ?t) 5)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NumericEffect {
    /// Function name, e.g. `fuel`.
    pub function: String,
    /// Function arguments, possibly lifted (`?t`).
    pub args: Vec<String>,
    pub operation: NumericOp,
    pub value: NumericExpr,
    #[cfg_attr(feature = "serde", serde(default))]
    pub timing: Timing,
}

impl NumericEffect {
    /// Fluent key of the affected function (`fuel(?t)`).
    pub fn key(&self) -> String {
        fluent_key(&self.function, &self.args)
    }
}

/// A numeric comparison such as `(>= (battery ?r) 10)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NumericCondition {
    pub comparator: String,
    pub left: NumericExpr,
    pub right: NumericExpr,
    #[cfg_attr(feature = "serde", serde(default))]
    pub timing: Timing,
}
