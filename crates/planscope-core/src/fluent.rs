//! Numeric fluents.
//!
//! A [`NumericFluent`] is a named numeric state variable such as a robot's
//! battery level. Every mutation goes through [`NumericFluent::set`], which
//! clamps to the configured bounds, so `min_value <= value <= max_value`
//! holds whenever bounds are set.

/// Builds the map key of a fluent: `name(arg1,arg2)`, or `name` when nullary.
///
/// # Examples
///
/// ```
/// use planscope_core::fluent_key;
///
/// assert_eq!(fluent_key("battery", &["r1".to_string()]), "battery(r1)");
/// assert_eq!(fluent_key("total-cost", &[]), "total-cost");
/// ```
pub fn fluent_key(name: &str, args: &[String]) -> String {
    if args.is_empty() {
        name.to_string()
    } else {
        format!("{}({})", name, args.join(","))
    }
}

/// Coarse category of a fluent, inferred from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FluentKind {
    Battery,
    Fuel,
    Capacity,
    #[default]
    Generic,
}

impl FluentKind {
    pub fn infer(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        if lower.contains("battery") || lower.contains("energy") || lower.contains("charge") {
            FluentKind::Battery
        } else if lower.contains("fuel") {
            FluentKind::Fuel
        } else if lower.contains("capacity") || lower.contains("load") {
            FluentKind::Capacity
        } else {
            FluentKind::Generic
        }
    }

    /// Display unit, when the category has a natural one.
    pub fn default_unit(self) -> Option<&'static str> {
        match self {
            FluentKind::Battery => Some("%"),
            FluentKind::Fuel => Some("L"),
            FluentKind::Capacity | FluentKind::Generic => None,
        }
    }
}

/// A named numeric state variable.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NumericFluent {
    pub name: String,
    value: f64,
    pub initial_value: f64,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub unit: Option<String>,
    pub object_id: Option<String>,
    pub kind: FluentKind,
}

impl NumericFluent {
    /// Creates an unbounded fluent, inferring its kind from the name.
    pub fn new(name: impl Into<String>, initial_value: f64) -> Self {
        let name = name.into();
        let kind = FluentKind::infer(&name);
        Self {
            name,
            value: initial_value,
            initial_value,
            min_value: None,
            max_value: None,
            unit: kind.default_unit().map(str::to_string),
            object_id: None,
            kind,
        }
    }

    /// Sets bounds and clamps both the current and the initial value.
    pub fn with_bounds(mut self, min_value: f64, max_value: f64) -> Self {
        self.min_value = Some(min_value);
        self.max_value = Some(max_value);
        self.initial_value = self.clamp(self.initial_value);
        self.value = self.clamp(self.value);
        self
    }

    pub fn with_object(mut self, object_id: impl Into<String>) -> Self {
        self.object_id = Some(object_id.into());
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Sets the value, clamped to the bounds. Returns true if clamping occurred.
    pub fn set(&mut self, value: f64) -> bool {
        let clamped = self.clamp(value);
        self.value = clamped;
        clamped != value
    }

    /// Adds `delta`, clamped. Returns true if clamping occurred.
    pub fn add(&mut self, delta: f64) -> bool {
        self.set(self.value + delta)
    }

    /// Restores the initial value.
    pub fn reset(&mut self) {
        self.value = self.initial_value;
    }

    pub fn is_bounded(&self) -> bool {
        self.min_value.is_some() || self.max_value.is_some()
    }

    /// Fraction of the bounded range currently filled, when both bounds are set.
    pub fn fill_ratio(&self) -> Option<f64> {
        let (min, max) = (self.min_value?, self.max_value?);
        if max <= min {
            return None;
        }
        Some((self.value - min) / (max - min))
    }

    fn clamp(&self, value: f64) -> f64 {
        let mut v = value;
        if let Some(min) = self.min_value {
            v = v.max(min);
        }
        if let Some(max) = self.max_value {
            v = v.min(max);
        }
        v
    }
}
