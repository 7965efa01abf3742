//! Numeric fluent store.
//!
//! A flat, ordered map from fluent key (`battery(r1)`) to [`NumericFluent`].
//! The scheduler is the only writer during playback; every write clamps.

use std::collections::BTreeMap;

use planscope_config::FluentConfig;
use planscope_core::{FluentKind, NumericFluent, NumericOp, PddlProblem};
use smallvec::SmallVec;
use tracing::debug;

use crate::effects::GroundEffect;

/// Splits `name(a,b)` into `("name", ["a", "b"])`.
pub fn split_key(key: &str) -> (&str, Vec<&str>) {
    match key.split_once('(') {
        Some((name, rest)) => {
            let args = rest
                .trim_end_matches(')')
                .split(',')
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .collect();
            (name, args)
        }
        None => (key, Vec::new()),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FluentStore {
    fluents: BTreeMap<String, NumericFluent>,
}

impl FluentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store from the problem's `(= (f args) v)` init entries.
    pub fn from_problem(problem: &PddlProblem, config: &FluentConfig) -> Self {
        let mut store = Self::new();
        for init in &problem.numeric_init {
            store.insert(make_fluent(&init.key(), init.value, config));
        }
        store
    }

    pub fn len(&self) -> usize {
        self.fluents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fluents.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fluents.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&NumericFluent> {
        self.fluents.get(key)
    }

    pub fn value(&self, key: &str) -> Option<f64> {
        self.fluents.get(key).map(NumericFluent::value)
    }

    pub fn initial_value(&self, key: &str) -> Option<f64> {
        self.fluents.get(key).map(|f| f.initial_value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NumericFluent)> {
        self.fluents.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Inserts or replaces a fluent under its name.
    pub fn insert(&mut self, fluent: NumericFluent) {
        self.fluents.insert(fluent.name.clone(), fluent);
    }

    /// Creates `key` if missing. Battery fluents start at the configured
    /// level inside the configured bounds; anything else starts at zero.
    pub fn ensure(&mut self, key: &str, config: &FluentConfig) -> &mut NumericFluent {
        self.fluents.entry(key.to_string()).or_insert_with(|| {
            let initial = match FluentKind::infer(split_key(key).0) {
                FluentKind::Battery => config.battery_initial,
                _ => 0.0,
            };
            make_fluent(key, initial, config)
        })
    }

    /// Applies one ground effect, reading its operand from the current values.
    ///
    /// Unknown fluents and unevaluable operands are left alone. Returns the
    /// new value.
    pub fn apply(&mut self, effect: &GroundEffect) -> Option<f64> {
        let amount = effect.operand(self)?;
        self.write(&effect.fluent, effect.operation, amount)
    }

    /// Applies the effects of one action as a single update: every operand is
    /// read before any fluent changes. Returns how many effects were applied.
    pub fn apply_all(&mut self, effects: &[GroundEffect]) -> usize {
        let amounts: SmallVec<[Option<f64>; 4]> =
            effects.iter().map(|e| e.operand(self)).collect();
        let mut applied = 0;
        for (effect, amount) in effects.iter().zip(amounts) {
            let Some(amount) = amount else {
                debug!(
                    fluent = %effect.fluent,
                    value = %effect.value,
                    "unevaluable effect skipped"
                );
                continue;
            };
            if self.write(&effect.fluent, effect.operation, amount).is_some() {
                applied += 1;
            }
        }
        applied
    }

    fn write(&mut self, key: &str, operation: NumericOp, amount: f64) -> Option<f64> {
        let fluent = self.fluents.get_mut(key)?;
        let target = operation.apply(fluent.value(), amount);
        if fluent.set(target) {
            debug!(
                event = "fluent_clamped",
                fluent = %key,
                requested = target,
                value = fluent.value(),
            );
        }
        Some(fluent.value())
    }

    /// Restores every fluent to its initial value.
    pub fn reset(&mut self) {
        for fluent in self.fluents.values_mut() {
            fluent.reset();
        }
    }

    pub fn clear(&mut self) {
        self.fluents.clear();
    }

    /// Current values keyed by fluent, for consumers that only read.
    pub fn snapshot(&self) -> BTreeMap<String, f64> {
        self.fluents
            .iter()
            .map(|(k, v)| (k.clone(), v.value()))
            .collect()
    }
}

fn make_fluent(key: &str, initial: f64, config: &FluentConfig) -> NumericFluent {
    let (name, args) = split_key(key);
    let mut fluent = NumericFluent::new(key, initial);
    fluent.kind = FluentKind::infer(name);
    fluent.unit = fluent.kind.default_unit().map(str::to_string);
    if let Some(object) = args.first() {
        fluent = fluent.with_object(*object);
    }
    if fluent.kind == FluentKind::Battery {
        fluent = fluent.with_bounds(config.battery_min, config.battery_max);
    }
    fluent
}

#[cfg(test)]
mod tests {
    use super::*;
    use planscope_core::{NumericExpr, NumericInit};
    use proptest::prelude::*;

    fn effect(fluent: &str, operation: NumericOp, value: f64) -> GroundEffect {
        GroundEffect::constant(fluent, operation, value)
    }

    fn fluent(name: &str, arg: &str) -> NumericExpr {
        NumericExpr::Fluent {
            name: name.into(),
            args: vec![arg.into()],
        }
    }

    #[test]
    fn test_split_key() {
        assert_eq!(split_key("battery(r1)"), ("battery", vec!["r1"]));
        assert_eq!(split_key("distance(wp0,wp1)"), ("distance", vec!["wp0", "wp1"]));
        assert_eq!(split_key("total-cost"), ("total-cost", vec![]));
    }

    #[test]
    fn test_from_problem() {
        let mut problem = PddlProblem::new("p");
        problem.numeric_init = vec![
            NumericInit {
                function: "battery".into(),
                args: vec!["r1".into()],
                value: 160.0,
            },
            NumericInit {
                function: "total-cost".into(),
                args: vec![],
                value: 0.0,
            },
        ];
        let store = FluentStore::from_problem(&problem, &FluentConfig::default());
        assert_eq!(store.len(), 2);

        let battery = store.get("battery(r1)").unwrap();
        assert_eq!(battery.kind, FluentKind::Battery);
        assert_eq!(battery.object_id.as_deref(), Some("r1"));
        assert_eq!(battery.value(), 100.0);
        assert_eq!(store.get("total-cost").unwrap().min_value, None);
    }

    #[test]
    fn test_ensure_defaults() {
        let mut store = FluentStore::new();
        let config = FluentConfig {
            battery_initial: 80.0,
            ..FluentConfig::default()
        };
        assert_eq!(store.ensure("battery(r2)", &config).value(), 80.0);
        assert_eq!(store.ensure("fuel(t1)", &config).value(), 0.0);
        store.ensure("battery(r2)", &config).add(-10.0);
        assert_eq!(store.ensure("battery(r2)", &config).value(), 70.0);
    }

    #[test]
    fn test_apply_and_reset() {
        let mut store = FluentStore::new();
        store.ensure("battery(r1)", &FluentConfig::default());

        assert_eq!(store.apply(&effect("battery(r1)", NumericOp::Decrease, 30.0)), Some(70.0));
        assert_eq!(store.apply(&effect("battery(r1)", NumericOp::Increase, 50.0)), Some(100.0));
        assert_eq!(store.apply(&effect("battery(r1)", NumericOp::Assign, -5.0)), Some(0.0));
        assert_eq!(store.apply(&effect("missing", NumericOp::Assign, 1.0)), None);

        store.reset();
        assert_eq!(store.value("battery(r1)"), Some(100.0));
        assert_eq!(store.snapshot().get("battery(r1)"), Some(&100.0));
    }

    #[test]
    fn test_operand_reads_live_values() {
        let mut store = FluentStore::new();
        store.ensure("level(r1)", &FluentConfig::default());
        let step = GroundEffect {
            fluent: "level(r1)".into(),
            operation: NumericOp::Assign,
            value: NumericExpr::Operation {
                operator: "+".into(),
                operands: vec![fluent("level", "r1"), NumericExpr::number(10.0)],
            },
        };
        assert_eq!(store.apply(&step), Some(10.0));
        assert_eq!(store.apply(&step), Some(20.0));
        assert_eq!(store.initial_value("level(r1)"), Some(0.0));
    }

    #[test]
    fn test_apply_all_reads_operands_before_writing() {
        let config = FluentConfig::default();
        let mut store = FluentStore::new();
        store.ensure("load(t1)", &config).set(3.0);
        store.ensure("fuel(t1)", &config).set(20.0);
        let effects = [
            effect("load(t1)", NumericOp::Increase, 1.0),
            GroundEffect {
                fluent: "fuel(t1)".into(),
                operation: NumericOp::Decrease,
                value: NumericExpr::Operation {
                    operator: "*".into(),
                    operands: vec![NumericExpr::number(2.0), fluent("load", "t1")],
                },
            },
            GroundEffect {
                fluent: "fuel(t1)".into(),
                operation: NumericOp::Increase,
                value: fluent("unknown", "t1"),
            },
        ];
        assert_eq!(store.apply_all(&effects), 2);
        assert_eq!(store.value("load(t1)"), Some(4.0));
        assert_eq!(store.value("fuel(t1)"), Some(14.0));
    }

    proptest! {
        #[test]
        fn test_bounded_fluents_stay_in_range(deltas in prop::collection::vec(-250.0f64..250.0, 0..40)) {
            let mut store = FluentStore::new();
            let config = FluentConfig::default();
            store.ensure("battery(r1)", &config);
            for delta in deltas {
                let operation = if delta < 0.0 { NumericOp::Decrease } else { NumericOp::Increase };
                let value = store.apply(&effect("battery(r1)", operation, delta.abs())).unwrap();
                prop_assert!((config.battery_min..=config.battery_max).contains(&value));
            }
        }
    }
}
