//! Tests for numeric fluents.

use crate::fluent::*;

#[test]
fn test_kind_inference() {
    assert_eq!(FluentKind::infer("battery-level"), FluentKind::Battery);
    assert_eq!(FluentKind::infer("energy"), FluentKind::Battery);
    assert_eq!(FluentKind::infer("fuel"), FluentKind::Fuel);
    assert_eq!(FluentKind::infer("capacity"), FluentKind::Capacity);
    assert_eq!(FluentKind::infer("total-cost"), FluentKind::Generic);
}

#[test]
fn test_set_clamps_to_bounds() {
    let mut fluent = NumericFluent::new("battery(r1)", 50.0).with_bounds(0.0, 100.0);
    assert!(!fluent.add(30.0));
    assert_eq!(fluent.value(), 80.0);
    assert!(fluent.add(50.0));
    assert_eq!(fluent.value(), 100.0);
    assert!(fluent.set(-20.0));
    assert_eq!(fluent.value(), 0.0);
}

#[test]
fn test_unbounded_fluent_never_clamps() {
    let mut fluent = NumericFluent::new("total-cost", 0.0);
    assert!(!fluent.add(-1e9));
    assert_eq!(fluent.value(), -1e9);
    assert!(!fluent.is_bounded());
}

#[test]
fn test_bounds_clamp_initial_value() {
    let fluent = NumericFluent::new("battery(r1)", 150.0).with_bounds(0.0, 100.0);
    assert_eq!(fluent.initial_value, 100.0);
    assert_eq!(fluent.value(), 100.0);
}

#[test]
fn test_reset_restores_initial() {
    let mut fluent = NumericFluent::new("fuel(t1)", 10.0);
    fluent.add(5.0);
    fluent.reset();
    assert_eq!(fluent.value(), 10.0);
}

#[test]
fn test_fill_ratio() {
    let fluent = NumericFluent::new("battery(r1)", 25.0).with_bounds(0.0, 100.0);
    assert_eq!(fluent.fill_ratio(), Some(0.25));
    assert_eq!(NumericFluent::new("x", 1.0).fill_ratio(), None);
}

#[test]
fn test_battery_unit_default() {
    let fluent = NumericFluent::new("battery(r1)", 25.0);
    assert_eq!(fluent.unit.as_deref(), Some("%"));
}
