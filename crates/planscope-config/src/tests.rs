//! Tests for planscope configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        [playback]
        speed = 4.0
        end_behavior = "pause"

        [parser]
        default_action_duration = 2.0
        zero_duration_substitute = 0.01

        [fluents]
        battery_max = 200.0
        use_heuristics = false
    "#;

    let config = PlanscopeConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.playback.speed, 4.0);
    assert_eq!(config.playback.end_behavior, EndBehavior::Pause);
    assert_eq!(config.parser.default_action_duration, 2.0);
    assert_eq!(config.parser.zero_duration_substitute, 0.01);
    assert_eq!(config.parser.classical_step_duration, 1.0);
    assert_eq!(config.fluents.battery_max, 200.0);
    assert!(!config.fluents.use_heuristics);
    // untouched table keeps its defaults
    assert_eq!(config.fluents.heuristics.len(), 8);
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        playback:
          speed: 0.5
        fluents:
          heuristics:
            - pattern: fly
              fluent: fuel
              delta: -3.5
            - pattern: refuel
              delta: 30
    "#;

    let config = PlanscopeConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.playback.speed, 0.5);
    assert_eq!(config.fluents.heuristics.len(), 2);
    assert_eq!(config.fluents.heuristics[0].fluent, "fuel");
    assert_eq!(config.fluents.heuristics[1].fluent, "battery");
}

#[test]
fn test_empty_toml_is_default() {
    let config = PlanscopeConfig::from_toml_str("").unwrap();
    assert_eq!(config, PlanscopeConfig::default());
}

#[test]
fn test_default_heuristics_match_spec_table() {
    let fluents = FluentConfig::default();
    assert_eq!(fluents.heuristic_for("move").map(|r| r.delta), Some(-20.0));
    assert_eq!(fluents.heuristic_for("drive-truck").map(|r| r.delta), Some(-20.0));
    assert_eq!(fluents.heuristic_for("recharge").map(|r| r.delta), Some(50.0));
    assert_eq!(fluents.heuristic_for("charge").map(|r| r.delta), Some(50.0));
    assert_eq!(fluents.heuristic_for("pick").map(|r| r.delta), Some(-5.0));
    assert_eq!(fluents.heuristic_for("unload-truck").map(|r| r.delta), Some(-5.0));
    assert!(fluents.heuristic_for("calibrate").is_none());
}

#[test]
fn test_heuristics_disabled() {
    let config = PlanscopeConfig::new().without_heuristics();
    assert!(config.fluents.heuristic_for("move").is_none());
}

#[test]
fn test_builder() {
    let config = PlanscopeConfig::new()
        .with_speed(3.0)
        .with_heuristic(HeuristicRule::new("fly", "fuel", -1.0));

    assert_eq!(config.playback.speed, 3.0);
    assert_eq!(config.fluents.heuristics.last().unwrap().pattern, "fly");
    assert!(config.validate().is_ok());
}

#[test]
fn test_invalid_speed_rejected() {
    let err = PlanscopeConfig::from_toml_str("[playback]\nspeed = 0.0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_inverted_battery_bounds_rejected() {
    let err =
        PlanscopeConfig::from_toml_str("[fluents]\nbattery_min = 50.0\nbattery_max = 10.0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = PlanscopeConfig::load("does-not-exist/planscope.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}
