//! Configuration system for planscope.
//!
//! Load playback, parser and fluent settings from TOML or YAML files to tune
//! how planner output is turned into a playable timeline without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use planscope_config::{EndBehavior, PlanscopeConfig};
//!
//! let config = PlanscopeConfig::from_toml_str(r#"
//!     [playback]
//!     speed = 2.0
//!     end_behavior = "pause"
//!
//!     [parser]
//!     zero_duration_substitute = 0.05
//!
//!     [[fluents.heuristics]]
//!     pattern = "fly"
//!     fluent = "fuel"
//!     delta = -10.0
//! "#).unwrap();
//!
//! assert_eq!(config.playback.speed, 2.0);
//! assert_eq!(config.playback.end_behavior, EndBehavior::Pause);
//! assert_eq!(config.fluents.heuristics.len(), 1);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use planscope_config::PlanscopeConfig;
//!
//! let config = PlanscopeConfig::load("planscope.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main planscope configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PlanscopeConfig {
    /// Timeline playback settings.
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// Planner-output parsing settings.
    #[serde(default)]
    pub parser: ParserConfig,

    /// Numeric fluent initialization settings.
    #[serde(default)]
    pub fluents: FluentConfig,
}

impl PlanscopeConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the playback speed multiplier.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.playback.speed = speed;
        self
    }

    /// Appends a fallback effect rule.
    pub fn with_heuristic(mut self, rule: HeuristicRule) -> Self {
        self.fluents.heuristics.push(rule);
        self
    }

    /// Disables the fallback effect table.
    pub fn without_heuristics(mut self) -> Self {
        self.fluents.use_heuristics = false;
        self
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.playback.speed > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "playback speed must be positive, got {}",
                self.playback.speed
            )));
        }
        if self.parser.default_action_duration < 0.0 || self.parser.classical_step_duration < 0.0 {
            return Err(ConfigError::Invalid(
                "action durations must not be negative".to_string(),
            ));
        }
        if !(self.parser.zero_duration_substitute > 0.0) {
            return Err(ConfigError::Invalid(
                "zero_duration_substitute must be positive".to_string(),
            ));
        }
        if self.fluents.battery_min > self.fluents.battery_max {
            return Err(ConfigError::Invalid(format!(
                "battery_min ({}) exceeds battery_max ({})",
                self.fluents.battery_min, self.fluents.battery_max
            )));
        }
        Ok(())
    }
}

/// What the timeline does when playback reaches the end of the plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndBehavior {
    /// Transition to Stopped.
    #[default]
    Stop,

    /// Transition to Paused.
    Pause,
}

/// Timeline playback configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct PlaybackConfig {
    /// Plan seconds advanced per wall-clock second.
    pub speed: f64,

    /// Behavior on reaching `total_duration`.
    pub end_behavior: EndBehavior,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            end_behavior: EndBehavior::Stop,
        }
    }
}

/// Planner-output parsing configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ParserConfig {
    /// Duration given to timestamped lines that carry no duration.
    pub default_action_duration: f64,

    /// Duration substituted for an explicit zero duration.
    pub zero_duration_substitute: f64,

    /// Duration of one step of a classical plan.
    pub classical_step_duration: f64,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            default_action_duration: 1.0,
            zero_duration_substitute: 0.1,
            classical_step_duration: 1.0,
        }
    }
}

/// A fallback effect: actions whose name contains `pattern` change `fluent` by `delta`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HeuristicRule {
    /// Substring matched against the action name.
    pub pattern: String,

    /// Fluent function name, bound to the acting object.
    #[serde(default = "default_heuristic_fluent")]
    pub fluent: String,

    /// Signed change applied once per action.
    pub delta: f64,
}

impl HeuristicRule {
    pub fn new(pattern: impl Into<String>, fluent: impl Into<String>, delta: f64) -> Self {
        Self {
            pattern: pattern.into(),
            fluent: fluent.into(),
            delta,
        }
    }

    pub fn matches(&self, action_name: &str) -> bool {
        action_name.contains(self.pattern.as_str())
    }
}

fn default_heuristic_fluent() -> String {
    "battery".to_string()
}

/// Numeric fluent configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct FluentConfig {
    /// Lower bound for battery-type fluents.
    pub battery_min: f64,

    /// Upper bound for battery-type fluents.
    pub battery_max: f64,

    /// Starting level of battery fluents created by the fallback table.
    pub battery_initial: f64,

    /// Whether the fallback table applies when no explicit effect exists.
    pub use_heuristics: bool,

    /// Fallback rules, first match wins.
    pub heuristics: Vec<HeuristicRule>,
}

impl FluentConfig {
    /// First rule whose pattern occurs in `action_name`.
    pub fn heuristic_for(&self, action_name: &str) -> Option<&HeuristicRule> {
        if !self.use_heuristics {
            return None;
        }
        self.heuristics.iter().find(|r| r.matches(action_name))
    }
}

impl Default for FluentConfig {
    fn default() -> Self {
        Self {
            battery_min: 0.0,
            battery_max: 100.0,
            battery_initial: 100.0,
            use_heuristics: true,
            heuristics: vec![
                HeuristicRule::new("recharge", "battery", 50.0),
                HeuristicRule::new("charge", "battery", 50.0),
                HeuristicRule::new("move", "battery", -20.0),
                HeuristicRule::new("drive", "battery", -20.0),
                HeuristicRule::new("pick", "battery", -5.0),
                HeuristicRule::new("drop", "battery", -5.0),
                HeuristicRule::new("unload", "battery", -5.0),
                HeuristicRule::new("load", "battery", -5.0),
            ],
        }
    }
}

#[cfg(test)]
mod tests;
