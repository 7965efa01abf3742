//! Planning dialect tags.
//!
//! A [`Dialect`] names one of the five planning formulations a plan can come
//! from. [`DomainType`] is the classifier's verdict on a domain and adds an
//! `Unknown` outcome for domains that match none of the cues.

use std::fmt;

/// One of the five planning formulations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Dialect {
    /// STRIPS-style instantaneous actions.
    #[default]
    Classical,
    /// Durative actions without numeric state.
    Temporal,
    /// Instantaneous actions over numeric fluents.
    Numeric,
    /// Durative actions that also change numeric fluents.
    MetricTemporal,
    /// Processes and events alongside actions.
    PddlPlus,
}

impl Dialect {
    /// All dialects in classification precedence order (highest first).
    pub const ALL: [Dialect; 5] = [
        Dialect::PddlPlus,
        Dialect::MetricTemporal,
        Dialect::Temporal,
        Dialect::Numeric,
        Dialect::Classical,
    ];

    /// Stable tag used in summaries and JSON output.
    pub fn tag(self) -> &'static str {
        match self {
            Dialect::Classical => "CLASSICAL",
            Dialect::Temporal => "TEMPORAL",
            Dialect::Numeric => "NUMERIC",
            Dialect::MetricTemporal => "METRIC_TEMPORAL",
            Dialect::PddlPlus => "PDDL_PLUS",
        }
    }

    /// Returns true for dialects whose actions carry real durations.
    pub fn is_durative(self) -> bool {
        matches!(
            self,
            Dialect::Temporal | Dialect::MetricTemporal | Dialect::PddlPlus
        )
    }

    /// Returns true for dialects that track numeric fluents.
    pub fn has_numeric_state(self) -> bool {
        matches!(
            self,
            Dialect::Numeric | Dialect::MetricTemporal | Dialect::PddlPlus
        )
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Dialect::Classical => "Classical",
            Dialect::Temporal => "Temporal",
            Dialect::Numeric => "Numeric",
            Dialect::MetricTemporal => "Metric-Temporal",
            Dialect::PddlPlus => "PDDL+",
        };
        f.write_str(label)
    }
}

/// Classifier verdict for a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum DomainType {
    Classical,
    Temporal,
    Numeric,
    MetricTemporal,
    PddlPlus,
    /// No stage of the classification cascade matched.
    #[default]
    Unknown,
}

impl DomainType {
    /// The dialect this verdict corresponds to, if any.
    pub fn dialect(self) -> Option<Dialect> {
        match self {
            DomainType::Classical => Some(Dialect::Classical),
            DomainType::Temporal => Some(Dialect::Temporal),
            DomainType::Numeric => Some(Dialect::Numeric),
            DomainType::MetricTemporal => Some(Dialect::MetricTemporal),
            DomainType::PddlPlus => Some(Dialect::PddlPlus),
            DomainType::Unknown => None,
        }
    }

    pub fn tag(self) -> &'static str {
        self.dialect().map_or("UNKNOWN", Dialect::tag)
    }

    pub fn is_classical(self) -> bool {
        self == DomainType::Classical
    }
}

impl From<Dialect> for DomainType {
    fn from(dialect: Dialect) -> Self {
        match dialect {
            Dialect::Classical => DomainType::Classical,
            Dialect::Temporal => DomainType::Temporal,
            Dialect::Numeric => DomainType::Numeric,
            Dialect::MetricTemporal => DomainType::MetricTemporal,
            Dialect::PddlPlus => DomainType::PddlPlus,
        }
    }
}

impl fmt::Display for DomainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.dialect() {
            Some(dialect) => dialect.fmt(f),
            None => f.write_str("Unknown"),
        }
    }
}
