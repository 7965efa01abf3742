//! One-call loader that hides the wiring between the crates.

use std::fs;
use std::path::Path;

use planscope_config::PlanscopeConfig;
use planscope_core::{Dialect, DomainType, PddlDomain, PddlProblem, Plan, Result};
use planscope_parser::PlanParser;
use planscope_pddl::{
    get_domain_classification_summary, parse_domain, parse_problem, validate_domain_problem,
    DomainClassification,
};
use planscope_player::{PlanContext, Player};
use tracing::info;

/// Advisory findings gathered while loading.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    pub domain: Vec<String>,
    pub problem: Vec<String>,
    pub validation: Vec<String>,
}

impl Diagnostics {
    pub fn is_empty(&self) -> bool {
        self.domain.is_empty() && self.problem.is_empty() && self.validation.is_empty()
    }

    pub fn len(&self) -> usize {
        self.domain.len() + self.problem.len() + self.validation.len()
    }

    /// Every finding, prefixed with where it came from.
    pub fn all(&self) -> impl Iterator<Item = String> + '_ {
        self.domain
            .iter()
            .map(|d| format!("domain: {}", d))
            .chain(self.problem.iter().map(|p| format!("problem: {}", p)))
            .chain(self.validation.iter().map(|v| format!("validation: {}", v)))
    }
}

/// A domain, problem and plan loaded into a ready [`Player`].
#[derive(Debug)]
pub struct Session {
    pub domain: PddlDomain,
    pub problem: PddlProblem,
    pub classification: DomainClassification,
    pub diagnostics: Diagnostics,
    pub player: Player,
}

impl Session {
    /// Parses all three inputs, classifies the domain and loads the plan.
    ///
    /// Fails only when the domain or problem has no `(define ...)` form or
    /// the planner output yields no actions.
    pub fn from_texts(
        domain_text: &str,
        problem_text: &str,
        output_text: &str,
        config: &PlanscopeConfig,
    ) -> Result<Self> {
        #[cfg(feature = "console")]
        planscope_console::init();

        let domain = parse_domain(domain_text)?;
        let problem = parse_problem(problem_text)?;
        let classification = get_domain_classification_summary(&domain.value);
        let validation = validate_domain_problem(&domain.value, &problem.value);

        let plan = PlanParser::new(config.parser.clone()).parse(output_text)?;
        let plan = upgrade_dialect(plan, classification.domain_type);

        let mut player = Player::new(config);
        let context = PlanContext::new()
            .with_domain(&domain.value, classification.domain_type)
            .with_problem(&problem.value);
        player.load(plan, &context);

        let diagnostics = Diagnostics {
            domain: domain.errors,
            problem: problem.errors,
            validation,
        };
        info!(
            domain = %domain.value.name,
            problem = %problem.value.name,
            domain_type = classification.domain_type.tag(),
            diagnostics = diagnostics.len(),
            "session ready"
        );

        Ok(Self {
            domain: domain.value,
            problem: problem.value,
            classification,
            diagnostics,
            player,
        })
    }

    /// Reads the three inputs from disk, then behaves like [`Session::from_texts`].
    pub fn from_files(
        domain_path: impl AsRef<Path>,
        problem_path: impl AsRef<Path>,
        output_path: impl AsRef<Path>,
        config: &PlanscopeConfig,
    ) -> Result<Self> {
        let domain = fs::read_to_string(domain_path)?;
        let problem = fs::read_to_string(problem_path)?;
        let output = fs::read_to_string(output_path)?;
        Self::from_texts(&domain, &problem, &output, config)
    }

    pub fn plan(&self) -> Option<&Plan> {
        self.player.plan()
    }

    pub fn domain_type(&self) -> DomainType {
        self.classification.domain_type
    }
}

/// A temporal transcript over a metric-temporal domain is metric-temporal.
fn upgrade_dialect(plan: Plan, domain_type: DomainType) -> Plan {
    if plan.dialect == Dialect::Temporal && domain_type == DomainType::MetricTemporal {
        plan.with_dialect(Dialect::MetricTemporal)
    } else {
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planscope_core::PlanscopeError;
    use planscope_test::{domains, problems, transcripts};

    #[test]
    fn test_numeric_session() {
        let session = Session::from_texts(
            domains::NUMERIC_ROVERS,
            problems::NUMERIC_ROVERS,
            transcripts::ENHSP,
            &PlanscopeConfig::default(),
        )
        .unwrap();
        assert_eq!(session.domain_type(), DomainType::Numeric);
        assert!(session.diagnostics.is_empty(), "{:?}", session.diagnostics);
        assert_eq!(session.plan().unwrap().dialect, Dialect::Numeric);
        assert_eq!(session.player.fluents().value("battery(r1)"), Some(60.0));
    }

    #[test]
    fn test_metric_temporal_upgrade() {
        let session = Session::from_texts(
            domains::METRIC_TEMPORAL_DELIVERY,
            problems::DELIVERY,
            transcripts::OPTIC,
            &PlanscopeConfig::default(),
        )
        .unwrap();
        assert_eq!(session.domain_type(), DomainType::MetricTemporal);
        assert_eq!(session.plan().unwrap().dialect, Dialect::MetricTemporal);
    }

    #[test]
    fn test_classical_session_has_no_fluents() {
        let session = Session::from_texts(
            domains::GRIPPER,
            problems::GRIPPER,
            transcripts::FAST_DOWNWARD,
            &PlanscopeConfig::default(),
        )
        .unwrap();
        assert_eq!(session.domain_type(), DomainType::Classical);
        assert!(session.player.fluents().is_empty());
    }

    #[test]
    fn test_no_actions_is_an_error() {
        let err = Session::from_texts(
            domains::GRIPPER,
            problems::GRIPPER,
            transcripts::NO_ACTIONS,
            &PlanscopeConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PlanscopeError::NoValidActions));
    }

    #[test]
    fn test_missing_define_is_an_error() {
        let err = Session::from_texts(
            "(domain nothing)",
            problems::GRIPPER,
            transcripts::FAST_DOWNWARD,
            &PlanscopeConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PlanscopeError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Session::from_files(
            "/nonexistent/domain.pddl",
            "/nonexistent/problem.pddl",
            "/nonexistent/plan.txt",
            &PlanscopeConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PlanscopeError::Io(_)));
    }

    const COUNTER_DOMAIN: &str = "
(define (domain counter)
  (:requirements :numeric-fluents)
  (:functions (level ?r))
  (:action step
    :parameters (?r)
    :effect (assign (level ?r) (+ (level ?r) 10))))
";

    const COUNTER_PROBLEM: &str = "
(define (problem count-three)
  (:domain counter)
  (:objects r1)
  (:init (= (level r1) 0))
  (:goal (and)))
";

    fn counter_session() -> Session {
        Session::from_texts(
            COUNTER_DOMAIN,
            COUNTER_PROBLEM,
            "0: (step r1)\n1: (step r1)\n2: (step r1)\n",
            &PlanscopeConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_self_referential_effect_accumulates_on_seek() {
        let mut session = counter_session();
        assert_eq!(session.domain_type(), DomainType::Numeric);

        let frame = session.player.seek(3.0);
        assert_eq!(frame.fluents.get("level(r1)"), Some(&30.0));

        session.player.seek(0.0);
        let frame = session.player.seek(3.0);
        assert_eq!(frame.fluents.get("level(r1)"), Some(&30.0));
    }

    #[test]
    fn test_self_referential_effect_accumulates_when_ticking() {
        let mut session = counter_session();
        session.player.play();
        while session.player.timeline().is_playing() {
            session.player.advance(std::time::Duration::from_millis(250));
        }
        assert_eq!(session.player.fluents().value("level(r1)"), Some(30.0));
    }

    #[test]
    fn test_diagnostics_are_tagged() {
        let diagnostics = Diagnostics {
            domain: vec!["a".into()],
            problem: vec![],
            validation: vec!["b".into()],
        };
        let all: Vec<String> = diagnostics.all().collect();
        assert_eq!(all, vec!["domain: a", "validation: b"]);
        assert_eq!(diagnostics.len(), 2);
    }
}
