//! Dialect classification of parsed domains.
//!
//! A fixed precedence cascade looks at `:requirements` and at structural cues,
//! because real-world files often omit or mis-state their requirements:
//!
//! 1. PDDL+ - process/event requirements, declared processes/events, or `#t`
//! 2. Temporal / Metric-Temporal - durative requirements and durative syntax
//! 3. Numeric - numeric requirements or functions, and numeric operators
//! 4. Classical - no requirements beyond `:strips`/`:typing`
//! 5. Unknown - everything else
//!
//! # Examples
//!
//! ```
//! use planscope_core::DomainType;
//! use planscope_pddl::{classify_domain_type, parse_domain};
//!
//! let domain = parse_domain(
//!     "(define (domain d) (:requirements :strips) (:action a :effect (done)))",
//! )
//! .unwrap()
//! .value;
//! assert_eq!(classify_domain_type(&domain), DomainType::Classical);
//! ```

use planscope_core::{ActionKind, DomainType, PddlAction, PddlDomain};
use tracing::info;

const CLASSICAL_REQUIREMENTS: [&str; 2] = [":strips", ":typing"];
const DURATIVE_REQUIREMENTS: [&str; 2] = [":durative-actions", ":time"];
const NUMERIC_REQUIREMENTS: [&str; 2] = [":numeric-fluents", ":fluents"];
const NUMERIC_EFFECT_MARKERS: [&str; 3] = ["(increase ", "(decrease ", "(assign "];
const ARITHMETIC_MARKERS: [&str; 11] = [
    "(increase ",
    "(decrease ",
    "(assign ",
    "(scale-up ",
    "(scale-down ",
    "(+ ",
    "(- ",
    "(* ",
    "(/ ",
    "(>= ",
    "(<= ",
];
const CONTINUOUS_TIME_MARKER: &str = "#t";

/// Classification outcome with advisory metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainClassification {
    pub domain_type: DomainType,
    /// 0.3 for Unknown, 0.95 with corroborating structure, else 0.9.
    pub confidence: f64,
    /// Which requirements or structures drove the decision.
    pub indicators: Vec<String>,
    pub requirements: Vec<String>,
}

struct Verdict {
    domain_type: DomainType,
    indicators: Vec<String>,
    corroborated: bool,
}

impl Verdict {
    fn new(domain_type: DomainType) -> Self {
        Self {
            domain_type,
            indicators: Vec::new(),
            corroborated: false,
        }
    }
}

/// Returns the dialect of `domain`.
pub fn classify_domain_type(domain: &PddlDomain) -> DomainType {
    classify(domain).domain_type
}

/// Returns the dialect with a confidence score and indicator strings.
pub fn get_domain_classification_summary(domain: &PddlDomain) -> DomainClassification {
    let verdict = classify(domain);
    let confidence = match verdict.domain_type {
        DomainType::Unknown => 0.3,
        _ if verdict.corroborated => 0.95,
        _ => 0.9,
    };

    info!(
        event = "domain_classified",
        domain = %domain.name,
        domain_type = verdict.domain_type.tag(),
        confidence,
    );

    DomainClassification {
        domain_type: verdict.domain_type,
        confidence,
        indicators: verdict.indicators,
        requirements: domain.requirements.clone(),
    }
}

fn has_any_requirement(domain: &PddlDomain, wanted: &[&str]) -> Option<String> {
    domain
        .requirements
        .iter()
        .find(|r| wanted.contains(&r.as_str()))
        .cloned()
}

fn source_has_any(action: &PddlAction, markers: &[&str]) -> bool {
    markers.iter().any(|m| action.source.contains(m))
}

fn classify(domain: &PddlDomain) -> Verdict {
    pddl_plus(domain)
        .or_else(|| temporal(domain))
        .or_else(|| numeric(domain))
        .or_else(|| classical(domain))
        .unwrap_or_else(|| {
            let mut verdict = Verdict::new(DomainType::Unknown);
            verdict.indicators.push(format!(
                "Requirements not covered by any dialect: {}",
                domain.requirements.join(" ")
            ));
            verdict
        })
}

fn pddl_plus(domain: &PddlDomain) -> Option<Verdict> {
    let mut verdict = Verdict::new(DomainType::PddlPlus);
    if let Some(req) = domain
        .requirements
        .iter()
        .find(|r| r.contains("process") || r.contains("event"))
    {
        verdict.indicators.push(format!("Requirement {}", req));
    }
    if !domain.processes.is_empty() || !domain.events.is_empty() {
        verdict.indicators.push(format!(
            "Declares {} process(es) and {} event(s)",
            domain.processes.len(),
            domain.events.len()
        ));
        verdict.corroborated = true;
    }
    if let Some(action) = domain
        .all_operators()
        .find(|a| a.source.contains(CONTINUOUS_TIME_MARKER))
    {
        verdict
            .indicators
            .push(format!("Continuous-time marker #t in '{}'", action.name));
        verdict.corroborated = true;
    }
    (!verdict.indicators.is_empty()).then_some(verdict)
}

fn temporal(domain: &PddlDomain) -> Option<Verdict> {
    let requirement = has_any_requirement(domain, &DURATIVE_REQUIREMENTS)?;
    let durative: Vec<&PddlAction> = domain.actions.iter().filter(|a| a.is_durative()).collect();
    let first = durative.first()?;

    let numeric_action = durative
        .iter()
        .find(|a| a.has_numeric_effects() || source_has_any(a, &NUMERIC_EFFECT_MARKERS));
    let numeric_requirement = has_any_requirement(domain, &NUMERIC_REQUIREMENTS);

    let mut verdict = Verdict::new(DomainType::Temporal);
    verdict.indicators.push(format!("Requirement {}", requirement));
    verdict
        .indicators
        .push(format!("Durative action '{}'", first.name));
    verdict.corroborated = durative
        .iter()
        .any(|a| a.kind == ActionKind::DurativeAction && a.duration.is_some());

    if numeric_action.is_some() || numeric_requirement.is_some() {
        verdict.domain_type = DomainType::MetricTemporal;
        if let Some(action) = numeric_action {
            verdict
                .indicators
                .push(format!("Numeric effects in durative action '{}'", action.name));
        }
        if let Some(req) = numeric_requirement {
            verdict.indicators.push(format!("Requirement {}", req));
        }
    }
    Some(verdict)
}

fn numeric(domain: &PddlDomain) -> Option<Verdict> {
    let mut verdict = Verdict::new(DomainType::Numeric);
    match has_any_requirement(domain, &NUMERIC_REQUIREMENTS) {
        Some(req) => verdict.indicators.push(format!("Requirement {}", req)),
        None if !domain.functions.is_empty() => verdict
            .indicators
            .push(format!("Declares {} function(s)", domain.functions.len())),
        None => return None,
    }

    let action = domain.actions.iter().find(|a| {
        a.has_numeric_effects()
            || !a.numeric_conditions.is_empty()
            || source_has_any(a, &ARITHMETIC_MARKERS)
    })?;
    verdict
        .indicators
        .push(format!("Numeric operators in action '{}'", action.name));
    verdict.corroborated = !domain.functions.is_empty() && action.has_numeric_effects();
    Some(verdict)
}

fn classical(domain: &PddlDomain) -> Option<Verdict> {
    let only_basic = domain
        .requirements
        .iter()
        .all(|r| CLASSICAL_REQUIREMENTS.contains(&r.as_str()));
    if !only_basic {
        return None;
    }

    let mut verdict = Verdict::new(DomainType::Classical);
    if domain.requirements.is_empty() {
        verdict.indicators.push("No requirements declared".to_string());
    } else {
        verdict
            .indicators
            .push(format!("Requirements {}", domain.requirements.join(" ")));
    }
    verdict.corroborated = domain.functions.is_empty()
        && domain.actions.iter().all(|a| !a.is_durative() && !a.has_numeric_effects());
    Some(verdict)
}
