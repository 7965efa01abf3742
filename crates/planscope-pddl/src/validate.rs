//! Advisory domain/problem consistency checks.
//!
//! Nothing here is fatal: every finding is a human-readable string and the
//! caller decides what to do with it.

use planscope_core::{PddlDomain, PddlFact, PddlProblem};
use tracing::warn;

/// Cross-checks a problem against its domain.
///
/// Reports a domain-name mismatch, objects of undeclared types (only when the
/// domain declares types), init/goal facts over undeclared predicates or with
/// the wrong arity, and numeric init for undeclared functions.
pub fn validate_domain_problem(domain: &PddlDomain, problem: &PddlProblem) -> Vec<String> {
    let mut issues = Vec::new();

    if !problem.domain.is_empty() && problem.domain != domain.name {
        issues.push(format!(
            "Problem references domain '{}' but domain is '{}'",
            problem.domain, domain.name
        ));
    }

    if !domain.types.is_empty() {
        for object in &problem.objects {
            if !domain.is_known_type(&object.object_type) {
                issues.push(format!(
                    "Object '{}' has unknown type '{}'",
                    object.name, object.object_type
                ));
            }
        }
    }

    check_facts(domain, &problem.init, "init", &mut issues);
    check_facts(domain, &problem.goal, "goal", &mut issues);

    for init in &problem.numeric_init {
        if domain.find_function(&init.function).is_none() {
            issues.push(format!(
                "Numeric init for undeclared function '{}'",
                init.function
            ));
        }
    }

    for issue in &issues {
        warn!(event = "validation_issue", issue = %issue);
    }
    issues
}

fn check_facts(domain: &PddlDomain, facts: &[PddlFact], section: &str, issues: &mut Vec<String>) {
    for fact in facts {
        let predicate = fact.base_predicate();
        // Object equality is built in.
        if predicate == "=" {
            continue;
        }
        match domain.find_predicate(predicate) {
            None => issues.push(format!(
                "Unknown predicate '{}' in {}",
                predicate, section
            )),
            Some(decl) if decl.parameters.len() != fact.args.len() => issues.push(format!(
                "Predicate '{}' in {} expects {} argument(s), got {}",
                predicate,
                section,
                decl.parameters.len(),
                fact.args.len()
            )),
            Some(_) => {}
        }
    }
}
