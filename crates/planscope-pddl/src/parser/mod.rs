//! Domain and problem parsing.
//!
//! Text is lower-cased and stripped of `;` comments before reading. The first
//! top-level `(define ...)` form is walked section by section; anything that
//! cannot be understood is reported in [`Parsed::errors`] and skipped.
//!
//! # Examples
//!
//! ```
//! use planscope_pddl::parse_domain;
//!
//! let parsed = parse_domain(
//!     "(define (domain d) (:requirements :strips)
//!        (:predicates (at ?x))
//!        (:action go :parameters (?x) :effect (at ?x)))",
//! )
//! .unwrap();
//! assert!(parsed.is_clean());
//! assert_eq!(parsed.value.name, "d");
//! assert_eq!(parsed.value.actions[0].effects[0].predicate, "at");
//! ```

mod domain;
mod effects;
mod problem;
mod typed_list;


use planscope_core::{Parsed, PddlDomain, PddlProblem, PlanscopeError, Result};
use tracing::info;

use crate::sexpr::{read_all, strip_comments, SExpr};

/// Parses domain text.
///
/// Returns `Err` only when no `(define ...)` form is present.
pub fn parse_domain(text: &str) -> Result<Parsed<PddlDomain>> {
    let define = find_define(text)?;
    let mut errors = Vec::new();
    let domain = domain::parse_domain_form(&define, &mut errors);

    info!(
        event = "domain_parsed",
        domain = %domain.name,
        actions = domain.actions.len(),
        processes = domain.processes.len(),
        events = domain.events.len(),
        errors = errors.len(),
    );

    Ok(Parsed::with_errors(domain, errors))
}

/// Parses problem text.
///
/// Returns `Err` only when no `(define ...)` form is present.
pub fn parse_problem(text: &str) -> Result<Parsed<PddlProblem>> {
    let define = find_define(text)?;
    let mut errors = Vec::new();
    let problem = problem::parse_problem_form(&define, &mut errors);

    info!(
        event = "problem_parsed",
        problem = %problem.name,
        domain = %problem.domain,
        objects = problem.objects.len(),
        numeric_init = problem.numeric_init.len(),
        errors = errors.len(),
    );

    Ok(Parsed::with_errors(problem, errors))
}

fn find_define(text: &str) -> Result<SExpr> {
    read_all(&strip_comments(&text.to_lowercase()))
        .into_iter()
        .find(|form| form.head() == Some("define"))
        .ok_or_else(|| PlanscopeError::Parse("no (define ...) form found".to_string()))
}
