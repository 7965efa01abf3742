//! planscope PDDL front end
//!
//! This crate turns domain and problem text into typed records:
//! - [`sexpr`]: tokenizer and s-expression reader
//! - [`parser`]: `(define (domain ..))` / `(define (problem ..))` walkers
//! - [`validate`]: advisory domain/problem consistency checks
//! - [`classify`]: dialect classification with confidence

pub mod classify;
pub mod parser;
pub mod sexpr;
pub mod validate;

pub use classify::{classify_domain_type, get_domain_classification_summary, DomainClassification};
pub use parser::{parse_domain, parse_problem};
pub use sexpr::{parse_list, read_all, strip_comments, tokenize, SExpr, Token};
pub use validate::validate_domain_problem;
