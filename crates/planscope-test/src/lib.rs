//! Shared test fixtures for planscope crates.
//!
//! This crate provides raw input texts and small hand-built plans:
//!
//! - [`domains`] - one domain per planning dialect
//! - [`problems`] - problems matching the domains
//! - [`transcripts`] - planner output in the formats the parser recognises
//! - [`plans`] - canonical plans built directly from core types
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! planscope-test = { workspace = true }
//! ```
//!
//! ```ignore
//! use planscope_test::domains::GRIPPER;
//! use planscope_test::transcripts::LPG;
//! ```

pub mod domains;
pub mod plans;
pub mod problems;
pub mod transcripts;

pub use plans::{numeric_plan, three_action_plan};
