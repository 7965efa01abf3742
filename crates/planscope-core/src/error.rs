//! Error types for planscope

use thiserror::Error;

/// Main error type for planscope operations
#[derive(Debug, Error)]
pub enum PlanscopeError {
    /// Input text could not be read as a domain, problem or plan at all
    #[error("Parse error: {0}")]
    Parse(String),

    /// A planner transcript produced no recognisable action lines
    #[error("No valid actions found in planner output")]
    NoValidActions,

    /// Failure reading an input file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for planscope operations
pub type Result<T> = std::result::Result<T, PlanscopeError>;
