//! Error types for the formula engine.
//!
//! Soft failures (blank references, unknown functions, unparseable arguments)
//! are absorbed into the formula text and never surface here.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("formula did not settle after {passes} passes")]
    Diverged { passes: usize },

    #[error("invalid arguments to {function}: {message}")]
    InvalidArguments {
        function: &'static str,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, EngineError>;
