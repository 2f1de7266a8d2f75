//! Evaluation failure.

use thiserror::Error;

/// Why an expression could not be evaluated.
///
/// Every kind means the same thing to callers: the text was not evaluated
/// as a complete expression. They are kept apart for logging and tests.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum EvalError {
    /// Nothing at the start of the input forms an expression.
    #[error("no expression found")]
    NoExpression,
    /// A prefix parsed to `partial`, but input remains from `position` on.
    #[error("unexpected input at byte {position}")]
    TrailingInput { position: usize, partial: f64 },
    /// No thread could be started with enough stack for input nesting up to
    /// `depth` levels.
    #[error("not enough stack for {depth} nesting levels")]
    Exhausted { depth: usize },
}

impl EvalError {
    /// The value computed before evaluation stopped, if any.
    pub fn partial(&self) -> Option<f64> {
        match self {
            Self::NoExpression | Self::Exhausted { .. } => None,
            Self::TrailingInput { partial, .. } => Some(*partial),
        }
    }
}
