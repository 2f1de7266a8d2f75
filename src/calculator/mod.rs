//! Calculator module for evaluating mathematical expressions.
//!
//! This module provides functionality to:
//! - Evaluate expressions with a backtracking recursive-descent grammar
//! - Format results for display
//! - Detect if user input looks like a calculator expression

mod cursor;
mod detection;
mod error;
mod evaluation;
mod grammar;
mod number;
mod operator;

pub use detection::{KEYWORDS, looks_like_expression};
pub use error::EvalError;
pub use evaluation::{CalcResult, FormatOptions, INVALID_EXPRESSION, evaluate_expression};
pub use grammar::{evaluate, parse_and_evaluate};
pub use operator::Operation;
