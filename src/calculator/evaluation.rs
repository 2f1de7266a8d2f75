//! Expression evaluation and result formatting.
//!
//! Wraps the grammar to provide a simple interface for evaluating
//! mathematical expressions and formatting results.

use serde::Serialize;

use super::grammar::evaluate;

/// Message shown for any expression that does not evaluate.
pub const INVALID_EXPRESSION: &str = "Invalid expression";

/// How results are rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatOptions {
    /// Maximum number of decimal places.
    pub precision: usize,
    /// Group the integer part of the display result with `,`.
    pub thousands_separator: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            precision: 10,
            thousands_separator: true,
        }
    }
}

/// Result of evaluating a calculator expression.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CalcResult {
    /// The expression evaluated. Infinities and NaN are results too.
    Success {
        /// The original expression.
        expression: String,
        /// The numeric value.
        value: f64,
        /// Formatted for display (with thousand separators if enabled).
        display_result: String,
        /// Formatted without separators.
        raw_result: String,
    },
    /// The expression did not parse.
    Error {
        /// The original expression.
        expression: String,
        /// Error message to display.
        message: String,
    },
}

impl CalcResult {
    /// Get the expression that was evaluated.
    pub fn expression(&self) -> &str {
        match self {
            Self::Success { expression, .. } => expression,
            Self::Error { expression, .. } => expression,
        }
    }

    /// Check if this is a successful result.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Get the display string (result or error message).
    pub fn display(&self) -> &str {
        match self {
            Self::Success { display_result, .. } => display_result,
            Self::Error { message, .. } => message,
        }
    }

    /// Get the raw string (only for successful results).
    pub fn raw(&self) -> Option<&str> {
        match self {
            Self::Success { raw_result, .. } => Some(raw_result),
            Self::Error { .. } => None,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Success { value, .. } => Some(*value),
            Self::Error { .. } => None,
        }
    }
}

/// Evaluate a mathematical expression.
///
/// The input is evaluated exactly as given, so surrounding whitespace makes
/// it fail; only the recorded `expression` is trimmed.
pub fn evaluate_expression(input: &str, options: &FormatOptions) -> CalcResult {
    let expression = input.trim().to_string();

    match evaluate(input) {
        Ok(value) => CalcResult::Success {
            expression,
            display_result: format_number(value, options.precision, options.thousands_separator),
            raw_result: format_number(value, options.precision, false),
            value,
        },
        Err(_) => CalcResult::Error {
            expression,
            message: INVALID_EXPRESSION.to_string(),
        },
    }
}

/// Format a number, trimming trailing zeros from the fraction.
fn format_number(value: f64, precision: usize, separators: bool) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let msg = if value.is_sign_positive() {
            "Infinity"
        } else {
            "-Infinity"
        };
        return msg.to_string();
    }

    let formatted = if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let formatted = format!("{:.*}", precision, value);
        if formatted.contains('.') {
            formatted
                .trim_end_matches('0')
                .trim_end_matches('.')
                .to_string()
        } else {
            formatted
        }
    };

    // Rounding can leave "-0" behind for tiny negative values
    let formatted = if formatted == "-0" {
        "0".to_string()
    } else {
        formatted
    };

    if separators {
        add_separators(&formatted)
    } else {
        formatted
    }
}

/// Insert thousand separators into the integer part of a formatted number.
fn add_separators(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (int_part, dec_part) = match unsigned.find('.') {
        Some(dot_pos) => unsigned.split_at(dot_pos),
        None => (unsigned, ""),
    };

    let mut result = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    let grouped: String = result.chars().rev().collect();
    format!("{}{}{}", sign, grouped, dec_part)
}
