//! Recursive-descent grammar that evaluates while it parses.
//!
//! Precedence levels, loosest first:
//!
//! ```text
//! expression     = additive
//! additive       = multiplicative (("+" | "-") power)*
//! multiplicative = power (("*" | "/" | "mod") power)*
//! power          = unary ("^" unary)?
//! unary          = "-" primary | "+" primary | primary | trigonometric
//! trigonometric  = ("sin" | "cos" | "tan" | "arcsin" | "arccos" | "arctan") expression
//! primary        = number | "(" expression ")"
//! ```
//!
//! `^` does not chain (`2^3^2` leaves `^2` unconsumed) and the right operand
//! of `+`/`-` is a single `power`, so `1 + 2 * 3` leaves `* 3` unconsumed.
//! Both inputs are rejected by the end-of-input check in [`evaluate`].
//!
//! A function name takes everything after it as its argument: `sin 0 + 1`
//! is `sin(1)`.

use std::panic;
use std::thread;

use tracing::{debug, warn};

use super::cursor::{Cursor, MAX_DEPTH};
use super::error::EvalError;
use super::number::number;
use super::operator::Operation;

type Function = fn(f64) -> f64;

const FUNCTIONS: [(&str, Function); 6] = [
    ("sin", f64::sin),
    ("cos", f64::cos),
    ("tan", f64::tan),
    ("arcsin", f64::asin),
    ("arccos", f64::acos),
    ("arctan", f64::atan),
];

const MULTIPLICATIVE: [(&str, Operation); 3] = [
    ("*", Operation::Multiply),
    ("/", Operation::Divide),
    ("mod", Operation::Modulo),
];

const ADDITIVE: [(&str, Operation); 2] = [("+", Operation::Add), ("-", Operation::Subtract)];

/// Nesting evaluated on the caller's stack.
const INLINE_DEPTH: usize = 64;

/// Stack reserved per nesting level on the evaluation thread, sized for
/// unoptimized builds.
const STACK_PER_LEVEL: usize = 16 * 1024;

const BASE_STACK: usize = 1024 * 1024;

/// Evaluate `input` as a complete expression.
///
/// Succeeds only if the whole input is consumed. Trailing whitespace counts
/// as unconsumed input.
///
/// Input that may nest deeper than a few dozen levels is parsed on a
/// dedicated thread whose stack is sized for that depth.
pub fn evaluate(input: &str) -> Result<f64, EvalError> {
    let depth = nesting_bound(input);
    let outcome = if depth <= INLINE_DEPTH {
        parse(input)
    } else {
        parse_on_sized_stack(input, depth)
    };
    debug!(input, depth, ?outcome, "evaluated expression");
    outcome
}

/// Flag-and-value form of [`evaluate`].
///
/// On failure the value is whatever the longest parsed prefix evaluated to,
/// or `0.0` when nothing parsed.
pub fn parse_and_evaluate(input: &str) -> (bool, f64) {
    match evaluate(input) {
        Ok(value) => (true, value),
        Err(err) => (false, err.partial().unwrap_or(0.0)),
    }
}

fn parse(input: &str) -> Result<f64, EvalError> {
    let mut cursor = Cursor::new(input);
    match expression(&mut cursor) {
        Some(value) if cursor.is_at_end() => Ok(value),
        Some(partial) => Err(EvalError::TrailingInput {
            position: cursor.position(),
            partial,
        }),
        None => Err(EvalError::NoExpression),
    }
}

/// Upper bound on how deeply `expression` can nest: the root, one level per
/// `(`, and one per function name (at least three letters each).
fn nesting_bound(input: &str) -> usize {
    let parens = input.bytes().filter(|&b| b == b'(').count();
    let letters = input.bytes().filter(u8::is_ascii_alphabetic).count();
    1 + parens + letters / 3
}

fn parse_on_sized_stack(input: &str, depth: usize) -> Result<f64, EvalError> {
    let stack_size = BASE_STACK + depth.min(MAX_DEPTH) * STACK_PER_LEVEL;
    thread::scope(|scope| {
        let spawned = thread::Builder::new()
            .name("zcalc-eval".to_string())
            .stack_size(stack_size)
            .spawn_scoped(scope, || parse(input));
        match spawned {
            Ok(handle) => handle
                .join()
                .unwrap_or_else(|payload| panic::resume_unwind(payload)),
            Err(err) => {
                warn!(%err, stack_size, "Failed to spawn evaluation thread");
                Err(EvalError::Exhausted { depth })
            }
        }
    })
}

fn expression(cursor: &mut Cursor<'_>) -> Option<f64> {
    cursor.nested(|c| c.attempt(additive))
}

fn additive(cursor: &mut Cursor<'_>) -> Option<f64> {
    let mut value = cursor.attempt(multiplicative)?;
    while let Some(op) = operator(cursor, &ADDITIVE) {
        let right = cursor.attempt(power)?;
        value = op.apply(value, right);
    }
    Some(value)
}

fn multiplicative(cursor: &mut Cursor<'_>) -> Option<f64> {
    let mut value = cursor.attempt(power)?;
    while let Some(op) = operator(cursor, &MULTIPLICATIVE) {
        let right = cursor.attempt(power)?;
        value = op.apply(value, right);
    }
    Some(value)
}

fn power(cursor: &mut Cursor<'_>) -> Option<f64> {
    let base = cursor.attempt(unary)?;
    if !cursor.token("^") {
        return Some(base);
    }
    let exponent = cursor.attempt(unary)?;
    Some(Operation::Power.apply(base, exponent))
}

/// Each alternative is atomic: a sign whose operand is not a primary is
/// given back before the next alternative runs, so it is never silently
/// dropped. `-sin(1)`, `2*-sin(1)` and `-+2` fail rather than evaluating to
/// `sin(1)`, `2*sin(1)` and `2`.
fn unary(cursor: &mut Cursor<'_>) -> Option<f64> {
    cursor
        .attempt(|c| signed(c, "-").map(|v| -v))
        .or_else(|| cursor.attempt(|c| signed(c, "+")))
        .or_else(|| cursor.attempt(primary))
        .or_else(|| cursor.attempt(trigonometric))
}

/// A sign followed by a primary. The sign never applies to a function call.
fn signed(cursor: &mut Cursor<'_>, sign: &str) -> Option<f64> {
    if !cursor.token(sign) {
        return None;
    }
    cursor.attempt(primary)
}

fn trigonometric(cursor: &mut Cursor<'_>) -> Option<f64> {
    FUNCTIONS.iter().find_map(|&(name, function)| {
        cursor.attempt(|c| {
            if !c.token(name) {
                return None;
            }
            c.attempt(expression).map(function)
        })
    })
}

fn primary(cursor: &mut Cursor<'_>) -> Option<f64> {
    cursor
        .attempt(number)
        .or_else(|| cursor.attempt(parenthesized))
}

fn parenthesized(cursor: &mut Cursor<'_>) -> Option<f64> {
    if !cursor.token("(") {
        return None;
    }
    let value = cursor.attempt(expression)?;
    cursor.token(")").then_some(value)
}

/// Match the first operator of `table` at the cursor.
fn operator(cursor: &mut Cursor<'_>, table: &[(&str, Operation)]) -> Option<Operation> {
    table
        .iter()
        .find(|(symbol, _)| cursor.token(symbol))
        .map(|&(_, op)| op)
}
