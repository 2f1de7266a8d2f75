//! # zcalc
//!
//! Evaluates arithmetic expressions such as `2 * (3 + 4)` or `sin(pi / 2)`.
//!
//! The [`calculator`] module holds the evaluator: a backtracking
//! recursive-descent grammar that computes the value while parsing. The other
//! modules make up the `zcalc` command-line front-end.
//!
//! Supported syntax:
//! * decimal literals (`42`, `3.5`, `.25`, `1e3`) and the constants `pi`, `e`
//! * `+`, `-`, `*`, `/`, `mod` and `^`
//! * `sin`, `cos`, `tan`, `arcsin`, `arccos`, `arctan`
//! * parentheses

pub mod calculator;
pub mod cli;
pub mod config;
pub mod history;
pub mod logging;
pub mod repl;
