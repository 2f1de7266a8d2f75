//! Expression detection.
//!
//! Determines whether user input looks like a mathematical expression, so the
//! terminal front-end can tell a malformed expression from a mistyped command.

use lazy_static::lazy_static;
use regex::Regex;

/// Keywords understood by the grammar: functions, constants and `mod`.
pub const KEYWORDS: &[&str] = &[
    "arcsin", "arccos", "arctan", "sin", "cos", "tan", "mod", "pi", "e",
];

lazy_static! {
    /// Matches strings containing only characters the grammar can consume.
    static ref MATH_SAFE_CHARS: Regex = Regex::new(
        r"^[\d\s\.\+\-\*/\^()a-zA-Z]+$"
    ).unwrap();

    /// Matches a run of letters, to check words against the keyword list.
    static ref WORD: Regex = Regex::new(r"[a-zA-Z]+").unwrap();

    /// Matches a hexadecimal literal, whose digits may be letters.
    static ref HEX_NUMBER: Regex = Regex::new(
        r"0[xX][0-9a-fA-F]*(\.[0-9a-fA-F]*)?([pP][+-]?\d+)?"
    ).unwrap();

    /// Matches a decimal literal anywhere in the input.
    static ref NUMBER: Regex = Regex::new(r"\d|\.\d").unwrap();
}

/// Check if input looks like a potential calculator expression.
///
/// Returns `true` if the input:
/// 1. Contains only math-safe characters
/// 2. Spells only known keywords
/// 3. Has at least one number, constant, or function
///
/// This is a fast pre-check; it does not validate the grammar.
pub fn looks_like_expression(input: &str) -> bool {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return false;
    }

    if !MATH_SAFE_CHARS.is_match(trimmed) {
        return false;
    }

    let without_hex = HEX_NUMBER.replace_all(trimmed, "0");
    if !WORD.find_iter(&without_hex).all(|w| is_keyword_run(w.as_str())) {
        return false;
    }

    NUMBER.is_match(trimmed) || has_function_or_constant(trimmed)
}

/// A run of letters is acceptable if it splits entirely into keywords, e.g.
/// `cossin` or `pie`. Implicit juxtaposition is rejected by the grammar, but
/// the text is still an attempt at an expression.
fn is_keyword_run(word: &str) -> bool {
    if word.is_empty() {
        return true;
    }
    KEYWORDS.iter().any(|&keyword| {
        word.strip_prefix(keyword).is_some_and(is_keyword_run)
    })
}

/// Check if input contains a keyword other than `mod`.
fn has_function_or_constant(input: &str) -> bool {
    KEYWORDS
        .iter()
        .filter(|&&keyword| keyword != "mod")
        .any(|&keyword| input.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_accepted() {
        assert!(looks_like_expression("123"));
        assert!(looks_like_expression("42.5"));
        assert!(looks_like_expression("-123"));
        assert!(looks_like_expression(".5"));
        assert!(looks_like_expression("  42  "));
    }

    #[test]
    fn test_expressions_accepted() {
        assert!(looks_like_expression("2+2"));
        assert!(looks_like_expression("2 + 2 *"));
        assert!(looks_like_expression("10 mod 3"));
        assert!(looks_like_expression("2^8"));
        assert!(looks_like_expression("(2 + 3) * 4"));
        assert!(looks_like_expression("2 ^ 3 ^ 2"));
    }

    #[test]
    fn test_functions_and_constants_accepted() {
        assert!(looks_like_expression("sin(0)"));
        assert!(looks_like_expression("arctan 1"));
        assert!(looks_like_expression("pi"));
        assert!(looks_like_expression("cos(pi)"));
        assert!(looks_like_expression("pie"));
    }

    #[test]
    fn test_invalid_input_rejected() {
        assert!(!looks_like_expression(""));
        assert!(!looks_like_expression("   "));
        assert!(!looks_like_expression("hello world"));
        assert!(!looks_like_expression("sqrt(4)"));
        assert!(!looks_like_expression("2 % 3"));
        assert!(!looks_like_expression("1,234"));
        assert!(!looks_like_expression("mod"));
        assert!(!looks_like_expression("reste"));
    }

    #[test]
    fn test_hexadecimal_literals_accepted() {
        assert!(looks_like_expression("0xff"));
        assert!(looks_like_expression("0x1.8p1 + 1"));
        assert!(!looks_like_expression("0xfg"));
    }
}
