//! Numeric literals and named constants.

use std::f64::consts::{E, PI};

use super::cursor::Cursor;

/// Parse `pi`, `e`, or a numeric literal at the cursor.
///
/// The constants are tried first so an identifier is never read as the start
/// of a number. Decimal literals are `digits[.digits]` or `.digits`, with an
/// optional exponent suffix such as `1e3` or `2.5E-1`. Hexadecimal literals
/// are `0x` followed by hex digits with an optional fraction and binary
/// exponent, such as `0xff` or `0x1.8p1`.
pub(crate) fn number(cursor: &mut Cursor<'_>) -> Option<f64> {
    if cursor.token("pi") {
        return Some(PI);
    }
    if cursor.token("e") {
        return Some(E);
    }
    if let Some(value) = hexadecimal(cursor) {
        return Some(value);
    }

    let anchor = cursor.position();
    match cursor.peek() {
        Some(b) if b.is_ascii_digit() => {
            skip_digits(cursor);
            if cursor.peek() == Some(b'.') {
                cursor.bump();
                skip_digits(cursor);
            }
        }
        Some(b'.') if cursor.peek_at(1).is_some_and(|b| b.is_ascii_digit()) => {
            cursor.bump();
            skip_digits(cursor);
        }
        _ => return None,
    }
    exponent(cursor);

    let text = std::str::from_utf8(cursor.slice_from(anchor)).ok()?;
    match text.parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) => {
            cursor.reset_to(anchor);
            None
        }
    }
}

fn skip_digits(cursor: &mut Cursor<'_>) {
    while cursor.peek().is_some_and(|b| b.is_ascii_digit()) {
        cursor.bump();
    }
}

/// Consume `e`/`E`, an optional sign and at least one digit. Anything shorter
/// is left alone.
fn exponent(cursor: &mut Cursor<'_>) {
    if !matches!(cursor.peek(), Some(b'e' | b'E')) {
        return;
    }
    let sign = usize::from(matches!(cursor.peek_at(1), Some(b'+' | b'-')));
    if !cursor.peek_at(1 + sign).is_some_and(|b| b.is_ascii_digit()) {
        return;
    }
    for _ in 0..=sign {
        cursor.bump();
    }
    skip_digits(cursor);
}

/// `0x`/`0X`, hex digits with an optional `.` fraction, then an optional
/// `p` exponent giving a power of two. A prefix with no hex digits after it
/// is not hexadecimal: the `0` is read as a decimal literal instead.
fn hexadecimal(cursor: &mut Cursor<'_>) -> Option<f64> {
    if cursor.peek() != Some(b'0') || !matches!(cursor.peek_at(1), Some(b'x' | b'X')) {
        return None;
    }
    let anchor = cursor.position();
    cursor.bump();
    cursor.bump();

    let mut mantissa = 0.0f64;
    let mut scale: i32 = 0;
    let mut digits = 0usize;
    while let Some(d) = cursor.peek().and_then(hex_digit) {
        mantissa = mantissa * 16.0 + d;
        digits += 1;
        cursor.bump();
    }
    let fraction_follows = digits > 0 || cursor.peek_at(1).and_then(hex_digit).is_some();
    if cursor.peek() == Some(b'.') && fraction_follows {
        cursor.bump();
        while let Some(d) = cursor.peek().and_then(hex_digit) {
            mantissa = mantissa * 16.0 + d;
            scale = scale.saturating_sub(4);
            digits += 1;
            cursor.bump();
        }
    }
    if digits == 0 {
        cursor.reset_to(anchor);
        return None;
    }
    scale = scale.saturating_add(binary_exponent(cursor));

    if mantissa == 0.0 {
        return Some(0.0);
    }
    Some(scale_by_power_of_two(mantissa, scale))
}

fn hex_digit(b: u8) -> Option<f64> {
    char::from(b).to_digit(16).map(f64::from)
}

/// Consume `p`/`P`, an optional sign and at least one decimal digit, and
/// return the signed exponent. Anything shorter is left alone and counts as 0.
fn binary_exponent(cursor: &mut Cursor<'_>) -> i32 {
    if !matches!(cursor.peek(), Some(b'p' | b'P')) {
        return 0;
    }
    let sign = cursor.peek_at(1);
    let signed = matches!(sign, Some(b'+' | b'-'));
    let offset = 1 + usize::from(signed);
    if !cursor.peek_at(offset).is_some_and(|b| b.is_ascii_digit()) {
        return 0;
    }
    for _ in 0..offset {
        cursor.bump();
    }
    let mut exponent: i32 = 0;
    while let Some(b) = cursor.peek().filter(u8::is_ascii_digit) {
        exponent = exponent
            .saturating_mul(10)
            .saturating_add(i32::from(b - b'0'));
        cursor.bump();
    }
    if sign == Some(b'-') {
        -exponent
    } else {
        exponent
    }
}

/// `value * 2^exponent`, stepping so intermediate powers stay finite.
fn scale_by_power_of_two(mut value: f64, mut exponent: i32) -> f64 {
    const STEP: i32 = 1000;
    while exponent > STEP && value.is_finite() {
        value *= 2f64.powi(STEP);
        exponent -= STEP;
    }
    while exponent < -STEP && value != 0.0 {
        value *= 2f64.powi(-STEP);
        exponent += STEP;
    }
    value * 2f64.powi(exponent.clamp(-STEP, STEP))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> (Option<f64>, usize) {
        let mut cursor = Cursor::new(input);
        let value = number(&mut cursor);
        (value, cursor.position())
    }

    #[test]
    fn test_constants() {
        assert_eq!(parse("pi"), (Some(PI), 2));
        assert_eq!(parse("e"), (Some(E), 1));
    }

    #[test]
    fn test_integer_and_decimal() {
        assert_eq!(parse("42"), (Some(42.0), 2));
        assert_eq!(parse("3.25+1"), (Some(3.25), 4));
        assert_eq!(parse("7."), (Some(7.0), 2));
        assert_eq!(parse(".5"), (Some(0.5), 2));
    }

    #[test]
    fn test_exponent_suffix() {
        assert_eq!(parse("1e3"), (Some(1000.0), 3));
        assert_eq!(parse("2.5E-1"), (Some(0.25), 6));
        assert_eq!(parse("4e+2"), (Some(400.0), 4));
    }

    #[test]
    fn test_incomplete_exponent_is_not_consumed() {
        assert_eq!(parse("2e"), (Some(2.0), 1));
        assert_eq!(parse("2e+"), (Some(2.0), 1));
    }

    #[test]
    fn test_non_numbers_fail_without_consuming() {
        assert_eq!(parse("."), (None, 0));
        assert_eq!(parse("x"), (None, 0));
        assert_eq!(parse("-1"), (None, 0));
        assert_eq!(parse(""), (None, 0));
    }

    #[test]
    fn test_hexadecimal() {
        assert_eq!(parse("0x10"), (Some(16.0), 4));
        assert_eq!(parse("0XfF"), (Some(255.0), 4));
        assert_eq!(parse("0x1e"), (Some(30.0), 4));
        assert_eq!(parse("0x1.8"), (Some(1.5), 5));
        assert_eq!(parse("0x.8"), (Some(0.5), 4));
    }

    #[test]
    fn test_hexadecimal_binary_exponent() {
        assert_eq!(parse("0x1.8p1"), (Some(3.0), 7));
        assert_eq!(parse("0x1P-2"), (Some(0.25), 6));
        assert_eq!(parse("0x1p+3"), (Some(8.0), 6));
        assert_eq!(parse("0x0p99999"), (Some(0.0), 9));
        assert_eq!(parse("0x1p99999"), (Some(f64::INFINITY), 9));
        assert_eq!(parse("0x1p-99999"), (Some(0.0), 10));
    }

    #[test]
    fn test_hexadecimal_incomplete_parts() {
        // No hex digits: only the leading zero is a number.
        assert_eq!(parse("0x"), (Some(0.0), 1));
        assert_eq!(parse("0x.g"), (Some(0.0), 1));
        assert_eq!(parse("0x1p"), (Some(1.0), 3));
        assert_eq!(parse("0x2p-"), (Some(2.0), 3));
    }
}
