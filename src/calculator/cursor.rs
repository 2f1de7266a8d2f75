//! Read position into the expression text and the backtracking primitives
//! built on top of it.
//!
//! Every grammar rule shares one [`Cursor`] for the duration of a single
//! evaluation. Rules never restore the position themselves: they go through
//! [`Cursor::attempt`] (whole sub-rules) or [`Cursor::token`] (literals), both
//! of which roll back on failure.

/// Maximum nesting of `expression` rules (parentheses and function arguments).
pub(crate) const MAX_DEPTH: usize = 4096;

/// Byte cursor over the input of a single evaluation.
#[derive(Debug)]
pub(crate) struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
            depth: 0,
        }
    }

    /// Current byte, or `None` once the input is exhausted.
    pub(crate) fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Byte `offset` positions past the current one.
    pub(crate) fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    pub(crate) fn bump(&mut self) {
        if self.pos < self.input.len() {
            self.pos += 1;
        }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn reset_to(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Input text between `start` and the current position.
    pub(crate) fn slice_from(&self, start: usize) -> &'a [u8] {
        &self.input[start..self.pos]
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_space) {
            self.pos += 1;
        }
    }

    /// Skip whitespace, then run `rule`. If the rule fails, the position is
    /// restored to where the rule started (after the skipped whitespace).
    pub(crate) fn attempt<T>(&mut self, rule: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        self.skip_whitespace();
        let start = self.pos;
        let result = rule(self);
        if result.is_none() {
            self.pos = start;
        }
        result
    }

    /// Match `literal` after optional whitespace.
    ///
    /// On mismatch nothing is consumed, not even the whitespace. An empty
    /// literal always matches.
    pub(crate) fn token(&mut self, literal: &str) -> bool {
        let start = self.pos;
        self.skip_whitespace();
        for &expected in literal.as_bytes() {
            if self.peek() != Some(expected) {
                self.pos = start;
                return false;
            }
            self.pos += 1;
        }
        true
    }

    /// Run `rule` one nesting level deeper, failing once [`MAX_DEPTH`] is
    /// exceeded.
    pub(crate) fn nested<T>(&mut self, rule: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        if self.depth >= MAX_DEPTH {
            return None;
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }
}

/// Space, tab, newline, vertical tab, form feed and carriage return.
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_skips_leading_whitespace() {
        let mut cursor = Cursor::new("  \t+1");
        assert!(cursor.token("+"));
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn test_token_mismatch_restores_before_whitespace() {
        let mut cursor = Cursor::new("  mox");
        assert!(!cursor.token("mod"));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_token_at_end_of_input() {
        let mut cursor = Cursor::new("m");
        assert!(!cursor.token("mod"));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_empty_token_always_matches() {
        let mut cursor = Cursor::new("  x");
        assert!(cursor.token(""));
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn test_attempt_rolls_back_on_failure() {
        let mut cursor = Cursor::new("  abc");
        let result: Option<()> = cursor.attempt(|c| {
            c.bump();
            c.bump();
            None
        });
        assert!(result.is_none());
        // Leading whitespace stays consumed, the rule's progress does not.
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn test_attempt_keeps_progress_on_success() {
        let mut cursor = Cursor::new("abc");
        let result = cursor.attempt(|c| {
            c.bump();
            Some(1.5)
        });
        assert_eq!(result, Some(1.5));
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn test_nested_attempts_roll_back_independently() {
        let mut cursor = Cursor::new("abcd");
        let outer = cursor.attempt(|c| {
            c.bump();
            let inner: Option<()> = c.attempt(|c| {
                c.bump();
                c.bump();
                None
            });
            assert!(inner.is_none());
            assert_eq!(c.position(), 1);
            Some(())
        });
        assert!(outer.is_some());
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn test_nested_depth_limit() {
        fn descend(c: &mut Cursor<'_>, levels: usize) -> Option<usize> {
            if levels == 0 {
                return Some(0);
            }
            c.nested(|c| descend(c, levels - 1)).map(|n| n + 1)
        }
        let handle = std::thread::Builder::new()
            .stack_size(64 << 20)
            .spawn(|| {
                let mut cursor = Cursor::new("");
                assert_eq!(descend(&mut cursor, MAX_DEPTH), Some(MAX_DEPTH));
                assert_eq!(descend(&mut cursor, MAX_DEPTH + 1), None);
                assert_eq!(cursor.depth, 0);
            })
            .unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn test_vertical_tab_and_form_feed_are_whitespace() {
        let mut cursor = Cursor::new("\x0b\x0c1");
        cursor.skip_whitespace();
        assert_eq!(cursor.peek(), Some(b'1'));
    }
}
