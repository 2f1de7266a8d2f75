//! Session history of evaluated expressions.

use std::collections::VecDeque;

use crate::calculator::CalcResult;

/// One evaluated line.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    /// The expression as entered (trimmed).
    pub expression: String,
    /// The result formatted for display, or the error message.
    pub display_result: String,
    /// Whether this is an error result.
    pub is_error: bool,
}

impl HistoryEntry {
    /// Create a new history entry from a CalcResult.
    pub fn from_calc_result(result: &CalcResult) -> Self {
        Self {
            expression: result.expression().to_string(),
            display_result: result.display().to_string(),
            is_error: !result.is_success(),
        }
    }
}

/// Bounded history, newest entry first.
#[derive(Debug)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    limit: usize,
}

impl History {
    /// A limit of zero disables recording.
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit.min(64)),
            limit,
        }
    }

    /// Record a result at the front, dropping the oldest entry when full.
    pub fn record(&mut self, result: &CalcResult) {
        if self.limit == 0 {
            return;
        }
        if self.entries.len() == self.limit {
            self.entries.pop_back();
        }
        self.entries.push_front(HistoryEntry::from_calc_result(result));
    }

    /// Entries, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{FormatOptions, evaluate_expression};

    fn result(input: &str) -> CalcResult {
        evaluate_expression(input, &FormatOptions::default())
    }

    #[test]
    fn test_newest_first() {
        let mut history = History::new(10);
        history.record(&result("1+1"));
        history.record(&result("2*3"));

        let expressions: Vec<_> = history.entries().map(|e| e.expression.as_str()).collect();
        assert_eq!(expressions, vec!["2*3", "1+1"]);
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::new(2);
        history.record(&result("1"));
        history.record(&result("2"));
        history.record(&result("3"));

        assert_eq!(history.len(), 2);
        let results: Vec<_> = history.entries().map(|e| e.display_result.as_str()).collect();
        assert_eq!(results, vec!["3", "2"]);
    }

    #[test]
    fn test_error_entries() {
        let mut history = History::new(5);
        history.record(&result("2 +"));

        let entry = history.entries().next().cloned();
        assert_eq!(
            entry,
            Some(HistoryEntry {
                expression: "2 +".to_string(),
                display_result: "Invalid expression".to_string(),
                is_error: true,
            })
        );
    }

    #[test]
    fn test_clear() {
        let mut history = History::new(5);
        history.record(&result("1"));
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_zero_limit_records_nothing() {
        let mut history = History::new(0);
        history.record(&result("1"));
        assert!(history.is_empty());
    }
}
