//! Domain-specific assertion macros for campfire harnesses.
//!
//! These wrap `pretty_assertions` and say *which* record broke expectations,
//! with its line number and text, instead of dumping whole vectors.

// ---------------------------------------------------------------------------
// Record assertions
// ---------------------------------------------------------------------------

/// Assert a record's severity, index and text in one go.
///
/// ```rust
/// assert_record!(records[0], Severity::Warn, 0, "WARN c");
/// ```
#[macro_export]
macro_rules! assert_record {
    ($record:expr, $severity:expr, $index:expr, $text:expr) => {{
        let record: &campfire::core::LogRecord = &$record;
        let expected = ($severity, $index as usize, $text);
        let actual = (record.severity(), record.index(), record.text());
        pretty_assertions::assert_eq!(
            actual,
            expected,
            "assert_record! failed for line {}",
            record.line_number()
        );
    }};
}

/// Assert the texts of a record sequence, in order.
///
/// ```rust
/// assert_texts!(visible, ["INFO login ok", "ERRO login failed"]);
/// ```
#[macro_export]
macro_rules! assert_texts {
    ($records:expr, [$($text:expr),* $(,)?]) => {{
        let actual: Vec<&str> = $records.iter().map(|r| r.text()).collect();
        let expected: Vec<&str> = vec![$($text),*];
        pretty_assertions::assert_eq!(actual, expected, "assert_texts! failed");
    }};
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Panic unless `sub` appears in `full` in order (not necessarily
/// contiguous).
pub fn assert_subsequence<T: PartialEq + std::fmt::Debug>(sub: &[T], full: &[T]) {
    let mut it = full.iter();
    for item in sub {
        assert!(
            it.any(|candidate| candidate == item),
            "{item:?} missing or out of order in {full:?}"
        );
    }
}
