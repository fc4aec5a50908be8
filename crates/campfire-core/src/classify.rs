//! Severity classification by case-sensitive substring match.
//!
//! Tokens are truncated (`ERRO`, `DEBU`, `FATA`) so both the long spellings
//! and the four-letter forms many loggers emit are recognised. The list is a
//! priority order: the first token found wins, so a line containing both
//! `WARN` and `ERRO` is a warning.

use crate::types::Severity;

const TOKENS: [(&str, Severity); 5] = [
    ("INFO", Severity::Info),
    ("WARN", Severity::Warn),
    ("ERRO", Severity::Error),
    ("DEBU", Severity::Debug),
    ("FATA", Severity::Fatal),
];

/// Classify a single line. Total: every input, including `""`, yields a
/// severity.
pub fn classify(text: &str) -> Severity {
    TOKENS
        .iter()
        .find(|(token, _)| text.contains(*token))
        .map(|&(_, severity)| severity)
        .unwrap_or(Severity::Other)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("INFO server started", Severity::Info)]
    #[case("WARN disk at 91%", Severity::Warn)]
    #[case("ERROR connection refused", Severity::Error)]
    #[case("ERRO short form", Severity::Error)]
    #[case("ERRONEOUS input", Severity::Error)]
    #[case("DEBUG cache hit", Severity::Debug)]
    #[case("DEBU short form", Severity::Debug)]
    #[case("FATAL out of memory", Severity::Fatal)]
    #[case("FATA short form", Severity::Fatal)]
    #[case("plain text", Severity::Other)]
    #[case("", Severity::Other)]
    fn classifies_tokens(#[case] line: &str, #[case] expected: Severity) {
        assert_eq!(classify(line), expected);
    }

    #[test]
    fn first_token_in_priority_order_wins() {
        assert_eq!(classify("WARN ERRO"), Severity::Warn);
        assert_eq!(classify("ERRO then WARN"), Severity::Warn);
        assert_eq!(classify("FATAL INFO"), Severity::Info);
        assert_eq!(classify("DEBUG ERROR"), Severity::Error);
    }

    #[test]
    fn match_is_case_sensitive() {
        assert_eq!(classify("info: lowercase"), Severity::Other);
        assert_eq!(classify("Error: mixed case"), Severity::Other);
    }

    proptest! {
        #[test]
        fn classify_is_total_and_deterministic(s in ".*") {
            let a = classify(&s);
            prop_assert!(Severity::ALL.contains(&a));
            prop_assert_eq!(a, classify(&s));
        }

        #[test]
        fn lines_without_tokens_are_other(s in "[a-z0-9 :./-]*") {
            prop_assert_eq!(classify(&s), Severity::Other);
        }
    }
}
