//! Snapshot parsing: raw file bytes into an ordered list of [`LogRecord`]s.
//!
//! Every call is a full reparse. Nothing is diffed against the previous
//! snapshot, so truncation and rotation can never leave stale records behind.

use crate::types::LogRecord;

/// Split `content` on `\n` and classify each segment.
///
/// - Empty segments are kept (as `Other` records with empty text), including
///   the trailing one produced by a final newline.
/// - Invalid UTF-8 is replaced lossily; parsing cannot fail.
/// - A single trailing `\r` is dropped from each segment.
pub fn parse(content: &[u8]) -> Vec<LogRecord> {
    content
        .split(|&b| b == b'\n')
        .enumerate()
        .map(|(index, segment)| {
            let segment = segment.strip_suffix(b"\r").unwrap_or(segment);
            LogRecord::new(index, String::from_utf8_lossy(segment))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn summary(records: &[LogRecord]) -> Vec<(usize, Severity, &str)> {
        records
            .iter()
            .map(|r| (r.index(), r.severity(), r.text()))
            .collect()
    }

    #[test]
    fn splits_and_classifies_lines() {
        let records = parse(b"INFO a\nERRO b\n");
        assert_eq!(
            summary(&records),
            vec![
                (0, Severity::Info, "INFO a"),
                (1, Severity::Error, "ERRO b"),
                (2, Severity::Other, ""),
            ]
        );
    }

    #[test]
    fn empty_content_is_one_empty_record() {
        let records = parse(b"");
        assert_eq!(summary(&records), vec![(0, Severity::Other, "")]);
    }

    #[test]
    fn blank_lines_are_preserved() {
        let records = parse(b"WARN x\n\n\nDEBU y");
        assert_eq!(records.len(), 4);
        assert_eq!(records[1].text(), "");
        assert_eq!(records[2].severity(), Severity::Other);
        assert_eq!(records[3].index(), 3);
    }

    #[test]
    fn crlf_line_endings_are_trimmed() {
        let records = parse(b"INFO a\r\nWARN b\r\n");
        assert_eq!(records[0].text(), "INFO a");
        assert_eq!(records[1].text(), "WARN b");
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        let records = parse(b"INFO \xff\xfe ok\n");
        assert_eq!(records[0].severity(), Severity::Info);
        assert!(records[0].text().contains('\u{FFFD}'));
    }

    proptest! {
        #[test]
        fn record_count_matches_segment_count(content in proptest::collection::vec(any::<u8>(), 0..512)) {
            let records = parse(&content);
            let segments = content.split(|&b| b == b'\n').count();
            prop_assert_eq!(records.len(), segments);
            for (i, rec) in records.iter().enumerate() {
                prop_assert_eq!(rec.index(), i);
            }
        }

        #[test]
        fn severity_always_matches_text(lines in proptest::collection::vec("[A-Z a-z]{0,20}", 0..20)) {
            let content = lines.join("\n");
            for rec in parse(content.as_bytes()) {
                prop_assert_eq!(rec.severity(), crate::classify(rec.text()));
            }
        }
    }
}
