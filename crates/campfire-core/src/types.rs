//! Core types shared across campfire: the [`Severity`] of a line and the
//! immutable [`LogRecord`] produced for every line of a snapshot.

use crate::classify::classify;

/// Severity of a log line, derived from substring tokens in its text.
///
/// Variant order matches the classifier's priority list, with [`Severity::Other`]
/// as the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warn,
    Error,
    Debug,
    Fatal,
    Other,
}

impl Severity {
    pub const COUNT: usize = 6;

    /// All severities, in toggle-slot order (`1` = INFO … `6` = OTHER).
    pub const ALL: [Severity; Severity::COUNT] = [
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Debug,
        Severity::Fatal,
        Severity::Other,
    ];

    /// Position of this severity in [`Severity::ALL`].
    pub fn slot(self) -> usize {
        self as usize
    }

    /// Severity bound to the 1-based toggle key `n`, if any.
    pub fn from_toggle_key(n: u8) -> Option<Severity> {
        match n {
            1..=6 => Some(Severity::ALL[(n - 1) as usize]),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Warn => write!(f, "WARN"),
            Severity::Error => write!(f, "ERROR"),
            Severity::Debug => write!(f, "DEBUG"),
            Severity::Fatal => write!(f, "FATAL"),
            Severity::Other => write!(f, "OTHER"),
        }
    }
}

/// One line of the most recent snapshot.
///
/// Records are rebuilt wholesale on every snapshot, so `index` is only
/// meaningful within the snapshot that produced it. Fields are private to
/// keep `severity` tied to `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    index: usize,
    severity: Severity,
    text: String,
}

impl LogRecord {
    /// Build a record, classifying `text`.
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            index,
            severity: classify(&text),
            text,
        }
    }

    /// Zero-based position of the line in its snapshot.
    pub fn index(&self) -> usize {
        self.index
    }

    /// 1-based line number as shown to the user.
    pub fn line_number(&self) -> usize {
        self.index + 1
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
