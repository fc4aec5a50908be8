//! Visibility filtering: the user's [`FilterState`] and the engine that
//! applies it to a record set.
//!
//! A record is visible when its severity is toggled on **and** the text
//! pattern is empty or occurs in the record's text. Applying a filter never
//! reorders records and never touches the file; the orchestrator re-runs
//! [`apply`] against the records it already holds whenever the state changes.

use crate::config::FiltersConfig;
use crate::types::{LogRecord, Severity};

// ---------------------------------------------------------------------------
// FilterState
// ---------------------------------------------------------------------------

/// Current visibility predicate: one flag per [`Severity`] plus a free-text
/// substring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    shown: [bool; Severity::COUNT],
    text: String,
}

impl Default for FilterState {
    /// Everything visible except [`Severity::Other`]; no text filter.
    fn default() -> Self {
        let mut shown = [true; Severity::COUNT];
        shown[Severity::Other.slot()] = false;
        Self {
            shown,
            text: String::new(),
        }
    }
}

impl From<&FiltersConfig> for FilterState {
    fn from(cfg: &FiltersConfig) -> Self {
        let mut shown = [false; Severity::COUNT];
        shown[Severity::Info.slot()] = cfg.show_info;
        shown[Severity::Warn.slot()] = cfg.show_warn;
        shown[Severity::Error.slot()] = cfg.show_error;
        shown[Severity::Debug.slot()] = cfg.show_debug;
        shown[Severity::Fatal.slot()] = cfg.show_fatal;
        shown[Severity::Other.slot()] = cfg.show_other;
        Self {
            shown,
            text: cfg.text.clone(),
        }
    }
}

impl FilterState {
    /// Flip visibility of one severity.
    pub fn toggle_severity(&mut self, severity: Severity) {
        let flag = &mut self.shown[severity.slot()];
        *flag = !*flag;
        tracing::debug!(%severity, visible = *flag, "filter: severity toggled");
    }

    /// Replace the text pattern. An empty pattern disables text filtering.
    pub fn set_text(&mut self, pattern: impl Into<String>) {
        self.text = pattern.into();
        tracing::debug!(text = %self.text, "filter: text set");
    }

    pub fn clear_text(&mut self) {
        self.text.clear();
        tracing::debug!("filter: text cleared");
    }

    pub fn is_visible(&self, severity: Severity) -> bool {
        self.shown[severity.slot()]
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The visibility predicate for a single record.
    pub fn matches(&self, record: &LogRecord) -> bool {
        self.is_visible(record.severity())
            && (self.text.is_empty() || record.text().contains(self.text.as_str()))
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Return the visible subsequence of `records`, in their original order.
///
/// Accepts any iterator of record references, so the output of one call can
/// be fed straight back in (the result is unchanged).
pub fn apply<'a, I>(records: I, state: &FilterState) -> Vec<&'a LogRecord>
where
    I: IntoIterator<Item = &'a LogRecord>,
{
    records.into_iter().filter(|r| state.matches(r)).collect()
}

// ---------------------------------------------------------------------------
// Counts
// ---------------------------------------------------------------------------

/// Number of records per severity in a snapshot, regardless of filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityCounts([usize; Severity::COUNT]);

impl SeverityCounts {
    pub fn tally<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a LogRecord>,
    {
        let mut counts = [0; Severity::COUNT];
        for rec in records {
            counts[rec.severity().slot()] += 1;
        }
        Self(counts)
    }

    pub fn get(&self, severity: Severity) -> usize {
        self.0[severity.slot()]
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
