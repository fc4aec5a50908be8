//! ViewSync keeps the displayed lines in step with the file and the
//! filter.
//!
//! Two things can change what is on screen: a new [`FileEvent`] from the
//! poller, and a user edit of the [`FilterState`]. Both end in
//! [`ViewSync::refresh`], which re-runs the filter over the records held in
//! memory and pushes pre-styled lines to a [`DisplaySurface`]. Filter edits
//! never cause a file read.
//!
//! The surface only ever sees rendered [`Line`]s, placeholders and error
//! text. Records stay inside this module.

use crate::theme::Theme;
use campfire_core::{filter, parse, FilterState, LogRecord, Severity, SeverityCounts};
use campfire_feeds::{FileEvent, FileMeta};
use ratatui::{
    style::Style,
    text::{Line, Span},
};
use std::path::{Path, PathBuf};

/// Where rendered output goes. Implemented by the log pane state; tests use
/// a recording implementation.
pub trait DisplaySurface {
    /// Replace the visible lines (and drop any placeholder).
    fn show_lines(&mut self, lines: Vec<Line<'static>>);
    /// Replace the view with a placeholder message.
    fn show_placeholder(&mut self, lines: Vec<Line<'static>>);
    /// Show an inline error above the lines, or clear it with `None`.
    fn show_error(&mut self, message: Option<String>);
}

/// What the header knows about the watched file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// No poll has completed yet.
    Unknown,
    Absent,
    Present(FileMeta),
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

const TAB_WIDTH: usize = 4;

/// Turns records into styled lines. Built once from the [`Theme`].
#[derive(Debug, Clone)]
pub struct LineRenderer {
    levels: [Style; Severity::COUNT],
    number: Style,
    highlight: Style,
    line_numbers: bool,
}

impl LineRenderer {
    pub fn new(theme: &Theme, line_numbers: bool) -> Self {
        Self {
            levels: Severity::ALL.map(|s| theme.level_style(s)),
            number: theme.line_number,
            highlight: theme.highlight,
            line_numbers,
        }
    }

    /// Render one record: `"  12. "` prefix (1-based, from the record's
    /// original index) followed by the text in its severity style, with
    /// occurrences of `pattern` highlighted.
    pub fn render(&self, record: &LogRecord, pattern: &str) -> Line<'static> {
        let style = self.levels[record.severity().slot()];
        let text = record.text().replace('\t', &" ".repeat(TAB_WIDTH));

        let mut spans = Vec::with_capacity(2);
        if self.line_numbers {
            spans.push(Span::styled(
                format!("{:>4}. ", record.line_number()),
                self.number,
            ));
        }

        if pattern.is_empty() {
            spans.push(Span::styled(text, style));
        } else {
            let hit = style.patch(self.highlight);
            let mut rest = text.as_str();
            while let Some(pos) = rest.find(pattern) {
                if pos > 0 {
                    spans.push(Span::styled(rest[..pos].to_string(), style));
                }
                let end = pos + pattern.len();
                spans.push(Span::styled(rest[pos..end].to_string(), hit));
                rest = &rest[end..];
            }
            if !rest.is_empty() {
                spans.push(Span::styled(rest.to_string(), style));
            }
        }

        Line::from(spans)
    }
}

// ---------------------------------------------------------------------------
// ViewSync
// ---------------------------------------------------------------------------

pub struct ViewSync {
    path: PathBuf,
    records: Vec<LogRecord>,
    counts: SeverityCounts,
    filters: FilterState,
    status: FileStatus,
    error: Option<String>,
    renderer: LineRenderer,
    placeholder_style: Style,
    /// Lines shown by the last refresh, excluding the trailing blank.
    shown: usize,
}

impl ViewSync {
    pub fn new(
        path: impl Into<PathBuf>,
        filters: FilterState,
        renderer: LineRenderer,
        placeholder_style: Style,
    ) -> Self {
        Self {
            path: path.into(),
            records: Vec::new(),
            counts: SeverityCounts::default(),
            filters,
            status: FileStatus::Unknown,
            error: None,
            renderer,
            placeholder_style,
            shown: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn status(&self) -> FileStatus {
        self.status
    }

    /// Per-severity totals of the current snapshot, before filtering.
    pub fn counts(&self) -> SeverityCounts {
        self.counts
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Lines in the file. The empty segment after a final newline is not
    /// a line.
    pub fn line_count(&self) -> usize {
        self.records.len() - usize::from(self.has_trailing_blank())
    }

    /// Lines passing the current filter, counted like [`Self::line_count`].
    pub fn visible_count(&self) -> usize {
        self.shown
    }

    fn has_trailing_blank(&self) -> bool {
        self.records.last().is_some_and(|r| r.text().is_empty())
    }

    // ── File events ────────────────────────────────────────────────────────

    pub fn on_file_event(&mut self, event: FileEvent, surface: &mut impl DisplaySurface) {
        match event {
            FileEvent::Exists {
                meta,
                content,
                changed,
            } => {
                let was_present = matches!(self.status, FileStatus::Present(_));
                self.status = FileStatus::Present(meta);
                let had_error = self.error.take().is_some();
                if had_error {
                    surface.show_error(None);
                }
                // The snapshotter reports `changed` against its own last
                // read, which is exactly what `records` was parsed from.
                if changed || !was_present {
                    self.records = parse(&content);
                    self.counts = SeverityCounts::tally(&self.records);
                    tracing::debug!(
                        records = self.records.len(),
                        bytes = content.len(),
                        "view: snapshot parsed"
                    );
                    self.refresh(surface);
                }
            }
            FileEvent::Gone => {
                if self.status != FileStatus::Absent {
                    tracing::debug!(path = %self.path.display(), "view: file absent");
                }
                self.records.clear();
                self.counts = SeverityCounts::default();
                self.status = FileStatus::Absent;
                if self.error.take().is_some() {
                    surface.show_error(None);
                }
                self.refresh(surface);
            }
            FileEvent::Error(err) => {
                let message = format!("Error reading file: {err}");
                tracing::warn!(%message, "view: keeping last good snapshot");
                self.error = Some(message.clone());
                surface.show_error(Some(message));
            }
        }
    }

    // ── Filter mutations ───────────────────────────────────────────────────

    pub fn toggle_severity(&mut self, severity: Severity, surface: &mut impl DisplaySurface) {
        self.filters.toggle_severity(severity);
        self.refresh(surface);
    }

    pub fn set_text(&mut self, pattern: &str, surface: &mut impl DisplaySurface) {
        if self.filters.text() == pattern {
            return;
        }
        self.filters.set_text(pattern);
        self.refresh(surface);
    }

    pub fn clear_text(&mut self, surface: &mut impl DisplaySurface) {
        if self.filters.text().is_empty() {
            return;
        }
        self.filters.clear_text();
        self.refresh(surface);
    }

    /// Re-derive the displayed lines from the records in memory.
    pub fn refresh(&mut self, surface: &mut impl DisplaySurface) {
        match self.status {
            FileStatus::Absent => {
                self.shown = 0;
                surface.show_placeholder(self.absent_placeholder());
            }
            FileStatus::Unknown => {
                self.shown = 0;
                surface.show_placeholder(self.waiting_placeholder());
            }
            FileStatus::Present(_) => {
                let pattern = self.filters.text();
                let visible = filter::apply(&self.records, &self.filters);
                let trailing = self.has_trailing_blank()
                    && visible
                        .last()
                        .is_some_and(|r| r.index() + 1 == self.records.len());
                let shown = visible.len() - usize::from(trailing);
                let lines = visible
                    .into_iter()
                    .map(|r| self.renderer.render(r, pattern))
                    .collect();
                surface.show_lines(lines);
                self.shown = shown;
            }
        }
    }

    fn absent_placeholder(&self) -> Vec<Line<'static>> {
        vec![
            Line::styled(
                format!("❌ File not found: {}", self.path.display()),
                self.placeholder_style,
            ),
            Line::default(),
            Line::styled("Waiting for file to be created...", self.placeholder_style),
        ]
    }

    fn waiting_placeholder(&self) -> Vec<Line<'static>> {
        vec![Line::styled(
            "Waiting for file to be found...",
            self.placeholder_style,
        )]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use campfire_feeds::SnapshotError;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    /// Records what ViewSync hands over, as plain strings.
    #[derive(Default)]
    struct Recorder {
        lines: Vec<String>,
        placeholder: Option<Vec<String>>,
        error: Option<String>,
        pushes: usize,
    }

    fn plain(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    impl DisplaySurface for Recorder {
        fn show_lines(&mut self, lines: Vec<Line<'static>>) {
            self.lines = lines.iter().map(plain).collect();
            self.placeholder = None;
            self.pushes += 1;
        }
        fn show_placeholder(&mut self, lines: Vec<Line<'static>>) {
            self.lines.clear();
            self.placeholder = Some(lines.iter().map(plain).collect());
            self.pushes += 1;
        }
        fn show_error(&mut self, message: Option<String>) {
            self.error = message;
        }
    }

    fn view() -> ViewSync {
        let theme = Theme::load_default();
        ViewSync::new(
            "/var/log/app.log",
            FilterState::default(),
            LineRenderer::new(&theme, true),
            theme.placeholder,
        )
    }

    fn exists(content: &str, changed: bool) -> FileEvent {
        FileEvent::Exists {
            meta: FileMeta {
                size: content.len() as u64,
                modified: None,
            },
            content: Arc::from(content.as_bytes()),
            changed,
        }
    }

    fn io_error() -> FileEvent {
        FileEvent::Error(SnapshotError::Read {
            path: PathBuf::from("/var/log/app.log"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        })
    }

    #[test]
    fn snapshot_is_filtered_and_numbered() {
        let mut view = view();
        let mut out = Recorder::default();
        view.on_file_event(exists("INFO a\nplain\nERRO b\n", true), &mut out);
        assert_eq!(out.lines, vec!["   1. INFO a", "   3. ERRO b"]);
        assert_eq!(view.record_count(), 4);
        assert_eq!(view.line_count(), 3);
        assert_eq!(view.visible_count(), 2);
    }

    #[test]
    fn rotation_replaces_every_record() {
        let mut view = view();
        let mut out = Recorder::default();
        view.on_file_event(exists("INFO a\nERRO b\n", true), &mut out);
        view.on_file_event(exists("WARN c\n", true), &mut out);
        assert_eq!(out.lines, vec!["   1. WARN c"]);
        assert_eq!(view.counts().get(Severity::Info), 0);
        assert_eq!(view.counts().get(Severity::Warn), 1);
    }

    #[test]
    fn gone_clears_records_and_shows_placeholder() {
        let mut view = view();
        let mut out = Recorder::default();
        view.on_file_event(exists("INFO a\n", true), &mut out);
        view.on_file_event(FileEvent::Gone, &mut out);

        assert_eq!(view.record_count(), 0);
        assert_eq!(view.status(), FileStatus::Absent);
        let placeholder = out.placeholder.expect("placeholder shown");
        assert_eq!(placeholder[0], "❌ File not found: /var/log/app.log");
        assert!(out.lines.is_empty());
    }

    #[test]
    fn error_keeps_last_good_lines() {
        let mut view = view();
        let mut out = Recorder::default();
        view.on_file_event(exists("INFO a\n", true), &mut out);
        view.on_file_event(io_error(), &mut out);

        assert_eq!(out.lines, vec!["   1. INFO a"]);
        assert!(out.error.as_deref().unwrap().starts_with("Error reading file"));
        assert_eq!(view.record_count(), 2);
    }

    #[test]
    fn next_good_snapshot_clears_error() {
        let mut view = view();
        let mut out = Recorder::default();
        view.on_file_event(exists("INFO a\n", true), &mut out);
        view.on_file_event(io_error(), &mut out);
        view.on_file_event(exists("INFO a\n", false), &mut out);
        assert_eq!(out.error, None);
        assert_eq!(view.error(), None);
    }

    #[test]
    fn unchanged_snapshot_is_not_re_rendered() {
        let mut view = view();
        let mut out = Recorder::default();
        view.on_file_event(exists("INFO a\n", true), &mut out);
        view.on_file_event(exists("INFO a\n", false), &mut out);
        assert_eq!(out.pushes, 1);
    }

    #[test]
    fn filter_changes_reuse_records() {
        let mut view = view();
        let mut out = Recorder::default();
        view.on_file_event(
            exists("INFO login ok\nERRO login failed\n", true),
            &mut out,
        );

        view.set_text("login", &mut out);
        assert_eq!(
            out.lines,
            vec!["   1. INFO login ok", "   2. ERRO login failed"]
        );

        view.set_text("failed", &mut out);
        assert_eq!(out.lines, vec!["   2. ERRO login failed"]);

        view.toggle_severity(Severity::Error, &mut out);
        assert!(out.lines.is_empty());

        view.clear_text(&mut out);
        assert_eq!(out.lines, vec!["   1. INFO login ok"]);
    }

    #[test]
    fn filter_change_while_absent_keeps_placeholder() {
        let mut view = view();
        let mut out = Recorder::default();
        view.on_file_event(FileEvent::Gone, &mut out);
        view.toggle_severity(Severity::Other, &mut out);
        assert!(out.placeholder.is_some());
    }

    #[test]
    fn trailing_newline_is_not_counted_as_a_line() {
        let mut view = view();
        let mut out = Recorder::default();
        view.on_file_event(exists("INFO a\nWARN b\n", true), &mut out);
        assert_eq!(view.line_count(), 2);
        assert_eq!(view.visible_count(), 2);

        // OTHER visible: the blank is rendered but still not counted.
        view.toggle_severity(Severity::Other, &mut out);
        assert_eq!(out.lines.len(), 3);
        assert_eq!(view.visible_count(), 2);

        view.on_file_event(FileEvent::Gone, &mut out);
        assert_eq!(view.line_count(), 0);
        assert_eq!(view.visible_count(), 0);
    }

    #[test]
    fn before_first_poll_shows_waiting() {
        let mut view = view();
        let mut out = Recorder::default();
        view.refresh(&mut out);
        assert_eq!(
            out.placeholder,
            Some(vec!["Waiting for file to be found...".to_string()])
        );
    }

    #[test]
    fn renderer_highlights_every_match() {
        let theme = Theme::load_default();
        let renderer = LineRenderer::new(&theme, false);
        let rec = LogRecord::new(0, "ERRO db down, db unreachable");
        let line = renderer.render(&rec, "db");
        let parts: Vec<&str> = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(parts, vec!["ERRO ", "db", " down, ", "db", " unreachable"]);
        assert_eq!(line.spans[1].style, theme.level_style(Severity::Error).patch(theme.highlight));
    }

    #[test]
    fn renderer_expands_tabs() {
        let theme = Theme::load_default();
        let renderer = LineRenderer::new(&theme, false);
        let line = renderer.render(&LogRecord::new(0, "INFO\tx"), "");
        assert_eq!(plain(&line), "INFO    x");
    }
}
