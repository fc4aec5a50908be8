//! Filter bar widget: severity toggles and the text-filter input at the
//! bottom of the screen.
//!
//! # Editing
//!
//! - `Char(c)` inserts at the cursor.
//! - `Backspace` deletes the character before the cursor.
//! - `CursorLeft` / `CursorRight` move the cursor.
//!
//! The app shell pushes [`FilterInputState::text`] into the view after every
//! edit, so the log pane follows the input as it is typed.

use crate::event::AppEvent;
use crate::theme::Theme;
use campfire_core::{FilterState, Severity, SeverityCounts};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct FilterInputState {
    text: String,
    /// Byte offset of the cursor within `text`.
    cursor: usize,
}

impl FilterInputState {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Apply an editing event. Returns `true` when the text changed.
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        match event {
            AppEvent::Char(c) => {
                self.text.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                tracing::debug!(text = %self.text, cursor = self.cursor, "filter: char inserted");
                true
            }
            AppEvent::Backspace => {
                let Some(prev) = self.prev_boundary() else {
                    return false;
                };
                self.text.remove(prev);
                self.cursor = prev;
                tracing::debug!(text = %self.text, cursor = self.cursor, "filter: backspace");
                true
            }
            AppEvent::CursorLeft => {
                if let Some(prev) = self.prev_boundary() {
                    self.cursor = prev;
                }
                false
            }
            AppEvent::CursorRight => {
                if let Some(c) = self.text[self.cursor..].chars().next() {
                    self.cursor += c.len_utf8();
                }
                false
            }
            _ => false,
        }
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor].char_indices().last().map(|(i, _)| i)
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct FilterBar<'a> {
    input: &'a FilterInputState,
    filters: &'a FilterState,
    counts: SeverityCounts,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> FilterBar<'a> {
    pub fn new(
        input: &'a FilterInputState,
        filters: &'a FilterState,
        counts: SeverityCounts,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            input,
            filters,
            counts,
            focused,
            theme,
        }
    }

    /// Absolute terminal position of the text cursor. Pass to
    /// `frame.set_cursor_position()` after rendering.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        // Border, then the "Text: " label.
        let chars = PROMPT.chars().count() + self.input.text[..self.input.cursor].chars().count();
        let col = u16::try_from(chars).unwrap_or(u16::MAX);
        let x = area
            .x
            .saturating_add(1)
            .saturating_add(col)
            .min(area.right().saturating_sub(2));
        let y = area.y.saturating_add(2);
        (x, y)
    }

    fn toggle_line(&self) -> Line<'static> {
        let mut spans = Vec::with_capacity(Severity::COUNT * 3);
        for (i, severity) in Severity::ALL.into_iter().enumerate() {
            let shown = self.filters.is_visible(severity);
            let (mark, mark_style) = if shown {
                ("✔", self.theme.filter_enabled)
            } else {
                ("✘", self.theme.filter_disabled)
            };
            spans.push(Span::styled(format!("[{}] ", i + 1), self.theme.hint));
            spans.push(Span::styled(
                severity.to_string(),
                self.theme.level_style(severity),
            ));
            spans.push(Span::styled(format!(" {mark}"), mark_style));
            spans.push(Span::styled(
                format!(" ({})  ", self.counts.get(severity)),
                self.theme.hint,
            ));
        }
        Line::from(spans)
    }

    fn text_line(&self) -> Line<'static> {
        let label = Span::styled(PROMPT, self.theme.hint);
        if self.input.text.is_empty() && !self.focused {
            Line::from(vec![
                label,
                Span::styled("press f or / to filter", self.theme.hint),
            ])
        } else {
            Line::from(vec![label, Span::raw(self.input.text.clone())])
        }
    }
}

const PROMPT: &str = "Text: ";

impl Widget for FilterBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Filters ")
            .border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(vec![self.toggle_line(), self.text_line()]).render(inner, buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
