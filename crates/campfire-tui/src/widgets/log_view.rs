//! Log view widget: the scrollable pane showing the filtered lines.
//!
//! # Navigation
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Scroll up one line |
//! | `↓` / `j` | Scroll down one line |
//! | `u` / `d` | Scroll half a page |
//! | `PageUp` / `PageDown` | Scroll a full page |
//! | `g` | Jump to the first line |
//! | `G` | Jump to the last line and follow |
//!
//! # Scroll semantics
//!
//! `top` is the index of the first visible line. While `follow` is set the
//! view stays pinned to the last line as snapshots arrive; any upward scroll
//! clears it, and reaching the bottom again sets it.

use std::cell::Cell;

use crate::event::AppEvent;
use crate::theme::Theme;
use crate::view_sync::DisplaySurface;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

pub struct LogViewState {
    lines: Vec<Line<'static>>,
    /// Shown instead of `lines` when the file is absent.
    placeholder: Option<Vec<Line<'static>>>,
    error: Option<String>,
    top: usize,
    follow: bool,
    /// Cached from the last render so `handle()` can size page scrolls.
    last_height: Cell<usize>,
}

impl LogViewState {
    pub fn new(follow: bool) -> Self {
        Self {
            lines: Vec::new(),
            placeholder: None,
            error: None,
            top: 0,
            follow,
            last_height: Cell::new(20),
        }
    }

    pub fn lines(&self) -> &[Line<'static>] {
        &self.lines
    }

    pub fn top(&self) -> usize {
        self.top
    }

    pub fn is_following(&self) -> bool {
        self.follow
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn height(&self) -> usize {
        self.last_height.get().max(1)
    }

    fn max_top(&self) -> usize {
        self.lines.len().saturating_sub(self.height())
    }

    fn scroll_up(&mut self, by: usize) {
        self.top = self.top.min(self.max_top()).saturating_sub(by);
        self.follow = false;
    }

    fn scroll_down(&mut self, by: usize) {
        self.top = (self.top + by).min(self.max_top());
        if self.top == self.max_top() {
            self.follow = true;
        }
    }

    /// Handle a navigation event from the app shell.
    pub fn handle(&mut self, event: &AppEvent) {
        let page = self.height();
        match event {
            AppEvent::LineUp => self.scroll_up(1),
            AppEvent::LineDown => self.scroll_down(1),
            AppEvent::HalfPageUp => self.scroll_up((page / 2).max(1)),
            AppEvent::HalfPageDown => self.scroll_down((page / 2).max(1)),
            AppEvent::PageUp => self.scroll_up(page),
            AppEvent::PageDown => self.scroll_down(page),
            AppEvent::Top => {
                self.top = 0;
                self.follow = self.max_top() == 0;
            }
            AppEvent::Bottom => {
                self.top = self.max_top();
                self.follow = true;
            }
            _ => return,
        }
        tracing::debug!(top = self.top, follow = self.follow, "log view: scrolled");
    }

    /// First visible line for a pane `height` rows tall.
    fn window_start(&self, height: usize) -> usize {
        let max_top = self.lines.len().saturating_sub(height);
        if self.follow {
            max_top
        } else {
            self.top.min(max_top)
        }
    }
}

impl DisplaySurface for LogViewState {
    fn show_lines(&mut self, lines: Vec<Line<'static>>) {
        self.lines = lines;
        self.placeholder = None;
        if self.follow {
            self.top = self.max_top();
        } else {
            self.top = self.top.min(self.max_top());
        }
    }

    fn show_placeholder(&mut self, lines: Vec<Line<'static>>) {
        self.lines.clear();
        self.top = 0;
        self.placeholder = Some(lines);
    }

    fn show_error(&mut self, message: Option<String>) {
        self.error = message;
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct LogView<'a> {
    state: &'a LogViewState,
    focused: bool,
    theme: &'a Theme,
    title: String,
}

impl<'a> LogView<'a> {
    pub fn new(state: &'a LogViewState, focused: bool, theme: &'a Theme) -> Self {
        Self {
            state,
            focused,
            theme,
            title: " Logs ".to_string(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

impl Widget for LogView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(self.title)
            .border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let height = inner.height as usize;
        // Cache for handle(); draw always runs before the next input.
        self.state.last_height.set(height);

        let banner = self
            .state
            .error
            .as_ref()
            .map(|message| Line::styled(format!(" ⚠ {message} "), self.theme.error_banner));

        // With no snapshot to show, the error goes above the placeholder.
        if let Some(placeholder) = &self.state.placeholder {
            let lines: Vec<Line<'static>> =
                banner.into_iter().chain(placeholder.iter().cloned()).collect();
            Paragraph::new(lines).render(inner, buf);
            return;
        }

        let total = self.state.lines.len();
        let start = self.state.window_start(height);
        let end = (start + height).min(total);
        let mut lines = self.state.lines[start..end].to_vec();

        // Error banner replaces the top visible line.
        if let Some(banner) = banner {
            if lines.is_empty() {
                lines.push(banner);
            } else {
                lines[0] = banner;
            }
        }

        // The scrollbar strip sits inside the borders so its track matches
        // the content rows.
        let text_area = Rect {
            width: inner.width.saturating_sub(1),
            ..inner
        };
        let sb_area = Rect {
            x: inner.right().saturating_sub(1),
            width: 1,
            ..inner
        };

        Paragraph::new(lines).render(text_area, buf);

        if total > height {
            let mut sb_state = ScrollbarState::new(total.saturating_sub(height))
                .position(start)
                .viewport_content_length(height);
            StatefulWidget::render(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(None)
                    .end_symbol(None),
                sb_area,
                buf,
                &mut sb_state,
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
