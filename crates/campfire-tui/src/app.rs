//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, multiplexes poll results and terminal
//! input on one task, and tears everything down cleanly on exit or panic.
//! Each input is handled to completion before the next is awaited, so
//! [`AppState`] needs no locking.

use crate::{
    event::{self, AppEvent},
    theme::Theme,
    view_sync::{LineRenderer, ViewSync},
    widgets::{
        filter_bar::{FilterBar, FilterInputState},
        header::Header,
        help::HelpPopup,
        log_view::{LogView, LogViewState},
    },
};
use campfire_core::{config::Config, FilterState};
use campfire_feeds::{FileEvent, PollScheduler};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Frame, Terminal,
};
use std::{io, path::PathBuf};

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Log,
    /// The text filter is being edited.
    Filter,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub view: ViewSync,
    pub log: LogViewState,
    pub filter_input: FilterInputState,
    pub focus: Focus,
    pub theme: Theme,
    pub show_help: bool,
    pub quit: bool,
}

impl AppState {
    pub fn new(path: impl Into<PathBuf>, config: &Config, theme: Theme) -> Self {
        let filters = FilterState::from(&config.filters);
        let filter_input = FilterInputState::new(filters.text());
        let renderer = LineRenderer::new(&theme, config.ui.line_numbers);
        let mut view = ViewSync::new(path, filters, renderer, theme.placeholder);
        let mut log = LogViewState::new(config.ui.follow);
        view.refresh(&mut log);

        Self {
            view,
            log,
            filter_input,
            focus: Focus::Log,
            theme,
            show_help: false,
            quit: false,
        }
    }

    /// Apply one poll result.
    pub fn on_file_event(&mut self, event: FileEvent) {
        self.view.on_file_event(event, &mut self.log);
    }

    /// Map a raw terminal event according to the current focus and apply it.
    pub fn on_terminal_event(&mut self, raw: Event) {
        let mapped = match self.focus {
            Focus::Filter => event::to_app_event_insert(raw),
            Focus::Log => event::to_app_event(raw),
        };
        if let Some(ev) = mapped {
            tracing::debug!(focus = ?self.focus, event = ?ev, "key event");
            self.handle(ev);
        }
    }

    pub fn handle(&mut self, event: AppEvent) {
        // Help popup intercepts everything; only close keys pass through.
        if self.show_help {
            match event {
                AppEvent::Help | AppEvent::Escape => {
                    tracing::debug!("help popup closed");
                    self.show_help = false;
                }
                AppEvent::Quit => self.quit = true,
                _ => {}
            }
            return;
        }

        match self.focus {
            Focus::Filter => self.handle_insert(event),
            Focus::Log => self.handle_normal(event),
        }
    }

    fn handle_normal(&mut self, event: AppEvent) {
        match event {
            AppEvent::Quit => {
                tracing::debug!("quit");
                self.quit = true;
            }
            AppEvent::Help => {
                tracing::debug!("help popup opened");
                self.show_help = true;
            }
            AppEvent::ToggleSeverity(severity) => {
                self.view.toggle_severity(severity, &mut self.log);
                tracing::debug!(
                    %severity,
                    visible = self.view.filters().is_visible(severity),
                    "severity toggled"
                );
            }
            AppEvent::FilterFocus => {
                tracing::debug!("focus -> Filter");
                self.focus = Focus::Filter;
            }
            AppEvent::FilterClear => {
                self.filter_input.clear();
                self.view.clear_text(&mut self.log);
            }
            // Terminal resize is handled by the next draw.
            AppEvent::Resize(_, _) => {}
            other => self.log.handle(&other),
        }
    }

    fn handle_insert(&mut self, event: AppEvent) {
        match event {
            AppEvent::Quit => self.quit = true,
            AppEvent::Enter => {
                tracing::debug!(text = %self.filter_input.text(), "filter accepted");
                self.focus = Focus::Log;
            }
            AppEvent::Escape => {
                tracing::debug!("filter cancelled");
                self.filter_input.clear();
                self.view.clear_text(&mut self.log);
                self.focus = Focus::Log;
            }
            AppEvent::Resize(_, _) => {}
            other => {
                if self.filter_input.handle(&other) {
                    self.view.set_text(self.filter_input.text(), &mut self.log);
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
    scheduler: PollScheduler,
}

impl App {
    pub fn new(state: AppState, scheduler: PollScheduler) -> Self {
        Self { state, scheduler }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub async fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal).await;

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let mut input = EventStream::new();

        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            tokio::select! {
                event = self.scheduler.next_event() => self.state.on_file_event(event),
                raw = input.next() => match raw {
                    Some(Ok(raw)) => self.state.on_terminal_event(raw),
                    Some(Err(err)) => return Err(err.into()),
                    None => break,
                },
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

pub fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 1-line header | log pane | 2-row filter bar inside borders
    let [header_area, log_area, filter_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(4),
    ])
    .areas(area);

    frame.render_widget(
        Header::new(state.view.path(), state.view.status(), &state.theme),
        header_area,
    );

    let title = format!(
        " Logs ({}/{}) ",
        state.view.visible_count(),
        state.view.line_count()
    );
    frame.render_widget(
        LogView::new(&state.log, state.focus == Focus::Log, &state.theme).title(title),
        log_area,
    );

    let filter_bar = FilterBar::new(
        &state.filter_input,
        state.view.filters(),
        state.view.counts(),
        state.focus == Focus::Filter,
        &state.theme,
    );
    let cursor = filter_bar.cursor_position(filter_area);
    frame.render_widget(filter_bar, filter_area);

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    } else if state.focus == Focus::Filter {
        frame.set_cursor_position(cursor);
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
