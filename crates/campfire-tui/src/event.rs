//! Semantic application events: crossterm input mapped to a small
//! vocabulary so widgets never touch crossterm directly.
//!
//! # Usage
//!
//! The event loop calls [`to_app_event`] while the log pane has focus and
//! [`to_app_event_insert`] while the text filter is being edited.
//!
//! # Keybindings
//!
//! | Key(s)                    | Event                      |
//! |---------------------------|----------------------------|
//! | `q`, `Ctrl+c`             | `Quit`                     |
//! | `1` … `6`                 | `ToggleSeverity(..)`       |
//! | `f`, `/`, `Ctrl+f`        | `FilterFocus`              |
//! | `x`                       | `FilterClear`              |
//! | `↑` / `k`, wheel up       | `LineUp`                   |
//! | `↓` / `j`, wheel down     | `LineDown`                 |
//! | `u`, `Ctrl+u`             | `HalfPageUp`               |
//! | `d`, `Ctrl+d`             | `HalfPageDown`             |
//! | `PageUp` / `PageDown`     | `PageUp` / `PageDown`      |
//! | `g`, `Home`               | `Top`                      |
//! | `G`, `End`                | `Bottom`                   |
//! | `?`                       | `Help`                     |
//! | `Esc`                     | `Escape`                   |
//! | terminal resize           | `Resize(w, h)`             |
//!
//! ## Insert mode
//!
//! Every printable character becomes `Char`, including the letters and
//! digits bound above. `←`/`→` move the cursor. Only `Ctrl+c`, `Esc`,
//! `Enter` and `Backspace` keep special meaning.

use campfire_core::Severity;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};

/// A semantic application event derived from a raw crossterm [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    /// Show or hide the key binding popup.
    Help,
    /// Start editing the text filter.
    FilterFocus,
    /// Drop the text filter pattern.
    FilterClear,
    ToggleSeverity(Severity),
    LineUp,
    LineDown,
    HalfPageUp,
    HalfPageDown,
    PageUp,
    PageDown,
    Top,
    /// Jump to the last line and resume following.
    Bottom,
    CursorLeft,
    CursorRight,
    /// A printable character for the text filter.
    Char(char),
    Backspace,
    Enter,
    Escape,
    /// The terminal was resized to the given (width, height).
    Resize(u16, u16),
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] (normal mode).
///
/// Returns `None` for input with no binding, and for key releases on
/// terminals that report them.
pub fn to_app_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) if key.kind != KeyEventKind::Release => map_key(key),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollUp => Some(AppEvent::LineUp),
            MouseEventKind::ScrollDown => Some(AppEvent::LineDown),
            _ => None,
        },
        _ => None,
    }
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] while the text filter
/// is focused.
pub fn to_app_event_insert(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) if key.kind != KeyEventKind::Release => map_key_insert(key),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    let plain = key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT;

    match key.code {
        Char('q') if key.modifiers == Mod::NONE => Some(AppEvent::Quit),
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        Char(c @ '1'..='6') if plain => {
            Severity::from_toggle_key(c as u8 - b'0').map(AppEvent::ToggleSeverity)
        }

        Char('f') | Char('/') if key.modifiers == Mod::NONE => Some(AppEvent::FilterFocus),
        Char('f') if key.modifiers == Mod::CONTROL => Some(AppEvent::FilterFocus),
        Char('x') if key.modifiers == Mod::NONE => Some(AppEvent::FilterClear),

        Up | Char('k') if key.modifiers == Mod::NONE => Some(AppEvent::LineUp),
        Down | Char('j') if key.modifiers == Mod::NONE => Some(AppEvent::LineDown),

        Char('u') if key.modifiers == Mod::NONE || key.modifiers == Mod::CONTROL => {
            Some(AppEvent::HalfPageUp)
        }
        Char('d') if key.modifiers == Mod::NONE || key.modifiers == Mod::CONTROL => {
            Some(AppEvent::HalfPageDown)
        }
        PageUp => Some(AppEvent::PageUp),
        PageDown => Some(AppEvent::PageDown),

        Home => Some(AppEvent::Top),
        End => Some(AppEvent::Bottom),
        Char('g') if key.modifiers == Mod::NONE => Some(AppEvent::Top),
        // Uppercase G: SHIFT may or may not be reported depending on the
        // terminal, so match on the code alone.
        Char('G') => Some(AppEvent::Bottom),

        Char('?') if plain => Some(AppEvent::Help),
        Esc => Some(AppEvent::Escape),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),

        _ => None,
    }
}

fn map_key_insert(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        Left => Some(AppEvent::CursorLeft),
        Right => Some(AppEvent::CursorRight),

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
