//! Colour theme for the campfire TUI.
//!
//! Themes are defined as TOML files embedded in the binary via
//! [`include_str!`], so the application works without any files on disk.
//! Resolve one at startup with [`Theme::by_name`] and pass it through the
//! application as a shared reference; nothing reads colours from global
//! state.

use campfire_core::Severity;
use config::{Config, File, FileFormat};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

const FRAPPE_THEME_SRC: &str = include_str!("themes/frappe.toml");
const LATTE_THEME_SRC: &str = include_str!("themes/latte.toml");

/// Names accepted by [`Theme::by_name`].
pub const THEME_NAMES: &[&str] = &["frappe", "latte"];

// ---------------------------------------------------------------------------
// Raw (serde) types, mirroring the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct RawStyle {
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
    #[serde(default)]
    italic: bool,
    #[serde(default)]
    underlined: bool,
}

impl RawStyle {
    fn into_style(self) -> Style {
        let mut style = Style::default();
        if let Some(c) = self.fg.as_deref().and_then(parse_color) {
            style = style.fg(c);
        }
        if let Some(c) = self.bg.as_deref().and_then(parse_color) {
            style = style.bg(c);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.dim {
            style = style.add_modifier(Modifier::DIM);
        }
        if self.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if self.underlined {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        style
    }
}

#[derive(Debug, Deserialize)]
struct RawLevels {
    info: RawStyle,
    warn: RawStyle,
    error: RawStyle,
    debug: RawStyle,
    fatal: RawStyle,
    #[serde(default)]
    other: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawBorders {
    focused: RawStyle,
    unfocused: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawHeader {
    title: RawStyle,
    filename: RawStyle,
    stats: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawFilters {
    enabled: RawStyle,
    disabled: RawStyle,
    hint: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawView {
    line_number: RawStyle,
    highlight: RawStyle,
    error: RawStyle,
    placeholder: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    levels: RawLevels,
    borders: RawBorders,
    header: RawHeader,
    filters: RawFilters,
    view: RawView,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Application colour theme. All styles are pre-resolved ratatui [`Style`]
/// values.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Styles per severity, indexed by [`Severity::slot`].
    levels: [Style; Severity::COUNT],

    pub border_focused: Style,
    pub border_unfocused: Style,

    pub title: Style,
    pub filename: Style,
    pub stats: Style,

    /// Toggle indicator for a visible severity.
    pub filter_enabled: Style,
    /// Toggle indicator for a hidden severity.
    pub filter_disabled: Style,
    pub hint: Style,

    pub line_number: Style,
    /// Patched over the level style for text-filter matches.
    pub highlight: Style,
    /// Inline banner for file-access errors.
    pub error_banner: Style,
    pub placeholder: Style,
}

impl Theme {
    /// Load and parse the embedded dark theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed, which the unit tests rule
    /// out.
    pub fn load_default() -> Self {
        Self::from_toml_str(FRAPPE_THEME_SRC).expect("embedded frappe theme must be valid TOML")
    }

    /// Resolve one of the embedded themes by name (case-insensitive).
    pub fn by_name(name: &str) -> anyhow::Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "frappe" | "dark" | "default" => Self::from_toml_str(FRAPPE_THEME_SRC),
            "latte" | "light" => Self::from_toml_str(LATTE_THEME_SRC),
            other => anyhow::bail!(
                "unknown theme {other:?} (available: {})",
                THEME_NAMES.join(", ")
            ),
        }
    }

    /// Parse a theme from a TOML string. Unknown keys are ignored.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        let RawLevels {
            info,
            warn,
            error,
            debug,
            fatal,
            other,
        } = raw.levels;

        Ok(Self {
            levels: [
                info.into_style(),
                warn.into_style(),
                error.into_style(),
                debug.into_style(),
                fatal.into_style(),
                other.into_style(),
            ],
            border_focused: raw.borders.focused.into_style(),
            border_unfocused: raw.borders.unfocused.into_style(),
            title: raw.header.title.into_style(),
            filename: raw.header.filename.into_style(),
            stats: raw.header.stats.into_style(),
            filter_enabled: raw.filters.enabled.into_style(),
            filter_disabled: raw.filters.disabled.into_style(),
            hint: raw.filters.hint.into_style(),
            line_number: raw.view.line_number.into_style(),
            highlight: raw.view.highlight.into_style(),
            error_banner: raw.view.error.into_style(),
            placeholder: raw.view.placeholder.into_style(),
        })
    }

    /// Style for lines of the given severity.
    pub fn level_style(&self, severity: Severity) -> Style {
        self.levels[severity.slot()]
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.border_focused
        } else {
            self.border_unfocused
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a colour name into a ratatui [`Color`].
///
/// Accepts:
/// - Named terminal colours (case-insensitive): `red`, `dark_gray`, etc.
/// - Hex RGB: `#rrggbb`
/// - 256-colour indexed: `indexed:N`
fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "darkgray" | "dark_grey" | "darkgrey" => Some(Color::DarkGray),
        "white" => Some(Color::White),
        s if s.starts_with('#') && s.len() == 7 => {
            let r = u8::from_str_radix(&s[1..3], 16).ok()?;
            let g = u8::from_str_radix(&s[3..5], 16).ok()?;
            let b = u8::from_str_radix(&s[5..7], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        s if s.starts_with("indexed:") => {
            let n: u8 = s["indexed:".len()..].parse().ok()?;
            Some(Color::Indexed(n))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
