//! Configuration types for campfire.
//!
//! [`Config::load`] reads `~/.config/campfire/config.toml`, creating it with
//! the built-in defaults if it does not yet exist. [`Config::defaults`]
//! returns the same defaults without touching the filesystem (useful in
//! tests). Command-line flags are applied on top by the binary.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[poll]
interval_ms = 500

[ui]
theme        = "frappe"
line_numbers = true
follow       = true

[filters]
show_info  = true
show_warn  = true
show_error = true
show_debug = true
show_fatal = true
show_other = false
text       = ""
"#;

/// Polls faster than this are clamped; they only burn CPU re-reading the file.
pub const MIN_POLL_INTERVAL_MS: u64 = 50;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub poll: PollConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub filters: FiltersConfig,
}

/// `[poll]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PollConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

fn default_interval_ms() -> u64 { 500 }

impl Default for PollConfig {
    fn default() -> Self {
        Self { interval_ms: default_interval_ms() }
    }
}

impl PollConfig {
    /// Poll cadence, clamped to [`MIN_POLL_INTERVAL_MS`].
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(MIN_POLL_INTERVAL_MS))
    }
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_line_numbers")]
    pub line_numbers: bool,
    #[serde(default = "default_follow")]
    pub follow: bool,
}

fn default_theme() -> String { "frappe".to_string() }
fn default_line_numbers() -> bool { true }
fn default_follow() -> bool { true }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            line_numbers: default_line_numbers(),
            follow: default_follow(),
        }
    }
}

/// `[filters]` section of `config.toml`: the filter state at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct FiltersConfig {
    #[serde(default = "default_true")]
    pub show_info: bool,
    #[serde(default = "default_true")]
    pub show_warn: bool,
    #[serde(default = "default_true")]
    pub show_error: bool,
    #[serde(default = "default_true")]
    pub show_debug: bool,
    #[serde(default = "default_true")]
    pub show_fatal: bool,
    #[serde(default)]
    pub show_other: bool,
    #[serde(default)]
    pub text: String,
}

fn default_true() -> bool { true }

impl Default for FiltersConfig {
    fn default() -> Self {
        Self {
            show_info: true,
            show_warn: true,
            show_error: true,
            show_debug: true,
            show_fatal: true,
            show_other: false,
            text: String::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/campfire/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
            tracing::info!(path = %path.display(), "wrote default config");
        }

        Self::load_from(&path)
    }

    /// Load a specific file layered over the defaults. A missing file yields
    /// the defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("campfire")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load() {
        let cfg = Config::defaults();
        assert_eq!(cfg.poll.interval_ms, 500);
        assert_eq!(cfg.ui.theme, "frappe");
        assert!(cfg.ui.line_numbers);
        assert!(cfg.filters.show_error);
        assert!(!cfg.filters.show_other);
        assert!(cfg.filters.text.is_empty());
    }

    #[test]
    fn file_overrides_only_what_it_sets() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[poll]\ninterval_ms = 200\n\n[filters]\nshow_other = true\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.poll.interval_ms, 200);
        assert!(cfg.filters.show_other);
        assert!(cfg.filters.show_info);
        assert_eq!(cfg.ui.theme, "frappe");
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.poll.interval_ms, 500);
    }

    #[test]
    fn interval_is_clamped() {
        let poll = PollConfig { interval_ms: 1 };
        assert_eq!(poll.interval(), Duration::from_millis(MIN_POLL_INTERVAL_MS));
        let poll = PollConfig { interval_ms: 750 };
        assert_eq!(poll.interval(), Duration::from_millis(750));
    }
}
