//! campfire TUI — ratatui application shell.
//!
//! Wires a [`PollScheduler`] over the watched path to the [`ViewSync`]
//! orchestrator and the widgets, and runs them on the calling tokio task.

pub mod app;
pub mod event;
pub mod theme;
pub mod view_sync;
pub mod widgets;

pub use app::{App, AppState};
pub use theme::Theme;
pub use view_sync::{DisplaySurface, FileStatus, LineRenderer, ViewSync};

use campfire_core::config::Config;
use campfire_feeds::{FileSnapshotter, PollScheduler};
use std::path::PathBuf;

/// Watch `path` and run the TUI until the user quits.
///
/// Fails when the configured theme is unknown or the terminal cannot be
/// set up. File problems never end the run; they are shown in the view.
pub async fn run(path: PathBuf, config: Config) -> anyhow::Result<()> {
    let theme = Theme::by_name(&config.ui.theme)?;
    let interval = config.poll.interval();
    tracing::info!(
        path = %path.display(),
        interval_ms = interval.as_millis() as u64,
        theme = %config.ui.theme,
        "starting campfire"
    );

    let scheduler = PollScheduler::new(FileSnapshotter::new(path.clone()), interval);
    let state = AppState::new(path, &config, theme);
    App::new(state, scheduler).run().await
}
