use campfire_core::config::Config;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "campfire",
    version,
    about = "Watch a log file and filter its lines by severity"
)]
struct Cli {
    /// Log file to watch. It does not need to exist yet.
    path: PathBuf,

    /// Poll interval in milliseconds (overrides the config file).
    #[arg(long, value_name = "MS")]
    interval: Option<u64>,

    /// Initial text filter.
    #[arg(long, value_name = "TEXT")]
    filter: Option<String>,

    /// Colour theme: frappe (dark) or latte (light).
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Show lines without a recognised severity from the start.
    #[arg(long)]
    show_other: bool,

    /// Write debug logs to $TMPDIR/campfire-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,
}

impl Cli {
    /// Layer the command line over the loaded config.
    fn apply(&self, config: &mut Config) {
        if let Some(ms) = self.interval {
            config.poll.interval_ms = ms;
        }
        if let Some(text) = &self.filter {
            config.filters.text = text.clone();
        }
        if let Some(theme) = &self.theme {
            config.ui.theme = theme.clone();
        }
        if self.show_other {
            config.filters.show_other = true;
        }
    }
}

fn init_debug_log() -> anyhow::Result<PathBuf> {
    let path = std::env::temp_dir().join("campfire-debug.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;
    tracing_subscriber::fmt()
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();
    Ok(path)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let path = init_debug_log()?;
        tracing::info!(log = %path.display(), "campfire debug log started");
    }

    let mut config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "config unreadable, using defaults");
        Config::defaults()
    });
    cli.apply(&mut config);

    campfire_tui::run(cli.path, config).await
}
