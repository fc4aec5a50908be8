use campfire::demo::{self, DemoOptions};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(
    name = "campfire-demo",
    about = "Append random log lines to a file for trying campfire"
)]
struct Cli {
    /// File to append to.
    #[arg(default_value = "demo.log")]
    path: PathBuf,

    /// Shortest pause between lines, in milliseconds.
    #[arg(long, default_value_t = 250)]
    min_ms: u64,

    /// Longest pause between lines, in milliseconds.
    #[arg(long, default_value_t = 1250)]
    max_ms: u64,

    /// Stop after this many lines.
    #[arg(long)]
    count: Option<u64>,

    /// Truncate the file before writing.
    #[arg(long)]
    reset: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    println!(
        "writing to {} (Ctrl+c to stop); watch it with: campfire {}",
        cli.path.display(),
        cli.path.display()
    );

    let opts = DemoOptions {
        path: cli.path,
        min_delay: Duration::from_millis(cli.min_ms),
        max_delay: Duration::from_millis(cli.max_ms),
        count: cli.count,
        reset: cli.reset,
    };

    tokio::select! {
        written = demo::run(opts) => {
            println!("wrote {} lines", written?);
        }
        _ = tokio::signal::ctrl_c() => {
            println!("stopped");
        }
    }
    Ok(())
}
