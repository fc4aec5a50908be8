//! Synthetic log writer for trying campfire without a real service.
//!
//! Appends one timestamped line at a time to a file, pausing a random
//! interval between writes. Levels use the short tokens some Go loggers
//! emit (`ERRO`, `DEBU`) next to the full ones, so every classifier branch
//! shows up on screen.

use anyhow::Context;
use chrono::{DateTime, Local};
use rand::{seq::SliceRandom, Rng};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::AsyncWriteExt;

const INFO: &[&str] = &[
    "Application started successfully",
    "Processing user request for {}",
    "Database connection established",
    "Configuration loaded from {}",
    "Background task scheduled",
    "Authentication successful for user: {}",
    "Health check passed",
    "Cache warmed up with {} entries",
];

const WARN: &[&str] = &[
    "Cache miss for key: {}",
    "Rate limit approaching for user: {}",
    "Disk space low: {}% remaining",
    "Connection pool nearly exhausted",
    "Deprecated API endpoint accessed: {}",
    "Queue backlog growing: {} items",
];

const ERROR: &[&str] = &[
    "Connection timeout occurred",
    "Invalid input received from {}",
    "Service unavailable: {}",
    "Database query failed for table: {}",
    "Permission denied accessing {}",
    "Network error: connection refused",
];

const DEBUG: &[&str] = &[
    "Processing request with ID: {}",
    "Query executed in {} ms",
    "Initializing module: {}",
    "Session created for user: {}",
    "Worker thread {} started",
];

const FATAL: &[&str] = &[
    "Unrecoverable state in {}, shutting down",
    "Out of memory while allocating {} MB",
];

const FILLERS: &[&str] = &[
    "user123",
    "session_abc",
    "config.yaml",
    "database.db",
    "cache_key",
    "worker_01",
    "GET /api/users",
    "POST /login",
    "/etc/app/config",
    "192.168.1.100",
];

/// (token, templates, weight)
const LEVELS: &[(&str, &[&str], u32)] = &[
    ("INFO", INFO, 40),
    ("WARN", WARN, 20),
    ("ERRO", ERROR, 15),
    ("DEBU", DEBUG, 20),
    ("FATA", FATAL, 2),
    // Untagged lines exercise the OTHER bucket.
    ("", &["--- heartbeat {} ---"], 3),
];

/// Settings for [`run`].
#[derive(Debug, Clone)]
pub struct DemoOptions {
    pub path: PathBuf,
    pub min_delay: Duration,
    pub max_delay: Duration,
    /// Stop after this many lines; `None` runs until interrupted.
    pub count: Option<u64>,
    /// Truncate the file before writing.
    pub reset: bool,
}

/// Build one line: `2024-01-15 10:00:00 INFO message`.
pub fn random_line<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Local>) -> String {
    let (token, templates, _) = LEVELS
        .choose_weighted(rng, |(_, _, weight)| *weight)
        .copied()
        .unwrap_or(LEVELS[0]);
    let template = templates.choose(rng).copied().unwrap_or("");

    let message = if template.contains("{}") {
        let fill = if rng.gen_bool(0.5) {
            FILLERS.choose(rng).copied().unwrap_or("").to_string()
        } else {
            rng.gen_range(1..1000).to_string()
        };
        template.replacen("{}", &fill, 1)
    } else {
        template.to_string()
    };

    let stamp = now.format("%Y-%m-%d %H:%M:%S");
    if token.is_empty() {
        format!("{stamp} {message}")
    } else {
        format!("{stamp} {token} {message}")
    }
}

/// Append random lines to `opts.path` until `opts.count` is reached or the
/// task is cancelled.
pub async fn run(opts: DemoOptions) -> anyhow::Result<u64> {
    anyhow::ensure!(
        opts.min_delay <= opts.max_delay,
        "minimum delay {:?} exceeds maximum {:?}",
        opts.min_delay,
        opts.max_delay
    );

    if opts.reset {
        tokio::fs::write(&opts.path, b"")
            .await
            .with_context(|| format!("cannot reset {}", opts.path.display()))?;
    }

    let mut written = 0u64;
    while opts.count.map_or(true, |limit| written < limit) {
        // ThreadRng is not Send; keep it out of the await points.
        let (line, delay) = {
            let mut rng = rand::thread_rng();
            let delay = rng.gen_range(opts.min_delay..=opts.max_delay);
            (random_line(&mut rng, Local::now()), delay)
        };

        // Open per write so rotating or deleting the file under a running
        // demo behaves like a real service would.
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&opts.path)
            .await
            .with_context(|| format!("cannot open {}", opts.path.display()))?;
        file.write_all(format!("{line}\n").as_bytes())
            .await
            .with_context(|| format!("cannot write {}", opts.path.display()))?;

        written += 1;
        tracing::debug!(written, line = %line, "demo: line appended");

        if opts.count != Some(written) {
            tokio::time::sleep(delay).await;
        }
    }
    Ok(written)
}
