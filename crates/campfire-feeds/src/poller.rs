//! Fixed-cadence poll scheduling.
//!
//! The scheduler owns the [`FileSnapshotter`] while it is idle and moves it
//! into a `spawn_blocking` job for each poll; the job hands it back together
//! with the event. While the snapshotter is away no further job can be
//! started, which makes "at most one outstanding read" a property of
//! ownership rather than of bookkeeping.
//!
//! [`PollScheduler::next_event`] is cancel-safe, so the control task can race
//! it against terminal input in `tokio::select!` without losing a result:
//! the in-flight job handle lives in the scheduler, not in the future.

use crate::file::{FileEvent, FileSnapshotter, SnapshotError};
use std::path::PathBuf;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Interval, MissedTickBehavior};

type PollJob = JoinHandle<(FileSnapshotter, FileEvent)>;

pub struct PollScheduler {
    path: PathBuf,
    interval: Interval,
    idle: Option<FileSnapshotter>,
    in_flight: Option<PollJob>,
}

impl PollScheduler {
    /// Create a scheduler ticking every `period`. The first tick fires
    /// immediately so the initial snapshot is not delayed.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(snapshotter: FileSnapshotter, period: Duration) -> Self {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            path: snapshotter.path().to_path_buf(),
            interval,
            idle: Some(snapshotter),
            in_flight: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.interval.period()
    }

    /// Whether a read is currently running on the blocking pool.
    pub fn is_polling(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Wait for the next poll result.
    ///
    /// Finishes the outstanding job if there is one; otherwise waits for the
    /// next tick and dispatches a fresh job. The caller applies the returned
    /// event before calling again, so a new read never overlaps an
    /// unapplied result.
    pub async fn next_event(&mut self) -> FileEvent {
        loop {
            if let Some(job) = self.in_flight.as_mut() {
                let joined = job.await;
                self.in_flight = None;
                return match joined {
                    Ok((snapshotter, event)) => {
                        self.idle = Some(snapshotter);
                        event
                    }
                    Err(err) => {
                        // The snapshotter went down with the job; start over
                        // from `Absent` on the next tick.
                        tracing::error!(error = %err, "poll worker failed");
                        self.idle = Some(FileSnapshotter::new(self.path.clone()));
                        FileEvent::Error(SnapshotError::Worker(err))
                    }
                };
            }

            self.interval.tick().await;
            self.dispatch();
        }
    }

    fn dispatch(&mut self) {
        let Some(mut snapshotter) = self.idle.take() else {
            return;
        };
        tracing::trace!(path = %self.path.display(), "poll dispatched");
        self.in_flight = Some(tokio::task::spawn_blocking(move || {
            let event = snapshotter.poll();
            (snapshotter, event)
        }));
    }
}

impl std::fmt::Debug for PollScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollScheduler")
            .field("path", &self.path)
            .field("period", &self.interval.period())
            .field("polling", &self.is_polling())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
