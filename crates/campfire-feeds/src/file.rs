//! Polling file snapshotter.
//!
//! Each [`FileSnapshotter::poll`] is independent: stat the path, and if it is
//! there, open it, read it completely and close it again. No handle outlives
//! a poll, so truncation, rotation or deletion between polls can never leave
//! a stale reader behind.
//!
//! # State machine
//!
//! | Observation                  | Event    | New state      |
//! |------------------------------|----------|----------------|
//! | stat: not found              | `Gone`   | `Absent`       |
//! | stat: other error            | `Error`  | unchanged      |
//! | stat ok, read ok             | `Exists` | `Present`      |
//! | stat ok, read failed         | `Error`  | unchanged      |

use chrono::{DateTime, Local};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Stat metadata surfaced to the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMeta {
    pub size: u64,
    /// `None` on platforms or filesystems that do not report it.
    pub modified: Option<DateTime<Local>>,
}

impl FileMeta {
    fn from_metadata(md: &std::fs::Metadata) -> Self {
        Self {
            size: md.len(),
            modified: md.modified().ok().map(DateTime::<Local>::from),
        }
    }
}

/// Last known state of the watched path. Only the snapshotter writes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FileState {
    /// Not found on the last poll, or never polled.
    #[default]
    Absent,
    Present { meta: FileMeta, content: Arc<[u8]> },
}

impl FileState {
    pub fn exists(&self) -> bool {
        matches!(self, FileState::Present { .. })
    }
}

/// Result of one poll.
#[derive(Debug)]
pub enum FileEvent {
    /// The file was read in full.
    Exists {
        meta: FileMeta,
        content: Arc<[u8]>,
        /// `false` when the bytes equal the previous successful read.
        changed: bool,
    },
    /// The path does not exist.
    Gone,
    /// Stat or read failed for a reason other than absence. The next poll
    /// is the retry.
    Error(SnapshotError),
}

/// A failed poll. Transient by assumption; never fatal.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("cannot stat {}: {source}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is a directory", path.display())]
    IsDirectory { path: PathBuf },

    #[error("poll worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

// ---------------------------------------------------------------------------
// Snapshotter
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct FileSnapshotter {
    path: PathBuf,
    state: FileState,
}

impl FileSnapshotter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: FileState::Absent,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> &FileState {
        &self.state
    }

    /// Stat and fully read the file once. Blocking; run it off the control
    /// task.
    pub fn poll(&mut self) -> FileEvent {
        let md = match std::fs::metadata(&self.path) {
            Ok(md) => md,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                if self.state.exists() {
                    tracing::debug!(path = %self.path.display(), "snapshot: file gone");
                }
                self.state = FileState::Absent;
                return FileEvent::Gone;
            }
            Err(source) => {
                return self.fail(SnapshotError::Stat {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if md.is_dir() {
            return self.fail(SnapshotError::IsDirectory {
                path: self.path.clone(),
            });
        }

        // `fs::read` opens, reads to EOF and closes before returning.
        let content: Arc<[u8]> = match std::fs::read(&self.path) {
            Ok(bytes) => bytes.into(),
            Err(source) => {
                return self.fail(SnapshotError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let meta = FileMeta::from_metadata(&md);
        let changed = match &self.state {
            FileState::Present { content: prev, .. } => *prev != content,
            FileState::Absent => true,
        };
        if changed {
            tracing::debug!(
                path = %self.path.display(),
                bytes = content.len(),
                "snapshot: content changed"
            );
        }

        self.state = FileState::Present {
            meta,
            content: Arc::clone(&content),
        };
        FileEvent::Exists {
            meta,
            content,
            changed,
        }
    }

    fn fail(&self, err: SnapshotError) -> FileEvent {
        tracing::warn!(error = %err, "snapshot failed; keeping last state");
        FileEvent::Error(err)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
