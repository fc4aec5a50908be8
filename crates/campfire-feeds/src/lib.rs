//! campfire-feeds — the file side of campfire.
//!
//! [`file::FileSnapshotter`] turns one stat + full read of the watched path
//! into a [`file::FileEvent`]. [`poller::PollScheduler`] drives it at a fixed
//! cadence on tokio's blocking pool, with at most one read outstanding, and
//! hands each event back to the single control task.

pub mod file;
pub mod poller;

pub use file::{FileEvent, FileMeta, FileSnapshotter, FileState, SnapshotError};
pub use poller::PollScheduler;
