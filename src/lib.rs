//! campfire: watch one log file, classify its lines by severity and filter
//! them in the terminal.
//!
//! # Architecture
//!
//! ```text
//! FileSnapshotter ──► PollScheduler ──► ViewSync ──► widgets
//!   (feeds)             (feeds)          (tui)
//!                                          │
//!                              parse / classify / filter (core)
//! ```
//!
//! The file is re-read in full on every poll; there is no incremental
//! tailing. The library crates are re-exported here so the integration
//! tests and benches can reach every layer from one place.

pub mod demo;

pub use campfire_core as core;
pub use campfire_feeds as feeds;
pub use campfire_tui as tui;
