//! campfire-core: the pure half of the campfire pipeline.
//!
//! Everything in this crate is synchronous and free of I/O apart from
//! [`config::Config::load`]. The feeds crate produces raw file content; this
//! crate turns it into classified records and decides which of them are
//! visible.
//!
//! # Pipeline
//!
//! ```text
//! bytes ──► parse ──► [LogRecord] ──► filter::apply(FilterState) ──► visible records
//!              │
//!              └──► classify (per line)
//! ```

pub mod classify;
pub mod config;
pub mod filter;
pub mod parse;
pub mod types;

pub use classify::classify;
pub use filter::{FilterState, SeverityCounts};
pub use parse::parse;
pub use types::{LogRecord, Severity};
