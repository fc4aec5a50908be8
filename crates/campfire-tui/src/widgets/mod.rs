//! Ratatui widgets for the campfire TUI.

pub mod filter_bar;
pub mod header;
pub mod help;
pub mod log_view;
