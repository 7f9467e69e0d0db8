//! Ratatui widgets for the appfind TUI.

pub mod command_bar;
pub mod detail;
pub mod help;
pub mod query_bar;
pub mod results_list;
pub mod status_bar;
