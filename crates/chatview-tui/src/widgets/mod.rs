//! Ratatui widgets for the chatview TUI.

pub mod command_bar;
pub mod header_bar;
pub mod help;
pub mod session_list;
pub mod status_line;
pub mod thread_view;
