//! User interface layer
//!
//! The dashboard TUI and its screens.

pub mod actions;
pub mod app;
pub mod dashboard_tui;
pub mod detail_screen;
pub mod help_screen;
pub mod logs_screen;
pub mod overview_screen;
pub mod profile_screen;
pub mod table_screen;
