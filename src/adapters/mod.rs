pub mod api;
pub mod config;
pub mod memory;
pub mod tui;
pub mod viewport;
