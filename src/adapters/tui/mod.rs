pub mod app;
pub mod chrome;
pub mod document;
pub mod event;
pub mod pages;
pub mod widgets;

pub use app::*;
