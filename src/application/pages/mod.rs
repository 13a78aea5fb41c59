pub mod contact;
pub mod home;
pub mod project_detail;
pub mod projects;

pub use contact::*;
pub use home::*;
pub use project_detail::*;
pub use projects::*;

/// Outcome of a page's single data fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}
