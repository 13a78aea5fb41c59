pub mod error;
pub mod motion;
pub mod pages;
pub mod site_service;

pub use error::*;
pub use site_service::*;
