//! Page content for each route, as document blocks.

pub mod contact;
pub mod home;
pub mod project_detail;
pub mod projects;
