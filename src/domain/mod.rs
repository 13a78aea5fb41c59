pub mod contact;
pub mod error;
pub mod project;
pub mod record;
pub mod route;
pub mod site;

pub use contact::*;
pub use error::*;
pub use project::*;
pub use record::*;
pub use route::*;
pub use site::*;
