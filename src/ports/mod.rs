pub mod config_store;
pub mod record_store;
pub mod viewport;

pub use config_store::*;
pub use record_store::*;
pub use viewport::*;
