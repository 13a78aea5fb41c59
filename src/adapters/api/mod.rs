pub mod client;
pub mod dto;
pub mod record_store;

pub use client::*;
pub use dto::*;
pub use record_store::*;
