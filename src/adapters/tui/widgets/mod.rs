pub mod text_input;

pub use text_input::*;
