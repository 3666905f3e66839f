pub mod buffer;
pub mod symmetric;

pub use buffer::*;
pub use symmetric::*;
