pub mod symplectic;

pub use symplectic::*;
