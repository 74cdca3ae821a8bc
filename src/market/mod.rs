//! Market state: equity prices and fund definitions

pub mod registry;
pub mod fund;

pub use registry::*;
pub use fund::*;
