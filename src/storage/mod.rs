//! Data persistence and file operations

pub mod trades;
pub mod iterations;

pub use trades::*;
pub use iterations::*;
