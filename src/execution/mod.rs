//! Trade execution engine and its shared, lock-guarded handle

pub mod engine;
pub mod shared;

pub use engine::*;
pub use shared::*;
