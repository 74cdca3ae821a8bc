//! Error handling and recovery mechanisms

pub mod engine_error;
pub mod recovery;

pub use engine_error::*;
pub use recovery::*;
