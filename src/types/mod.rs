//! Core data types and structures

pub mod arbitrage;
pub mod trade;
pub mod reporting;

pub use arbitrage::*;
pub use trade::*;
pub use reporting::*;
