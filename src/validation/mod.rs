//! Validation functions for prices and fund holdings

pub mod price;
pub mod holdings;

pub use price::*;
pub use holdings::*;
