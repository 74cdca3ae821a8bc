//! Automated trading strategies driven by the execution engine

pub mod automated;

pub use automated::*;
