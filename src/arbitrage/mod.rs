//! Arbitrage opportunity detection and ranking

pub mod detector;

pub use detector::*;
