//! Synthetic price feed for driving the engine without live data

pub mod feed;

pub use feed::*;
