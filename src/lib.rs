//! ETF Arbitrage Engine - fund vs. basket arbitrage simulator
//!
//! Computes each fund's NAV from live constituent prices, ranks funds whose
//! market price diverges from NAV, and runs paired fund/basket positions
//! through a capital-checked ledger until the spread converges.

pub mod config;
pub mod types;
pub mod errors;
pub mod market;
pub mod arbitrage;
pub mod ledger;
pub mod execution;
pub mod strategy;
pub mod simulation;
pub mod validation;
pub mod utils;
pub mod storage;

// Re-export commonly used items
pub use config::{Config, EngineConfig, StrategyConfig, CONFIG};
pub use errors::{ArbError, ArbResult};
pub use execution::{ArbitrageEngine, SharedEngine};
pub use market::{EquityRegistry, Fund};
pub use strategy::AutomatedStrategy;
pub use types::*;
