//! Simulator configuration settings and environment variable handling

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use std::env;
use std::str::FromStr;
use crate::errors::ArbResult;
use super::{EngineConfig, PositionPolicy, StrategyConfig, WeightConvention};

// Engine constants
pub const DEFAULT_INITIAL_CAPITAL: Decimal = dec!(1_000_000);
pub const DEFAULT_TRANSACTION_COST_PCT: Decimal = dec!(0.001); // 10 bps per leg
pub const MAX_TRANSACTION_COST_PCT: Decimal = dec!(0.05);
pub const DEFAULT_MIN_SPREAD_THRESHOLD: Decimal = dec!(0.002); // 20 bps
pub const DEFAULT_WEIGHT_TOLERANCE: Decimal = dec!(0.0001);

// Strategy constants
pub const DEFAULT_MAX_POSITION_SIZE: Decimal = dec!(50_000);
pub const DEFAULT_AUTO_CLOSE_THRESHOLD: Decimal = dec!(0.5);
pub const MAX_AUTO_CLOSE_THRESHOLD: Decimal = dec!(0.99);

// Simulation constants
pub const DEFAULT_ITERATION_INTERVAL_MS: u64 = 1_000;
pub const MIN_ITERATION_INTERVAL_MS: u64 = 50;
pub const DEFAULT_SIMULATION_ITERATIONS: u64 = 120;
pub const DEFAULT_PRICE_VOLATILITY: Decimal = dec!(0.004); // per-tick relative move
pub const MAX_PRICE_VOLATILITY: Decimal = dec!(0.10);

#[derive(Debug, Clone)]
pub struct Config {
    pub initial_capital: Decimal,
    pub transaction_cost_pct: Decimal,
    pub min_spread_threshold: Decimal,
    pub allow_multiple_positions: bool,
    pub enforce_fractional_weights: bool,
    // Strategy Configuration
    pub max_position_size: Decimal,
    pub auto_close_threshold: Decimal,
    pub max_trades_per_iteration: Option<usize>,
    // Simulation Configuration
    pub iteration_interval_ms: u64,
    pub simulation_iterations: u64,
    pub price_volatility: Decimal,
    pub persist_results: bool,
}

fn env_decimal(key: &str) -> Option<Decimal> {
    env::var(key).ok().and_then(|s| Decimal::from_str(s.trim()).ok())
}

fn env_flag(key: &str, default: bool) -> bool {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn load() -> Self {
        Self {
            initial_capital: env_decimal("INITIAL_CAPITAL")
                .filter(|c| *c > Decimal::ZERO)
                .unwrap_or(DEFAULT_INITIAL_CAPITAL),
            transaction_cost_pct: env_decimal("TRANSACTION_COST_PCT")
                .unwrap_or(DEFAULT_TRANSACTION_COST_PCT)
                .max(Decimal::ZERO)
                .min(MAX_TRANSACTION_COST_PCT),
            min_spread_threshold: env_decimal("MIN_SPREAD_THRESHOLD")
                .unwrap_or(DEFAULT_MIN_SPREAD_THRESHOLD)
                .max(Decimal::ZERO),
            allow_multiple_positions: env_flag("ALLOW_MULTIPLE_POSITIONS", false),
            enforce_fractional_weights: env_flag("ENFORCE_FRACTIONAL_WEIGHTS", false),
            max_position_size: env_decimal("MAX_POSITION_SIZE")
                .filter(|s| *s > Decimal::ZERO)
                .unwrap_or(DEFAULT_MAX_POSITION_SIZE),
            auto_close_threshold: env_decimal("AUTO_CLOSE_THRESHOLD")
                .unwrap_or(DEFAULT_AUTO_CLOSE_THRESHOLD)
                .max(Decimal::ZERO)
                .min(MAX_AUTO_CLOSE_THRESHOLD),
            max_trades_per_iteration: env::var("MAX_TRADES_PER_ITERATION")
                .ok()
                .and_then(|s| s.trim().parse::<usize>().ok())
                .filter(|n| *n > 0),
            iteration_interval_ms: env::var("ITERATION_INTERVAL_MS")
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(DEFAULT_ITERATION_INTERVAL_MS)
                .max(MIN_ITERATION_INTERVAL_MS),
            simulation_iterations: env::var("SIMULATION_ITERATIONS")
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(DEFAULT_SIMULATION_ITERATIONS),
            price_volatility: env_decimal("PRICE_VOLATILITY")
                .unwrap_or(DEFAULT_PRICE_VOLATILITY)
                .max(Decimal::ZERO)
                .min(MAX_PRICE_VOLATILITY),
            persist_results: env_flag("PERSIST_RESULTS", true),
        }
    }

    pub fn engine_config(&self) -> ArbResult<EngineConfig> {
        let position_policy = if self.allow_multiple_positions {
            PositionPolicy::AllowMultiple
        } else {
            PositionPolicy::OnePerFund
        };
        let weight_convention = if self.enforce_fractional_weights {
            WeightConvention::Fractional { tolerance: DEFAULT_WEIGHT_TOLERANCE }
        } else {
            WeightConvention::Unconstrained
        };

        EngineConfig::new(self.initial_capital, self.transaction_cost_pct, self.min_spread_threshold)
            .map(|c| c.with_position_policy(position_policy).with_weight_convention(weight_convention))
    }

    pub fn strategy_config(&self) -> ArbResult<StrategyConfig> {
        StrategyConfig::new(self.max_position_size, self.auto_close_threshold)
            .map(|c| c.with_max_trades_per_iteration(self.max_trades_per_iteration))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_capital: DEFAULT_INITIAL_CAPITAL,
            transaction_cost_pct: DEFAULT_TRANSACTION_COST_PCT,
            min_spread_threshold: DEFAULT_MIN_SPREAD_THRESHOLD,
            allow_multiple_positions: false,
            enforce_fractional_weights: false,
            max_position_size: DEFAULT_MAX_POSITION_SIZE,
            auto_close_threshold: DEFAULT_AUTO_CLOSE_THRESHOLD,
            max_trades_per_iteration: None,
            iteration_interval_ms: DEFAULT_ITERATION_INTERVAL_MS,
            simulation_iterations: DEFAULT_SIMULATION_ITERATIONS,
            price_volatility: DEFAULT_PRICE_VOLATILITY,
            persist_results: true,
        }
    }
}
