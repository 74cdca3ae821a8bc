//! Validated engine and strategy parameters
//!
//! Both structs are constructor-validated and have no setters for the core
//! numbers, so a running engine never sees its parameters change.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use crate::errors::{ArbError, ArbResult};

/// How many concurrent trades a single fund may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub enum PositionPolicy {
    #[default]
    OnePerFund,
    AllowMultiple,
}

/// Convention for fund holding weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub enum WeightConvention {
    /// NAV is a plain weighted sum; weights may sum to anything.
    #[default]
    Unconstrained,
    /// Weights are fractions of NAV and must sum to 1 within `tolerance`.
    Fractional { tolerance: Decimal },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineConfig {
    pub initial_capital: Decimal,
    pub transaction_cost_pct: Decimal,
    pub min_spread_threshold: Decimal,
    pub position_policy: PositionPolicy,
    pub weight_convention: WeightConvention,
}

impl EngineConfig {
    pub fn new(
        initial_capital: Decimal,
        transaction_cost_pct: Decimal,
        min_spread_threshold: Decimal,
    ) -> ArbResult<Self> {
        if initial_capital <= Decimal::ZERO {
            return Err(ArbError::InvalidConfig {
                field: "initial_capital",
                reason: format!("must be positive, got {}", initial_capital),
            });
        }
        if transaction_cost_pct < Decimal::ZERO || transaction_cost_pct >= dec!(1) {
            return Err(ArbError::InvalidConfig {
                field: "transaction_cost_pct",
                reason: format!("must be in [0, 1), got {}", transaction_cost_pct),
            });
        }
        if min_spread_threshold < Decimal::ZERO {
            return Err(ArbError::InvalidConfig {
                field: "min_spread_threshold",
                reason: format!("must be non-negative, got {}", min_spread_threshold),
            });
        }

        Ok(Self {
            initial_capital,
            transaction_cost_pct,
            min_spread_threshold,
            position_policy: PositionPolicy::default(),
            weight_convention: WeightConvention::default(),
        })
    }

    pub fn with_position_policy(mut self, policy: PositionPolicy) -> Self {
        self.position_policy = policy;
        self
    }

    pub fn with_weight_convention(mut self, convention: WeightConvention) -> Self {
        self.weight_convention = convention;
        self
    }

    /// Cost of trading `notional` on both legs (fund leg + aggregate basket leg).
    pub fn two_leg_cost(&self, notional: Decimal) -> Decimal {
        notional * self.transaction_cost_pct * dec!(2)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyConfig {
    pub max_position_size: Decimal,
    pub auto_close_threshold: Decimal,
    /// Cap on new trades per iteration; `None` walks the full ranking.
    pub max_trades_per_iteration: Option<usize>,
}

impl StrategyConfig {
    pub fn new(max_position_size: Decimal, auto_close_threshold: Decimal) -> ArbResult<Self> {
        if max_position_size <= Decimal::ZERO {
            return Err(ArbError::InvalidConfig {
                field: "max_position_size",
                reason: format!("must be positive, got {}", max_position_size),
            });
        }
        if auto_close_threshold < Decimal::ZERO || auto_close_threshold >= dec!(1) {
            return Err(ArbError::InvalidConfig {
                field: "auto_close_threshold",
                reason: format!("must be in [0, 1), got {}", auto_close_threshold),
            });
        }

        Ok(Self {
            max_position_size,
            auto_close_threshold,
            max_trades_per_iteration: None,
        })
    }

    pub fn with_max_trades_per_iteration(mut self, limit: Option<usize>) -> Self {
        self.max_trades_per_iteration = limit;
        self
    }
}
