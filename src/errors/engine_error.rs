//! Custom error types for the arbitrage engine

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArbError {
    #[error("Incomplete market data for {fund}: missing prices for {}", .missing.join(", "))]
    IncompleteMarketData {
        fund: String,
        missing: Vec<String>,
    },

    #[error("Invalid NAV for {fund}: {nav} (must be positive)")]
    InvalidNav {
        fund: String,
        nav: Decimal,
    },

    #[error("Invalid notional: {notional} (must be positive)")]
    InvalidNotional {
        notional: Decimal,
    },

    #[error("Insufficient capital: required ${required}, available ${available}")]
    InsufficientCapital {
        required: Decimal,
        available: Decimal,
    },

    #[error("Duplicate position: {fund} already has an open trade")]
    DuplicatePosition {
        fund: String,
    },

    #[error("Spread for {fund} is {spread}, below threshold {threshold}")]
    SpreadBelowThreshold {
        fund: String,
        spread: Decimal,
        threshold: Decimal,
    },

    #[error("Trade {trade_id} is already closed")]
    AlreadyClosed {
        trade_id: String,
    },

    #[error("Unknown fund: {fund}")]
    UnknownFund {
        fund: String,
    },

    #[error("Unknown trade: {trade_id}")]
    UnknownTrade {
        trade_id: String,
    },

    #[error("Fund {fund} is already registered")]
    DuplicateFund {
        fund: String,
    },

    #[error("Invalid price for {symbol}: {price} (must be positive)")]
    InvalidPrice {
        symbol: String,
        price: Decimal,
    },

    #[error("Invalid holdings for {fund}: {reason}")]
    InvalidHoldings {
        fund: String,
        reason: String,
    },

    #[error("Invalid configuration: {field} - {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },
}

impl ArbError {
    /// True for failures caused by the current price snapshot rather than by the caller.
    pub fn is_market_data(&self) -> bool {
        matches!(self, ArbError::IncompleteMarketData { .. } | ArbError::InvalidNav { .. })
    }
}

pub type ArbResult<T> = Result<T, ArbError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_incomplete_market_data_names_every_symbol() {
        let err = ArbError::IncompleteMarketData {
            fund: "SPY".to_string(),
            missing: vec!["AAPL".to_string(), "MSFT".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Incomplete market data for SPY: missing prices for AAPL, MSFT"
        );
    }

    #[test]
    fn test_market_data_classification() {
        assert!(ArbError::InvalidNav { fund: "X".into(), nav: dec!(0) }.is_market_data());
        assert!(!ArbError::InvalidNotional { notional: dec!(-1) }.is_market_data());
        assert!(!ArbError::AlreadyClosed { trade_id: "t".into() }.is_market_data());
    }
}
