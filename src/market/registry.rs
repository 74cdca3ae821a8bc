//! Last-known equity prices

use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::trace;
use crate::{errors::ArbResult, validation::validate_price};

/// Current price per equity symbol. Last write wins; no history is kept.
#[derive(Debug, Clone, Default)]
pub struct EquityRegistry {
    prices: HashMap<String, Decimal>,
}

impl EquityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_price(&mut self, symbol: &str, price: Decimal) -> ArbResult<()> {
        validate_price(symbol, price)?;
        trace!(symbol = %symbol, price = %price, "Equity price updated");
        self.prices.insert(symbol.to_string(), price);
        Ok(())
    }

    pub fn remove_price(&mut self, symbol: &str) -> Option<Decimal> {
        self.prices.remove(symbol)
    }

    pub fn price(&self, symbol: &str) -> Option<Decimal> {
        self.prices.get(symbol).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ArbError;
    use rust_decimal_macros::dec;

    #[test]
    fn test_last_write_wins() {
        let mut registry = EquityRegistry::new();
        registry.update_price("AAPL", dec!(180)).unwrap();
        registry.update_price("AAPL", dec!(182.5)).unwrap();
        assert_eq!(registry.price("AAPL"), Some(dec!(182.5)));
    }

    #[test]
    fn test_rejects_non_positive_price_and_keeps_previous() {
        let mut registry = EquityRegistry::new();
        registry.update_price("AAPL", dec!(180)).unwrap();
        let err = registry.update_price("AAPL", dec!(0)).unwrap_err();
        assert!(matches!(err, ArbError::InvalidPrice { .. }));
        assert_eq!(registry.price("AAPL"), Some(dec!(180)));
    }

    #[test]
    fn test_removed_price_is_gone() {
        let mut registry = EquityRegistry::new();
        registry.update_price("AAPL", dec!(180)).unwrap();
        assert_eq!(registry.remove_price("AAPL"), Some(dec!(180)));
        assert_eq!(registry.price("AAPL"), None);
        assert_eq!(registry.remove_price("AAPL"), None);
    }

    #[test]
    fn test_unknown_symbol_has_no_price() {
        let registry = EquityRegistry::new();
        assert_eq!(registry.price("MSFT"), None);
    }
}
