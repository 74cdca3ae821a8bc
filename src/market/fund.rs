//! Fund definition and NAV computation

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use crate::{
    errors::{ArbError, ArbResult},
    validation::validate_price,
};
use super::EquityRegistry;

/// A snapshot of one fund priced against the registry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FundQuote {
    pub nav: Decimal,
    pub market_price: Decimal,
    /// `(market_price - nav) / nav`
    pub spread: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fund {
    ticker: String,
    market_price: Decimal,
    holdings: BTreeMap<String, Decimal>,
}

impl Fund {
    pub fn new<I, S>(ticker: &str, market_price: Decimal, holdings: I) -> ArbResult<Self>
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: Into<String>,
    {
        validate_price(ticker, market_price)?;

        let mut map = BTreeMap::new();
        for (symbol, weight) in holdings {
            let symbol = symbol.into();
            if weight < Decimal::ZERO {
                return Err(ArbError::InvalidHoldings {
                    fund: ticker.to_string(),
                    reason: format!("negative weight {} for {}", weight, symbol),
                });
            }
            if symbol == ticker {
                return Err(ArbError::InvalidHoldings {
                    fund: ticker.to_string(),
                    reason: "fund cannot hold itself".to_string(),
                });
            }
            if map.insert(symbol.clone(), weight).is_some() {
                return Err(ArbError::InvalidHoldings {
                    fund: ticker.to_string(),
                    reason: format!("{} listed more than once", symbol),
                });
            }
        }

        Ok(Self {
            ticker: ticker.to_string(),
            market_price,
            holdings: map,
        })
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn market_price(&self) -> Decimal {
        self.market_price
    }

    pub fn holdings(&self) -> &BTreeMap<String, Decimal> {
        &self.holdings
    }

    pub fn weight_sum(&self) -> Decimal {
        self.holdings.values().copied().sum()
    }

    pub fn set_market_price(&mut self, price: Decimal) -> ArbResult<()> {
        validate_price(&self.ticker, price)?;
        self.market_price = price;
        Ok(())
    }

    /// `Σ weight × price` over every holding. Fails if any constituent is
    /// unpriced; never computes from a partial basket.
    pub fn compute_nav(&self, registry: &EquityRegistry) -> ArbResult<Decimal> {
        let mut nav = Decimal::ZERO;
        let mut missing = Vec::new();

        for (symbol, weight) in &self.holdings {
            match registry.price(symbol) {
                Some(price) => nav += *weight * price,
                None => missing.push(symbol.clone()),
            }
        }

        if !missing.is_empty() {
            return Err(ArbError::IncompleteMarketData {
                fund: self.ticker.clone(),
                missing,
            });
        }

        Ok(nav)
    }

    /// NAV, market price and signed spread. Non-positive NAV is rejected.
    pub fn quote(&self, registry: &EquityRegistry) -> ArbResult<FundQuote> {
        let nav = self.compute_nav(registry)?;
        if nav <= Decimal::ZERO {
            return Err(ArbError::InvalidNav {
                fund: self.ticker.clone(),
                nav,
            });
        }

        Ok(FundQuote {
            nav,
            market_price: self.market_price,
            spread: (self.market_price - nav) / nav,
        })
    }
}
