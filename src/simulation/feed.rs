//! Random-walk price feed
//!
//! Equities take a bounded random step each tick. Fund prices track their
//! freshly computed NAV with a premium that decays toward zero, plus the
//! occasional dislocation that opens an arbitrage window.

use rand::Rng;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use tracing::debug;
use crate::execution::ArbitrageEngine;

const MIN_SIMULATED_PRICE: Decimal = dec!(0.01);

#[derive(Debug, Clone)]
pub struct RandomWalkFeed {
    /// Maximum relative equity move per tick.
    pub volatility: Decimal,
    /// Share of a fund's premium that decays each tick.
    pub premium_reversion: Decimal,
    /// Probability that a fund's premium is shocked on a given tick.
    pub dislocation_probability: f64,
    /// Maximum size of a premium shock.
    pub max_dislocation: Decimal,
}

impl RandomWalkFeed {
    pub fn new(volatility: Decimal) -> Self {
        Self {
            volatility,
            premium_reversion: dec!(0.35),
            dislocation_probability: 0.08,
            max_dislocation: dec!(0.03),
        }
    }

    fn uniform<R: Rng>(rng: &mut R) -> Decimal {
        Decimal::from_f64(rng.random_range(-1.0..=1.0)).unwrap_or_default()
    }

    /// Produce the next snapshot of equity and fund prices, equities first.
    pub fn next_tick<R: Rng>(&self, rng: &mut R, engine: &ArbitrageEngine) -> Vec<(String, Decimal)> {
        let registry = engine.registry();
        let mut next_equities = engine.registry().clone();
        let mut updates = Vec::new();

        let mut symbols: Vec<&String> = engine.funds().flat_map(|f| f.holdings().keys()).collect();
        symbols.sort();
        symbols.dedup();

        for symbol in symbols {
            let Some(price) = registry.price(symbol) else { continue };
            let step = Decimal::ONE + self.volatility * Self::uniform(rng);
            let next = (price * step).round_dp(4).max(MIN_SIMULATED_PRICE);
            if next_equities.update_price(symbol, next).is_ok() {
                updates.push((symbol.clone(), next));
            }
        }

        for fund in engine.funds() {
            let Ok(nav) = fund.compute_nav(&next_equities) else { continue };
            if nav <= Decimal::ZERO {
                continue;
            }

            let premium = match fund.quote(registry) {
                Ok(quote) => quote.spread,
                Err(_) => Decimal::ZERO,
            };
            let mut next_premium = premium * (Decimal::ONE - self.premium_reversion)
                + self.volatility * dec!(0.1) * Self::uniform(rng);
            if rng.random_bool(self.dislocation_probability) {
                next_premium += self.max_dislocation * Self::uniform(rng);
                debug!(fund = %fund.ticker(), premium = %next_premium, "Simulated dislocation");
            }

            let next = (nav * (Decimal::ONE + next_premium)).round_dp(4).max(MIN_SIMULATED_PRICE);
            updates.push((fund.ticker().to_string(), next));
        }

        updates
    }
}
