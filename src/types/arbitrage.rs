//! Arbitrage opportunity types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    /// Fund trades rich to NAV: sell the fund, buy the basket.
    ShortEtfLongBasket,
    /// Fund trades cheap to NAV: buy the fund, sell the basket.
    LongEtfShortBasket,
}

impl Direction {
    pub fn from_spread(spread: Decimal) -> Self {
        if spread > Decimal::ZERO {
            Direction::ShortEtfLongBasket
        } else {
            Direction::LongEtfShortBasket
        }
    }

    /// Gross PnL of a paired position of size `notional` whose spread moved
    /// from `entry_spread` to `exit_spread`. Positive when the spread
    /// converged in the position's favour.
    pub fn spread_pnl(&self, notional: Decimal, entry_spread: Decimal, exit_spread: Decimal) -> Decimal {
        match self {
            Direction::ShortEtfLongBasket => notional * (entry_spread - exit_spread),
            Direction::LongEtfShortBasket => notional * (exit_spread - entry_spread),
        }
    }

    /// +1 when the fund leg is held long, -1 when short.
    pub fn fund_leg_sign(&self) -> Decimal {
        match self {
            Direction::ShortEtfLongBasket => Decimal::NEGATIVE_ONE,
            Direction::LongEtfShortBasket => Decimal::ONE,
        }
    }

    pub fn basket_leg_sign(&self) -> Decimal {
        -self.fund_leg_sign()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::ShortEtfLongBasket => write!(f, "SHORT_ETF_LONG_BASKET"),
            Direction::LongEtfShortBasket => write!(f, "LONG_ETF_SHORT_BASKET"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArbitrageOpportunity {
    pub fund: String,
    pub nav: Decimal,
    pub market_price: Decimal,
    /// `(market_price - nav) / nav`
    pub spread: Decimal,
    pub direction: Direction,
    /// Ranking score, `|spread|`.
    pub score: Decimal,
    pub detected_at: DateTime<Utc>,
}

impl ArbitrageOpportunity {
    pub fn spread_bps(&self) -> Decimal {
        self.spread * Decimal::from(10_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_direction_from_spread() {
        assert_eq!(Direction::from_spread(dec!(0.01)), Direction::ShortEtfLongBasket);
        assert_eq!(Direction::from_spread(dec!(-0.01)), Direction::LongEtfShortBasket);
        assert_eq!(Direction::from_spread(dec!(0)), Direction::LongEtfShortBasket);
    }

    #[test]
    fn test_spread_pnl_is_positive_on_convergence() {
        let short = Direction::ShortEtfLongBasket;
        assert_eq!(short.spread_pnl(dec!(10_000), dec!(0.10), dec!(0)), dec!(1000));
        assert_eq!(short.spread_pnl(dec!(10_000), dec!(0.10), dec!(0.10)), dec!(0));
        assert_eq!(short.spread_pnl(dec!(10_000), dec!(0.10), dec!(0.15)), dec!(-500));

        let long = Direction::LongEtfShortBasket;
        assert_eq!(long.spread_pnl(dec!(100_000), dec!(-0.10), dec!(0)), dec!(10_000));
        assert_eq!(long.spread_pnl(dec!(100_000), dec!(-0.10), dec!(-0.12)), dec!(-2000));
    }

    #[test]
    fn test_leg_signs_are_opposite() {
        for d in [Direction::ShortEtfLongBasket, Direction::LongEtfShortBasket] {
            assert_eq!(d.fund_leg_sign() + d.basket_leg_sign(), dec!(0));
        }
        assert_eq!(Direction::ShortEtfLongBasket.to_string(), "SHORT_ETF_LONG_BASKET");
    }
}
