//! Trade lifecycle types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use super::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeStatus {
    Open,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundLeg {
    pub ticker: String,
    pub entry_price: Decimal,
    /// Signed share count: positive long, negative short.
    pub quantity: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasketLeg {
    pub symbol: String,
    pub weight: Decimal,
    pub entry_price: Decimal,
    /// `notional * weight`
    pub notional: Decimal,
    /// Signed share count: positive long, negative short.
    pub quantity: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeExit {
    pub nav: Decimal,
    pub market_price: Decimal,
    pub spread: Decimal,
    pub gross_pnl: Decimal,
    pub cost: Decimal,
    /// Net of entry and exit costs.
    pub realized_pnl: Decimal,
    pub closed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trade {
    pub id: String,
    pub fund: String,
    pub direction: Direction,
    pub entry_nav: Decimal,
    pub entry_market_price: Decimal,
    pub entry_spread: Decimal,
    pub notional: Decimal,
    pub fund_leg: FundLeg,
    pub basket_legs: Vec<BasketLeg>,
    pub entry_cost: Decimal,
    pub expected_profit: Decimal,
    pub opened_at: DateTime<Utc>,
    pub status: TradeStatus,
    pub exit: Option<TradeExit>,
}

impl Trade {
    pub fn is_open(&self) -> bool {
        self.status == TradeStatus::Open
    }

    pub fn realized_pnl(&self) -> Option<Decimal> {
        self.exit.as_ref().map(|e| e.realized_pnl)
    }

    /// Gross PnL if the position were marked at `current_spread` right now.
    pub fn mark_to_market(&self, current_spread: Decimal) -> Decimal {
        self.direction.spread_pnl(self.notional, self.entry_spread, current_spread)
    }
}
