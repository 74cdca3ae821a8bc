//! Read-only snapshots handed to callers

use rust_decimal::Decimal;
use serde::Serialize;

/// Outcome of one strategy pass.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct IterationStats {
    pub opportunities_found: usize,
    pub trades_opened: usize,
    pub trades_closed: usize,
    pub realized_pnl: Decimal,
    /// Open trades whose fund could not be priced this pass.
    pub stale_trades: Vec<String>,
    /// Opportunities passed over because execution was rejected.
    pub skipped: usize,
    pub capital_before: Decimal,
    pub capital_after: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceMetrics {
    pub total_value: Decimal,
    pub available_capital: Decimal,
    pub committed_notional: Decimal,
    pub realized_pnl: Decimal,
    pub unrealized_pnl: Decimal,
    /// Fraction of initial capital, e.g. 0.012 for +1.2%.
    pub total_return: Decimal,
    pub open_trades: usize,
    pub closed_trades: usize,
    pub win_rate: Decimal,
    pub capital_utilization: Decimal,
}
