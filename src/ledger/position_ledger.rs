//! Position ledger: capital, committed notional, open and closed trades
//!
//! Conservation holds at every observable state:
//! `available + committed + Σ open entry costs == initial + realized`.
//! Every mutating method either applies all of its effects or none.

use rust_decimal::Decimal;
use tracing::{debug, info};
use crate::{
    errors::{ArbError, ArbResult},
    types::{Trade, TradeExit, TradeStatus},
};

#[derive(Debug, Clone)]
pub struct PositionLedger {
    initial_capital: Decimal,
    available_capital: Decimal,
    committed_notional: Decimal,
    open_trades: Vec<Trade>,
    closed_trades: Vec<Trade>,
    realized_pnl: Decimal,
}

impl PositionLedger {
    pub fn new(initial_capital: Decimal) -> Self {
        Self {
            initial_capital,
            available_capital: initial_capital,
            committed_notional: Decimal::ZERO,
            open_trades: Vec::new(),
            closed_trades: Vec::new(),
            realized_pnl: Decimal::ZERO,
        }
    }

    pub fn initial_capital(&self) -> Decimal {
        self.initial_capital
    }

    pub fn available_capital(&self) -> Decimal {
        self.available_capital
    }

    pub fn committed_notional(&self) -> Decimal {
        self.committed_notional
    }

    pub fn realized_pnl(&self) -> Decimal {
        self.realized_pnl
    }

    pub fn open_trades(&self) -> &[Trade] {
        &self.open_trades
    }

    pub fn closed_trades(&self) -> &[Trade] {
        &self.closed_trades
    }

    pub fn has_open_trade(&self, fund: &str) -> bool {
        self.open_trades.iter().any(|t| t.fund == fund)
    }

    pub fn open_trade(&self, trade_id: &str) -> Option<&Trade> {
        self.open_trades.iter().find(|t| t.id == trade_id)
    }

    pub fn closed_trade(&self, trade_id: &str) -> Option<&Trade> {
        self.closed_trades.iter().find(|t| t.id == trade_id)
    }

    /// Fails unless `notional` plus its entry cost fits in available capital.
    pub fn ensure_capacity(&self, notional: Decimal, entry_cost: Decimal) -> ArbResult<()> {
        let required = notional + entry_cost;
        if notional > self.available_capital || required > self.available_capital {
            return Err(ArbError::InsufficientCapital {
                required,
                available: self.available_capital,
            });
        }
        Ok(())
    }

    /// Move `trade.notional` into committed notional and charge the entry cost.
    pub fn commit(&mut self, trade: Trade) -> ArbResult<()> {
        if trade.notional <= Decimal::ZERO {
            return Err(ArbError::InvalidNotional { notional: trade.notional });
        }
        self.ensure_capacity(trade.notional, trade.entry_cost)?;

        self.available_capital -= trade.notional + trade.entry_cost;
        self.committed_notional += trade.notional;

        info!(
            trade_id = %trade.id,
            fund = %trade.fund,
            notional = %trade.notional,
            entry_cost = %trade.entry_cost,
            available = %self.available_capital,
            "Trade committed"
        );

        self.open_trades.push(trade);
        debug_assert!(self.conservation_residual().is_zero());
        Ok(())
    }

    /// Release the trade's notional, book `exit`, and move it to history.
    /// Realized PnL is recomputed here as gross minus entry and exit costs.
    pub fn settle(&mut self, trade_id: &str, mut exit: TradeExit) -> ArbResult<Trade> {
        let index = match self.open_trades.iter().position(|t| t.id == trade_id) {
            Some(index) => index,
            None if self.closed_trade(trade_id).is_some() => {
                return Err(ArbError::AlreadyClosed { trade_id: trade_id.to_string() });
            }
            None => return Err(ArbError::UnknownTrade { trade_id: trade_id.to_string() }),
        };

        let mut trade = self.open_trades.remove(index);
        exit.realized_pnl = exit.gross_pnl - exit.cost - trade.entry_cost;

        self.committed_notional -= trade.notional;
        self.available_capital += trade.notional + exit.gross_pnl - exit.cost;
        self.realized_pnl += exit.realized_pnl;

        info!(
            trade_id = %trade.id,
            fund = %trade.fund,
            realized_pnl = %exit.realized_pnl,
            available = %self.available_capital,
            "Trade settled"
        );

        trade.status = TradeStatus::Closed;
        trade.exit = Some(exit);
        self.closed_trades.push(trade.clone());

        debug_assert!(self.conservation_residual().is_zero());
        Ok(trade)
    }

    /// Share of closed trades with positive realized PnL; zero with no history.
    pub fn win_rate(&self) -> Decimal {
        if self.closed_trades.is_empty() {
            return Decimal::ZERO;
        }
        let wins = self
            .closed_trades
            .iter()
            .filter(|t| t.realized_pnl().is_some_and(|p| p > Decimal::ZERO))
            .count();
        Decimal::from(wins) / Decimal::from(self.closed_trades.len())
    }

    /// Deviation from the conservation identity. Zero in every reachable state.
    pub fn conservation_residual(&self) -> Decimal {
        let open_entry_costs: Decimal = self.open_trades.iter().map(|t| t.entry_cost).sum();
        let residual = self.available_capital + self.committed_notional + open_entry_costs
            - self.initial_capital
            - self.realized_pnl;
        if !residual.is_zero() {
            debug!(residual = %residual, "Ledger conservation residual");
        }
        residual
    }
}
