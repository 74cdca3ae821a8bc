//! Greedy scan / execute / auto-close loop
//!
//! Each iteration is myopic: it looks only at the current snapshot and
//! never plans across iterations.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, info};
use crate::{
    config::StrategyConfig,
    errors::{classify_error, log_recovery, BatchStage},
    execution::ArbitrageEngine,
    types::IterationStats,
};

pub struct AutomatedStrategy {
    config: StrategyConfig,
}

impl AutomatedStrategy {
    pub fn new(config: StrategyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    /// Largest notional whose two-leg entry cost still fits in `available`.
    fn position_size(&self, engine: &ArbitrageEngine) -> Decimal {
        let available = engine.ledger().available_capital();
        let cost_factor = Decimal::ONE + engine.config().two_leg_cost(Decimal::ONE);
        let affordable = (available / cost_factor)
            .round_dp_with_strategy(2, RoundingStrategy::ToZero)
            .max(Decimal::ZERO);
        self.config.max_position_size.min(affordable)
    }

    pub fn run_iteration(&self, engine: &mut ArbitrageEngine) -> IterationStats {
        let mut stats = IterationStats {
            capital_before: engine.ledger().available_capital(),
            ..IterationStats::default()
        };

        // Close trades whose spread has decayed far enough
        let mut to_close = Vec::new();
        for trade in engine.ledger().open_trades() {
            match engine.quote_fund(&trade.fund) {
                Ok(quote) => {
                    let limit = self.config.auto_close_threshold * trade.entry_spread.abs();
                    if quote.spread.abs() <= limit {
                        to_close.push(trade.id.clone());
                    }
                }
                Err(e) => {
                    let action = classify_error(&e, BatchStage::Close);
                    log_recovery(action, &trade.id, &e, "Open trade cannot be evaluated");
                    stats.stale_trades.push(trade.id.clone());
                }
            }
        }

        for trade_id in to_close {
            match engine.close_trade(&trade_id) {
                Ok(trade) => {
                    stats.trades_closed += 1;
                    stats.realized_pnl += trade.realized_pnl().unwrap_or_default();
                }
                Err(e) => {
                    let action = classify_error(&e, BatchStage::Close);
                    log_recovery(action, &trade_id, &e, "Auto-close failed");
                    stats.stale_trades.push(trade_id);
                }
            }
        }

        // Open new positions in rank order
        let opportunities = engine.scan_opportunities();
        stats.opportunities_found = opportunities.len();

        for opportunity in &opportunities {
            if self
                .config
                .max_trades_per_iteration
                .is_some_and(|limit| stats.trades_opened >= limit)
            {
                debug!(limit = ?self.config.max_trades_per_iteration, "Per-iteration trade cap reached");
                break;
            }

            let notional = self.position_size(engine);
            match engine.execute_arbitrage(opportunity, notional) {
                Ok(_) => stats.trades_opened += 1,
                Err(e) => {
                    stats.skipped += 1;
                    let action = classify_error(&e, BatchStage::Execute);
                    log_recovery(action, &opportunity.fund, &e, "Opportunity skipped");
                }
            }
        }

        stats.capital_after = engine.ledger().available_capital();

        info!(
            opportunities = stats.opportunities_found,
            opened = stats.trades_opened,
            closed = stats.trades_closed,
            stale = stats.stale_trades.len(),
            realized_pnl = %stats.realized_pnl,
            capital = %stats.capital_after,
            "Strategy iteration complete"
        );

        stats
    }
}
