//! Display and printing utilities

use rust_decimal_macros::dec;
use tracing::{info, warn};
use crate::types::{ArbitrageOpportunity, IterationStats, PerformanceMetrics, Trade};

pub fn print_status(metrics: &PerformanceMetrics) {
    info!("{}", "=".repeat(70));
    info!("ETF ARBITRAGE ENGINE STATUS");
    info!("{}", "=".repeat(70));
    info!("Total Value:        ${:.2}", metrics.total_value);
    info!("Available Capital:  ${:.2}", metrics.available_capital);
    info!("Committed Notional: ${:.2}", metrics.committed_notional);
    info!("Realized PnL:       ${:.2}", metrics.realized_pnl);
    info!("Unrealized PnL:     ${:.2}", metrics.unrealized_pnl);
    info!("Total Return:       {:.3}%", metrics.total_return * dec!(100));
    info!("Open Trades:        {}", metrics.open_trades);
    info!("Closed Trades:      {}", metrics.closed_trades);
    info!("Win Rate:           {:.1}%", metrics.win_rate * dec!(100));
    info!("Capital Util:       {:.2}%", metrics.capital_utilization * dec!(100));
    info!("{}", "=".repeat(70));
}

pub fn print_opportunity(opportunity: &ArbitrageOpportunity) {
    info!(
        "🎯 {} | {} | NAV: ${:.4} | Market: ${:.4} | Spread: {:.1} bps",
        opportunity.fund,
        opportunity.direction,
        opportunity.nav,
        opportunity.market_price,
        opportunity.spread_bps()
    );
}

pub fn print_closed_trade(trade: &Trade) {
    let Some(exit) = &trade.exit else { return };
    let line = format!(
        "{} {} | entry spread {:.2}% -> exit {:.2}% | notional ${:.2} | realized ${:.2}",
        trade.fund,
        trade.direction,
        trade.entry_spread * dec!(100),
        exit.spread * dec!(100),
        trade.notional,
        exit.realized_pnl
    );
    if exit.realized_pnl < rust_decimal::Decimal::ZERO {
        warn!("📉 {}", line);
    } else {
        info!("💰 {}", line);
    }
}

pub fn print_iteration(iteration: u64, stats: &IterationStats) {
    info!(
        "🔁 Iteration {} | found {} | opened {} | closed {} | skipped {} | realized ${:.2} | capital ${:.2} -> ${:.2}",
        iteration,
        stats.opportunities_found,
        stats.trades_opened,
        stats.trades_closed,
        stats.skipped,
        stats.realized_pnl,
        stats.capital_before,
        stats.capital_after
    );
    if !stats.stale_trades.is_empty() {
        warn!("⚠️  {} open trade(s) could not be priced this iteration", stats.stale_trades.len());
    }
}
