//! End-to-end lifecycle scenarios against the public API.

use etf_arb_engine::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fund at 450 over a basket worth exactly 500.
fn discounted_fund_engine() -> ArbitrageEngine {
    let config = EngineConfig::new(dec!(1_000_000), dec!(0.001), dec!(0.002)).unwrap();
    let mut engine = ArbitrageEngine::new(config);
    engine
        .add_fund(
            Fund::new(
                "SPY",
                dec!(450),
                [("AAPL", dec!(0.4)), ("MSFT", dec!(0.35)), ("GOOGL", dec!(0.25))],
            )
            .unwrap(),
        )
        .unwrap();
    // 0.4 * 500 + 0.35 * 400 + 0.25 * 640 = 200 + 140 + 160 = 500
    engine
        .update_prices([("AAPL", dec!(500)), ("MSFT", dec!(400)), ("GOOGL", dec!(640))])
        .unwrap();
    engine
}

#[test]
fn discount_converges_to_nav_for_9600_profit() {
    let mut engine = discounted_fund_engine();

    let opportunities = engine.scan_opportunities();
    assert_eq!(opportunities.len(), 1);
    let opportunity = &opportunities[0];
    assert_eq!(opportunity.nav, dec!(500));
    assert_eq!(opportunity.spread, dec!(-0.1));
    assert_eq!(opportunity.direction, Direction::LongEtfShortBasket);

    let trade = engine.execute_arbitrage(opportunity, dec!(100_000)).unwrap();
    assert_eq!(trade.entry_cost, dec!(200));
    assert_eq!(engine.ledger().available_capital(), dec!(899_800));
    assert_eq!(engine.ledger().committed_notional(), dec!(100_000));

    engine.update_price("SPY", dec!(500)).unwrap();
    let closed = engine.close_trade(&trade.id).unwrap();

    let exit = closed.exit.as_ref().unwrap();
    assert_eq!(exit.spread, dec!(0));
    assert_eq!(exit.gross_pnl, dec!(10_000));
    assert_eq!(exit.cost, dec!(200));
    assert_eq!(exit.realized_pnl, dec!(9_600));

    let metrics = engine.performance_metrics();
    assert_eq!(metrics.realized_pnl, dec!(9_600));
    assert_eq!(metrics.available_capital, dec!(1_009_600));
    assert_eq!(metrics.total_value, dec!(1_009_600));
    assert_eq!(metrics.committed_notional, dec!(0));
    assert_eq!(metrics.closed_trades, 1);
    assert_eq!(metrics.win_rate, dec!(1));
}

#[test]
fn round_trip_at_unchanged_prices_costs_only_fees() {
    let mut engine = discounted_fund_engine();
    let opportunity = engine.scan_opportunities().remove(0);

    let trade = engine.execute_arbitrage(&opportunity, dec!(100_000)).unwrap();
    let closed = engine.close_trade(&trade.id).unwrap();

    assert_eq!(closed.realized_pnl(), Some(dec!(-400)));
    assert_eq!(engine.ledger().available_capital(), dec!(999_600));
    assert_eq!(engine.performance_metrics().win_rate, dec!(0));
}

#[test]
fn opportunity_gone_by_execution_time_books_nothing() {
    let mut engine = discounted_fund_engine();
    let opportunity = engine.scan_opportunities().remove(0);

    engine.update_price("SPY", dec!(500)).unwrap();
    assert!(engine.scan_opportunities().is_empty());

    let err = engine.execute_arbitrage(&opportunity, dec!(100_000)).unwrap_err();
    assert!(matches!(err, ArbError::SpreadBelowThreshold { .. }));
    assert_eq!(engine.ledger().available_capital(), dec!(1_000_000));
    assert_eq!(engine.ledger().realized_pnl(), Decimal::ZERO);

    // With the gate opened, the trade enters at the live price and a
    // same-price round trip costs exactly the fees.
    let config = EngineConfig::new(dec!(1_000_000), dec!(0.001), dec!(0)).unwrap();
    let mut open_gate = ArbitrageEngine::new(config);
    open_gate
        .add_fund(Fund::new("SPY", dec!(500), [("AAPL", dec!(1))]).unwrap())
        .unwrap();
    open_gate.update_price("AAPL", dec!(500)).unwrap();
    let trade = open_gate.execute_arbitrage(&opportunity, dec!(100_000)).unwrap();
    assert_eq!(trade.entry_market_price, dec!(500));
    assert_eq!(trade.fund_leg.entry_price, dec!(500));
    assert_eq!(trade.entry_spread, dec!(0));

    let closed = open_gate.close_trade(&trade.id).unwrap();
    assert_eq!(closed.realized_pnl(), Some(dec!(-400)));
    assert_eq!(open_gate.ledger().available_capital(), dec!(999_600));
}

#[test]
fn over_capital_execution_is_rejected_without_side_effects() {
    let mut engine = discounted_fund_engine();
    let opportunity = engine.scan_opportunities().remove(0);

    let err = engine.execute_arbitrage(&opportunity, dec!(1_000_001)).unwrap_err();
    assert!(matches!(err, ArbError::InsufficientCapital { .. }));

    // The full balance fails too: the entry cost would not fit.
    let err = engine.execute_arbitrage(&opportunity, dec!(1_000_000)).unwrap_err();
    assert_eq!(
        err,
        ArbError::InsufficientCapital { required: dec!(1_002_000), available: dec!(1_000_000) }
    );

    assert_eq!(engine.ledger().available_capital(), dec!(1_000_000));
    assert_eq!(engine.ledger().committed_notional(), Decimal::ZERO);
    assert!(engine.ledger().open_trades().is_empty());
}

#[test]
fn widening_spread_loses_money() {
    let mut engine = discounted_fund_engine();
    let opportunity = engine.scan_opportunities().remove(0);
    let trade = engine.execute_arbitrage(&opportunity, dec!(100_000)).unwrap();

    engine.update_price("SPY", dec!(400)).unwrap();
    let closed = engine.close_trade(&trade.id).unwrap();
    // 100_000 * (-0.2 - -0.1) - 400
    assert_eq!(closed.realized_pnl(), Some(dec!(-10_400)));
}

#[test]
fn automated_strategy_runs_full_cycle() {
    let mut engine = discounted_fund_engine();
    let strategy = AutomatedStrategy::new(StrategyConfig::new(dec!(50_000), dec!(0.5)).unwrap());

    let stats = strategy.run_iteration(&mut engine);
    assert_eq!(stats.opportunities_found, 1);
    assert_eq!(stats.trades_opened, 1);

    // Spread narrows from -10% to -6%: not yet half.
    engine.update_price("SPY", dec!(470)).unwrap();
    let stats = strategy.run_iteration(&mut engine);
    assert_eq!(stats.trades_closed, 0);
    assert_eq!(engine.ledger().open_trades().len(), 1);

    // Fully converged: close, and nothing new to open.
    engine.update_price("SPY", dec!(500)).unwrap();
    let stats = strategy.run_iteration(&mut engine);
    assert_eq!(stats.trades_closed, 1);
    assert_eq!(stats.trades_opened, 0);
    assert_eq!(stats.opportunities_found, 0);
    // 50_000 * 0.10 - 100 - 100
    assert_eq!(stats.realized_pnl, dec!(4_800));
    assert_eq!(stats.capital_after, dec!(1_004_800));
}
