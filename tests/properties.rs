//! Property tests for ledger conservation and ranking order.

use etf_arb_engine::*;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const FUNDS: [&str; 4] = ["AAA", "BBB", "CCC", "DDD"];

#[derive(Debug, Clone)]
enum Op {
    Execute { fund: usize, notional: u32 },
    Close { index: usize },
    MoveFund { fund: usize, price_cents: u32 },
    MoveEquity { price_cents: u32 },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..FUNDS.len(), 0u32..400_000).prop_map(|(fund, notional)| Op::Execute { fund, notional }),
        (0usize..8).prop_map(|index| Op::Close { index }),
        (0..FUNDS.len(), 5_000u32..15_000).prop_map(|(fund, price_cents)| Op::MoveFund { fund, price_cents }),
        (5_000u32..15_000).prop_map(|price_cents| Op::MoveEquity { price_cents }),
    ]
}

fn engine(policy: config::PositionPolicy) -> ArbitrageEngine {
    let config = EngineConfig::new(dec!(1_000_000), dec!(0.001), dec!(0))
        .unwrap()
        .with_position_policy(policy);
    let mut engine = ArbitrageEngine::new(config);
    for (i, ticker) in FUNDS.iter().enumerate() {
        let price = dec!(90) + Decimal::from(i as u32 * 5);
        engine
            .add_fund(Fund::new(ticker, price, [("X", dec!(0.6)), ("Y", dec!(0.4))]).unwrap())
            .unwrap();
    }
    engine.update_prices([("X", dec!(100)), ("Y", dec!(100))]).unwrap();
    engine
}

proptest! {
    #[test]
    fn prop_capital_conservation(
        allow_multiple in any::<bool>(),
        ops in prop::collection::vec(op(), 1..60)
    ) {
        let policy = if allow_multiple {
            config::PositionPolicy::AllowMultiple
        } else {
            config::PositionPolicy::OnePerFund
        };
        let mut engine = engine(policy);
        let initial = engine.ledger().initial_capital();

        for op in ops {
            let before_available = engine.ledger().available_capital();
            let before_open = engine.ledger().open_trades().len();

            match op {
                Op::Execute { fund, notional } => {
                    let opportunity = engine
                        .scan_opportunities()
                        .into_iter()
                        .find(|o| o.fund == FUNDS[fund]);
                    if let Some(opportunity) = opportunity {
                        if engine.execute_arbitrage(&opportunity, Decimal::from(notional)).is_err() {
                            prop_assert_eq!(engine.ledger().available_capital(), before_available);
                            prop_assert_eq!(engine.ledger().open_trades().len(), before_open);
                        }
                    }
                }
                Op::Close { index } => {
                    let id = engine.ledger().open_trades().get(index).map(|t| t.id.clone());
                    if let Some(id) = id {
                        engine.close_trade(&id).unwrap();
                        prop_assert!(matches!(
                            engine.close_trade(&id),
                            Err(ArbError::AlreadyClosed { .. })
                        ), "second close of a trade must return AlreadyClosed");
                    }
                }
                Op::MoveFund { fund, price_cents } => {
                    engine.update_price(FUNDS[fund], Decimal::new(price_cents as i64, 2)).unwrap();
                }
                Op::MoveEquity { price_cents } => {
                    engine.update_price("X", Decimal::new(price_cents as i64, 2)).unwrap();
                }
            }

            let ledger = engine.ledger();
            prop_assert_eq!(ledger.conservation_residual(), Decimal::ZERO);
            prop_assert!(ledger.committed_notional() <= initial);
            let open_notional: Decimal = ledger.open_trades().iter().map(|t| t.notional).sum();
            prop_assert_eq!(open_notional, ledger.committed_notional());
        }
    }

    #[test]
    fn prop_scan_is_sorted_by_absolute_spread(
        fund_prices in prop::collection::vec(1_000u32..30_000, 1..12),
        threshold_bps in 0u32..500
    ) {
        let config = EngineConfig::new(dec!(1_000_000), dec!(0.001), dec!(0)).unwrap();
        let mut engine = ArbitrageEngine::new(config);
        engine.update_price("X", dec!(100)).unwrap();
        for (i, cents) in fund_prices.iter().enumerate() {
            let fund = Fund::new(&format!("F{i:02}"), Decimal::new(*cents as i64, 2), [("X", dec!(1))]).unwrap();
            engine.add_fund(fund).unwrap();
        }

        let threshold = Decimal::new(threshold_bps as i64, 4);
        let opportunities = engine.scan_opportunities_with(threshold);

        for pair in opportunities.windows(2) {
            prop_assert!(pair[0].spread.abs() >= pair[1].spread.abs());
        }
        for opportunity in &opportunities {
            prop_assert!(opportunity.spread.abs() >= threshold);
            prop_assert_eq!(opportunity.score, opportunity.spread.abs());
        }
        let qualifying = fund_prices
            .iter()
            .filter(|c| ((Decimal::new(**c as i64, 2) - dec!(100)) / dec!(100)).abs() >= threshold)
            .count();
        prop_assert_eq!(opportunities.len(), qualifying);
    }
}
