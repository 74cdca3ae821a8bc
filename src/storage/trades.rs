//! Closed trade storage

use anyhow::Result;
use chrono::Utc;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::info;
use crate::types::Trade;

pub const TRADES_DIR: &str = "output/trades";

pub fn save_closed_trade(trade: &Trade) -> Result<()> {
    save_closed_trade_in(Path::new(TRADES_DIR), trade)
}

pub fn save_closed_trade_in(dir: &Path, trade: &Trade) -> Result<()> {
    let filename = dir.join(format!("trades_{}.jsonl", Utc::now().format("%Y-%m-%d")));

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&filename)?;

    writeln!(file, "{}", serde_json::to_string(trade)?)?;

    info!(
        trade_id = %trade.id,
        fund = %trade.fund,
        realized_pnl = ?trade.realized_pnl(),
        "Saved closed trade"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::EngineConfig, execution::ArbitrageEngine, market::Fund};
    use rust_decimal_macros::dec;

    #[test]
    fn test_closed_trade_appends_one_json_line() {
        let dir = std::env::temp_dir().join(format!("etf-arb-trades-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();

        let config = EngineConfig::new(dec!(100_000), dec!(0.001), dec!(0.002)).unwrap();
        let mut engine = ArbitrageEngine::new(config);
        engine.add_fund(Fund::new("SPY", dec!(90), [("AAPL", dec!(1))]).unwrap()).unwrap();
        engine.update_price("AAPL", dec!(100)).unwrap();
        let opportunity = engine.scan_opportunities().remove(0);
        let trade = engine.execute_arbitrage(&opportunity, dec!(1_000)).unwrap();
        let closed = engine.close_trade(&trade.id).unwrap();

        save_closed_trade_in(&dir, &closed).unwrap();
        save_closed_trade_in(&dir, &closed).unwrap();

        let file = std::fs::read_dir(&dir).unwrap().next().unwrap().unwrap().path();
        let contents = std::fs::read_to_string(file).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["fund"], "SPY");
        assert_eq!(value["status"], "CLOSED");
        assert_eq!(value["direction"], "LONG_ETF_SHORT_BASKET");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
