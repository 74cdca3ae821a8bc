//! ETF Arbitrage Engine - Simulation Entry Point
//!
//! Drives the automated strategy against a random-walk price feed

use etf_arb_engine::*;
use anyhow::Result;
use rand::{rngs::StdRng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::time::Duration;
use tokio::time;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize logging
    let _logging_guard = utils::setup_logging()?;
    utils::setup_output_directories()?;

    // Load configuration
    let config = CONFIG.clone();

    info!("📈 ETF Arbitrage Engine v0.1.0 - Simulation");
    info!("📋 Configuration:");
    info!("   Initial Capital: ${}", config.initial_capital);
    info!("   Transaction Cost: {}% per leg", config.transaction_cost_pct * dec!(100));
    info!("   Min Spread: {}%", config.min_spread_threshold * dec!(100));
    info!("   Max Position Size: ${}", config.max_position_size);
    info!("   Auto-Close Threshold: {}x entry spread", config.auto_close_threshold);
    info!("   Multiple Positions Per Fund: {}", config.allow_multiple_positions);
    info!("   Iterations: {} every {}ms", config.simulation_iterations, config.iteration_interval_ms);

    let engine = ArbitrageEngine::new(config.engine_config()?);
    let engine = SharedEngine::new(engine);
    let strategy = AutomatedStrategy::new(config.strategy_config()?);

    engine
        .with_engine(|engine| seed_universe(engine))
        .await?;

    let feed = simulation::RandomWalkFeed::new(config.price_volatility);
    let mut rng = StdRng::from_os_rng();

    // Setup shutdown handler
    let (shutdown_tx, mut shutdown_rx) = tokio::sync::oneshot::channel();
    let shutdown_tx = Arc::new(tokio::sync::Mutex::new(Some(shutdown_tx)));

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("📛 Received shutdown signal (Ctrl+C)...");
            if let Some(tx) = shutdown_tx.lock().await.take() {
                let _ = tx.send(());
            }
        }
    });

    info!("🚀 Starting simulation loop...");

    let mut interval = time::interval(Duration::from_millis(config.iteration_interval_ms));
    let mut iteration: u64 = 0;

    while iteration < config.simulation_iterations {
        tokio::select! {
            _ = interval.tick() => {
                iteration += 1;

                let prices = engine.with_engine(|engine| feed.next_tick(&mut rng, engine)).await;
                if let Err(e) = engine.update_prices(&prices).await {
                    warn!("Price update rejected: {}", e);
                }

                for opportunity in engine.scan_opportunities().await.iter().take(3) {
                    utils::print_opportunity(opportunity);
                }

                let closed_before = engine.with_engine(|e| e.ledger().closed_trades().len()).await;
                let stats = engine.run_iteration(&strategy).await;
                utils::print_iteration(iteration, &stats);

                if config.persist_results {
                    persist_iteration(&engine, iteration, &stats, closed_before).await;
                }

                if iteration % 20 == 0 {
                    utils::print_status(&engine.performance_metrics().await);
                }
            }
            _ = &mut shutdown_rx => {
                info!("Shutdown signal received, exiting main loop...");
                break;
            }
        }
    }

    // Flatten the book before reporting
    let report = engine.close_all_trades().await;
    info!("🛑 Closed {} remaining trade(s), realized ${:.2}", report.closed.len(), report.realized_pnl());
    for (trade_id, e) in &report.failed {
        warn!("Trade {} left open: {}", trade_id, e);
    }
    for trade in &report.closed {
        utils::print_closed_trade(trade);
        if config.persist_results {
            if let Err(e) = storage::save_closed_trade(trade) {
                error!("Failed to save closed trade: {}", e);
            }
        }
    }

    utils::print_status(&engine.performance_metrics().await);

    Ok(())
}

/// Demo universe: three funds over six equities.
fn seed_universe(engine: &mut ArbitrageEngine) -> ArbResult<()> {
    let equities: [(&str, Decimal); 6] = [
        ("AAPL", dec!(180)),
        ("MSFT", dec!(380)),
        ("GOOGL", dec!(140)),
        ("AMZN", dec!(150)),
        ("NVDA", dec!(480)),
        ("JPM", dec!(170)),
    ];
    engine.update_prices(equities)?;

    // Market prices start slightly off NAV so the first scan has something to do.
    engine.add_fund(Fund::new(
        "TECH",
        dec!(236.00),
        [("AAPL", dec!(0.4)), ("MSFT", dec!(0.35)), ("GOOGL", dec!(0.25))],
    )?)?;
    engine.add_fund(Fund::new(
        "MEGA",
        dec!(262.50),
        [("AAPL", dec!(0.2)), ("AMZN", dec!(0.3)), ("NVDA", dec!(0.3)), ("JPM", dec!(0.2))],
    )?)?;
    engine.add_fund(Fund::new(
        "MIXD",
        dec!(267.00),
        [("MSFT", dec!(0.25)), ("NVDA", dec!(0.15)), ("JPM", dec!(0.6))],
    )?)?;

    Ok(())
}

async fn persist_iteration(engine: &SharedEngine, iteration: u64, stats: &IterationStats, closed_before: usize) {
    if let Err(e) = storage::save_iteration_stats(iteration, stats) {
        error!("Failed to save iteration stats: {}", e);
    }

    let newly_closed: Vec<Trade> = engine
        .with_engine(|e| e.ledger().closed_trades()[closed_before..].to_vec())
        .await;
    for trade in &newly_closed {
        utils::print_closed_trade(trade);
        if let Err(e) = storage::save_closed_trade(trade) {
            error!("Failed to save closed trade: {}", e);
        }
    }
}
