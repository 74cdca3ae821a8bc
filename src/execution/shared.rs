//! Lock-guarded engine handle for concurrent callers
//!
//! The ledger is the one shared mutable resource. Every operation here holds
//! the single engine lock from start to finish, so check-then-commit and
//! release-then-credit are atomic with respect to other callers.

use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::Mutex;
use crate::{
    errors::ArbResult,
    strategy::AutomatedStrategy,
    types::{ArbitrageOpportunity, IterationStats, PerformanceMetrics, Trade},
};
use super::{ArbitrageEngine, CloseAllReport};

#[derive(Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<ArbitrageEngine>>,
}

impl SharedEngine {
    pub fn new(engine: ArbitrageEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    pub async fn update_price(&self, symbol: &str, price: Decimal) -> ArbResult<()> {
        self.inner.lock().await.update_price(symbol, price)
    }

    pub async fn update_prices(&self, prices: &[(String, Decimal)]) -> ArbResult<usize> {
        self.inner
            .lock()
            .await
            .update_prices(prices.iter().map(|(s, p)| (s.as_str(), *p)))
    }

    pub async fn scan_opportunities(&self) -> Vec<ArbitrageOpportunity> {
        self.inner.lock().await.scan_opportunities()
    }

    pub async fn execute_arbitrage(
        &self,
        opportunity: &ArbitrageOpportunity,
        notional: Decimal,
    ) -> ArbResult<Trade> {
        self.inner.lock().await.execute_arbitrage(opportunity, notional)
    }

    pub async fn close_trade(&self, trade_id: &str) -> ArbResult<Trade> {
        self.inner.lock().await.close_trade(trade_id)
    }

    pub async fn close_all_trades(&self) -> CloseAllReport {
        self.inner.lock().await.close_all_trades()
    }

    pub async fn run_iteration(&self, strategy: &AutomatedStrategy) -> IterationStats {
        let mut engine = self.inner.lock().await;
        strategy.run_iteration(&mut *engine)
    }

    pub async fn performance_metrics(&self) -> PerformanceMetrics {
        self.inner.lock().await.performance_metrics()
    }

    /// Run `f` against the engine while holding the lock.
    pub async fn with_engine<R>(&self, f: impl FnOnce(&mut ArbitrageEngine) -> R) -> R {
        let mut engine = self.inner.lock().await;
        f(&mut *engine)
    }
}
