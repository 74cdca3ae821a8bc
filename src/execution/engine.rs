//! Trade execution engine
//!
//! Owns the market state (equity registry and fund definitions) and the
//! position ledger. Single-operation calls surface their errors directly;
//! a failed call leaves the ledger exactly as it found it.

use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::{debug, info};
use crate::{
    arbitrage,
    config::{EngineConfig, PositionPolicy},
    errors::{classify_error, log_recovery, ArbError, ArbResult, BatchStage},
    ledger::PositionLedger,
    market::{EquityRegistry, Fund, FundQuote},
    types::{
        ArbitrageOpportunity, BasketLeg, Direction, FundLeg, PerformanceMetrics, Trade, TradeExit,
        TradeStatus,
    },
    validation::validate_holdings,
};

/// Result of closing every open trade in one call.
#[derive(Debug, Default)]
pub struct CloseAllReport {
    pub closed: Vec<Trade>,
    pub failed: Vec<(String, ArbError)>,
}

impl CloseAllReport {
    pub fn realized_pnl(&self) -> Decimal {
        self.closed.iter().filter_map(|t| t.realized_pnl()).sum()
    }
}

pub struct ArbitrageEngine {
    config: EngineConfig,
    registry: EquityRegistry,
    funds: BTreeMap<String, Fund>,
    ledger: PositionLedger,
}

impl ArbitrageEngine {
    pub fn new(config: EngineConfig) -> Self {
        let ledger = PositionLedger::new(config.initial_capital);
        Self {
            config,
            registry: EquityRegistry::new(),
            funds: BTreeMap::new(),
            ledger,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &EquityRegistry {
        &self.registry
    }

    pub fn ledger(&self) -> &PositionLedger {
        &self.ledger
    }

    pub fn fund(&self, ticker: &str) -> Option<&Fund> {
        self.funds.get(ticker)
    }

    pub fn funds(&self) -> impl Iterator<Item = &Fund> {
        self.funds.values()
    }

    pub fn add_fund(&mut self, fund: Fund) -> ArbResult<()> {
        if self.funds.contains_key(fund.ticker()) {
            return Err(ArbError::DuplicateFund { fund: fund.ticker().to_string() });
        }
        validate_holdings(&fund, self.config.weight_convention)?;

        info!(
            fund = %fund.ticker(),
            market_price = %fund.market_price(),
            constituents = fund.holdings().len(),
            "Fund registered"
        );
        self.funds.insert(fund.ticker().to_string(), fund);
        Ok(())
    }

    /// Route a price to a fund's market price when `symbol` is a registered
    /// fund ticker, otherwise to the equity registry.
    pub fn update_price(&mut self, symbol: &str, price: Decimal) -> ArbResult<()> {
        match self.funds.get_mut(symbol) {
            Some(fund) => fund.set_market_price(price),
            None => self.registry.update_price(symbol, price),
        }
    }

    /// Forget an equity's price, e.g. when its feed goes stale. Funds holding
    /// it become unpriceable until a fresh price arrives.
    pub fn clear_price(&mut self, symbol: &str) -> Option<Decimal> {
        self.registry.remove_price(symbol)
    }

    /// Apply prices in order; stops at the first invalid one.
    pub fn update_prices<'a, I>(&mut self, prices: I) -> ArbResult<usize>
    where
        I: IntoIterator<Item = (&'a str, Decimal)>,
    {
        let mut applied = 0;
        for (symbol, price) in prices {
            self.update_price(symbol, price)?;
            applied += 1;
        }
        Ok(applied)
    }

    pub fn quote_fund(&self, ticker: &str) -> ArbResult<FundQuote> {
        self.funds
            .get(ticker)
            .ok_or_else(|| ArbError::UnknownFund { fund: ticker.to_string() })?
            .quote(&self.registry)
    }

    /// Ranked opportunities at the configured minimum spread.
    pub fn scan_opportunities(&self) -> Vec<ArbitrageOpportunity> {
        self.scan_opportunities_with(self.config.min_spread_threshold)
    }

    pub fn scan_opportunities_with(&self, min_spread_threshold: Decimal) -> Vec<ArbitrageOpportunity> {
        arbitrage::scan_opportunities(self.funds.values(), &self.registry, min_spread_threshold)
    }

    pub fn execute_arbitrage(
        &mut self,
        opportunity: &ArbitrageOpportunity,
        notional: Decimal,
    ) -> ArbResult<Trade> {
        let fund = self
            .funds
            .get(&opportunity.fund)
            .ok_or_else(|| ArbError::UnknownFund { fund: opportunity.fund.clone() })?;

        if notional <= Decimal::ZERO {
            return Err(ArbError::InvalidNotional { notional });
        }

        let entry_cost = self.config.two_leg_cost(notional);
        self.ledger.ensure_capacity(notional, entry_cost)?;

        if self.config.position_policy == PositionPolicy::OnePerFund
            && self.ledger.has_open_trade(fund.ticker())
        {
            return Err(ArbError::DuplicatePosition { fund: fund.ticker().to_string() });
        }

        // Entry is priced from the live book, not from the scan that found it.
        let quote = fund.quote(&self.registry)?;
        let score = quote.spread.abs();
        if score < self.config.min_spread_threshold {
            return Err(ArbError::SpreadBelowThreshold {
                fund: fund.ticker().to_string(),
                spread: quote.spread,
                threshold: self.config.min_spread_threshold,
            });
        }
        if quote.spread != opportunity.spread {
            debug!(
                fund = %fund.ticker(),
                scanned = %opportunity.spread,
                current = %quote.spread,
                "Opportunity repriced at execution"
            );
        }

        let direction = Direction::from_spread(quote.spread);
        let mut basket_legs = Vec::with_capacity(fund.holdings().len());
        let mut missing = Vec::new();
        for (symbol, weight) in fund.holdings() {
            match self.registry.price(symbol) {
                Some(price) => {
                    let leg_notional = notional * *weight;
                    basket_legs.push(BasketLeg {
                        symbol: symbol.clone(),
                        weight: *weight,
                        entry_price: price,
                        notional: leg_notional,
                        quantity: direction.basket_leg_sign() * leg_notional / price,
                    });
                }
                None => missing.push(symbol.clone()),
            }
        }
        if !missing.is_empty() {
            return Err(ArbError::IncompleteMarketData { fund: fund.ticker().to_string(), missing });
        }

        let trade = Trade {
            id: uuid::Uuid::new_v4().to_string(),
            fund: fund.ticker().to_string(),
            direction,
            entry_nav: quote.nav,
            entry_market_price: quote.market_price,
            entry_spread: quote.spread,
            notional,
            fund_leg: FundLeg {
                ticker: fund.ticker().to_string(),
                entry_price: quote.market_price,
                quantity: direction.fund_leg_sign() * notional / quote.market_price,
            },
            basket_legs,
            entry_cost,
            expected_profit: notional * score - entry_cost * Decimal::TWO,
            opened_at: Utc::now(),
            status: TradeStatus::Open,
            exit: None,
        };

        self.ledger.commit(trade.clone())?;

        info!(
            trade_id = %trade.id,
            fund = %trade.fund,
            direction = %trade.direction,
            spread = %trade.entry_spread,
            notional = %notional,
            "Arbitrage executed"
        );

        Ok(trade)
    }

    pub fn close_trade(&mut self, trade_id: &str) -> ArbResult<Trade> {
        let trade = match self.ledger.open_trade(trade_id) {
            Some(trade) => trade,
            None if self.ledger.closed_trade(trade_id).is_some() => {
                return Err(ArbError::AlreadyClosed { trade_id: trade_id.to_string() });
            }
            None => return Err(ArbError::UnknownTrade { trade_id: trade_id.to_string() }),
        };

        let quote = self.quote_fund(&trade.fund)?;
        let gross_pnl = trade.mark_to_market(quote.spread);
        let cost = self.config.two_leg_cost(trade.notional);

        let exit = TradeExit {
            nav: quote.nav,
            market_price: quote.market_price,
            spread: quote.spread,
            gross_pnl,
            cost,
            realized_pnl: gross_pnl - cost - trade.entry_cost,
            closed_at: Utc::now(),
        };

        let closed = self.ledger.settle(trade_id, exit)?;

        info!(
            trade_id = %closed.id,
            fund = %closed.fund,
            entry_spread = %closed.entry_spread,
            exit_spread = %quote.spread,
            realized_pnl = ?closed.realized_pnl(),
            "Trade closed"
        );

        Ok(closed)
    }

    /// Close every open trade; trades whose fund cannot be priced stay open.
    pub fn close_all_trades(&mut self) -> CloseAllReport {
        let ids: Vec<String> = self.ledger.open_trades().iter().map(|t| t.id.clone()).collect();
        let mut report = CloseAllReport::default();

        for id in ids {
            match self.close_trade(&id) {
                Ok(trade) => report.closed.push(trade),
                Err(e) => {
                    let action = classify_error(&e, BatchStage::Close);
                    log_recovery(action, &id, &e, "Trade left open");
                    report.failed.push((id, e));
                }
            }
        }

        report
    }

    /// Mark-to-market gross PnL of open trades. Unpriceable funds contribute zero.
    pub fn unrealized_pnl(&self) -> Decimal {
        self.ledger
            .open_trades()
            .iter()
            .map(|trade| match self.quote_fund(&trade.fund) {
                Ok(quote) => trade.mark_to_market(quote.spread),
                Err(e) => {
                    debug!(trade_id = %trade.id, error = %e, "Unrealized PnL unavailable");
                    Decimal::ZERO
                }
            })
            .sum()
    }

    pub fn total_value(&self) -> Decimal {
        self.ledger.available_capital() + self.ledger.committed_notional() + self.unrealized_pnl()
    }

    pub fn performance_metrics(&self) -> PerformanceMetrics {
        let initial = self.ledger.initial_capital();
        let unrealized_pnl = self.unrealized_pnl();
        let total_value =
            self.ledger.available_capital() + self.ledger.committed_notional() + unrealized_pnl;

        PerformanceMetrics {
            total_value,
            available_capital: self.ledger.available_capital(),
            committed_notional: self.ledger.committed_notional(),
            realized_pnl: self.ledger.realized_pnl(),
            unrealized_pnl,
            total_return: (total_value - initial) / initial,
            open_trades: self.ledger.open_trades().len(),
            closed_trades: self.ledger.closed_trades().len(),
            win_rate: self.ledger.win_rate(),
            capital_utilization: self.ledger.committed_notional() / initial,
        }
    }
}
