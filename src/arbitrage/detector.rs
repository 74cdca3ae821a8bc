//! Fund-vs-NAV spread detection

use chrono::Utc;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use tracing::debug;
use crate::{
    errors::{classify_error, log_recovery, ArbResult, BatchStage},
    market::{EquityRegistry, Fund},
    types::{ArbitrageOpportunity, Direction},
};

/// Price one fund and keep it only if `|spread| >= min_spread_threshold`.
pub fn evaluate_fund(
    fund: &Fund,
    registry: &EquityRegistry,
    min_spread_threshold: Decimal,
) -> ArbResult<Option<ArbitrageOpportunity>> {
    let quote = fund.quote(registry)?;
    let score = quote.spread.abs();

    if score < min_spread_threshold {
        return Ok(None);
    }

    Ok(Some(ArbitrageOpportunity {
        fund: fund.ticker().to_string(),
        nav: quote.nav,
        market_price: quote.market_price,
        spread: quote.spread,
        direction: Direction::from_spread(quote.spread),
        score,
        detected_at: Utc::now(),
    }))
}

/// Descending `|spread|`, then larger NAV, then ticker.
pub fn compare_opportunities(a: &ArbitrageOpportunity, b: &ArbitrageOpportunity) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| b.nav.cmp(&a.nav))
        .then_with(|| a.fund.cmp(&b.fund))
}

/// Scan every fund against the current registry. Funds that cannot be
/// priced are skipped for this scan.
pub fn scan_opportunities<'a, I>(
    funds: I,
    registry: &EquityRegistry,
    min_spread_threshold: Decimal,
) -> Vec<ArbitrageOpportunity>
where
    I: IntoIterator<Item = &'a Fund>,
{
    let mut opportunities: Vec<ArbitrageOpportunity> = funds
        .into_iter()
        .filter_map(|fund| match evaluate_fund(fund, registry, min_spread_threshold) {
            Ok(opportunity) => opportunity,
            Err(e) => {
                let action = classify_error(&e, BatchStage::Scan);
                log_recovery(action, fund.ticker(), &e, "Skipping fund for this scan");
                None
            }
        })
        .collect();

    opportunities.sort_by(compare_opportunities);

    debug!(count = opportunities.len(), threshold = %min_spread_threshold, "Scan complete");
    opportunities
}
