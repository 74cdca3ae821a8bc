//! Holdings checks applied when a fund is registered

use crate::{
    config::WeightConvention,
    errors::{ArbError, ArbResult},
    market::Fund,
};
use rust_decimal::Decimal;

pub fn validate_holdings(fund: &Fund, convention: WeightConvention) -> ArbResult<()> {
    match convention {
        WeightConvention::Unconstrained => Ok(()),
        WeightConvention::Fractional { tolerance } => {
            let sum = fund.weight_sum();
            if (sum - Decimal::ONE).abs() > tolerance {
                return Err(ArbError::InvalidHoldings {
                    fund: fund.ticker().to_string(),
                    reason: format!("weights sum to {} (expected 1 ± {})", sum, tolerance),
                });
            }
            Ok(())
        }
    }
}
