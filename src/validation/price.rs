//! Price validation functions

use rust_decimal::Decimal;
use crate::errors::{ArbError, ArbResult};

pub fn validate_price(symbol: &str, price: Decimal) -> ArbResult<()> {
    if price <= Decimal::ZERO {
        return Err(ArbError::InvalidPrice {
            symbol: symbol.to_string(),
            price,
        });
    }

    Ok(())
}
