use crate::types::{Price, PriceLevel, Quantity, Side};

use super::FillEstimate;

/// Liquidity a limit order could cross, capped at the requested quantity.
///
/// A buy counts every ask priced at or below the limit, a sell every bid at or
/// above it. No average price, slippage or impact is derived for limits.
pub fn eligible(levels: &[PriceLevel], side: Side, limit_price: Price, quantity: Quantity) -> FillEstimate {
    let crossing: Quantity = levels
        .iter()
        .filter(|level| match side {
            Side::Buy => level.price <= limit_price,
            Side::Sell => level.price >= limit_price,
        })
        .map(|level| level.size)
        .sum();

    FillEstimate {
        filled_quantity: quantity.min(crossing),
        ..Default::default()
    }
}
