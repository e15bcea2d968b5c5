//! Execution estimates for a hypothetical order against the current book.
//!
//! Market orders walk the opposing side from the touch and report the average
//! price, slippage versus the touch, and how far the book had to be walked.
//! Limit orders only report how much resting liquidity they could cross.
//!
//! Everything is a pure function of `(book, order, config)`; the same inputs
//! always produce bit-identical metrics.

pub mod limit_order;
pub mod market_order;
pub mod text;

use crate::config::BookConfig;
use crate::types::{DerivedMetrics, OrderBookSnapshot, OrderType, Price, Quantity, SimulatedOrderRequest};

pub const IMPACT_WARNING: &str = "High market impact warning!";

/// Raw result of one of the order-type paths, before percentages and
/// warnings are finalised.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FillEstimate {
    pub filled_quantity: Quantity,
    pub avg_fill_price: Price,
    pub slippage_percent: f64,
    pub impact_percent: f64,
    /// Liquidity shortfall message, market orders only.
    pub shortfall: Option<String>,
}

/// Estimate with the default warning thresholds.
pub fn estimate(book: &OrderBookSnapshot, order: Option<&SimulatedOrderRequest>) -> DerivedMetrics {
    estimate_with(book, order, &BookConfig::default())
}

/// Estimate fill, slippage and impact for `order` against `book`.
///
/// A missing order, a one-sided book, or a quantity that is not strictly
/// positive yields zeroed metrics.
pub fn estimate_with(
    book: &OrderBookSnapshot,
    order: Option<&SimulatedOrderRequest>,
    config: &BookConfig,
) -> DerivedMetrics {
    let Some(order) = order else {
        return DerivedMetrics::default();
    };
    if !book.is_two_sided() || !(order.quantity > 0.0) {
        return DerivedMetrics::default();
    }

    let opposing = order.side.opposing_side();
    let levels = book.touch_outward(opposing);

    let fill = match order.order_type {
        OrderType::Market => {
            let Some(best_price) = book.touch(opposing) else {
                return DerivedMetrics::default();
            };
            market_order::sweep(&levels, best_price, order.quantity)
        }
        OrderType::Limit => limit_order::eligible(&levels, order.side, order.price, order.quantity),
    };

    let fill_percent = fill.filled_quantity / order.quantity * 100.0;
    let warning = risk_warnings(
        fill.shortfall,
        fill.slippage_percent,
        fill.impact_percent,
        config,
    );

    #[cfg(feature = "instrument")]
    tracing::info!(
        target: "estimate",
        side = order.side.as_str(),
        order_type = order.order_type.as_str(),
        quantity = order.quantity,
        filled_quantity = fill.filled_quantity,
        fill_pct = fill_percent,
        slippage_pct = fill.slippage_percent,
        impact_pct = fill.impact_percent,
        avg_fill_price = fill.avg_fill_price,
        warned = warning.is_some(),
    );

    DerivedMetrics {
        fill_percent,
        slippage_percent: fill.slippage_percent,
        impact_percent: fill.impact_percent,
        avg_fill_price: fill.avg_fill_price,
        filled_quantity: fill.filled_quantity,
        warning,
    }
}

/// Risk warnings outrank the shortfall notice: high slippage replaces it,
/// high impact is appended to whatever is there.
fn risk_warnings(
    shortfall: Option<String>,
    slippage_percent: f64,
    impact_percent: f64,
    config: &BookConfig,
) -> Option<String> {
    let mut warning = shortfall;

    if slippage_percent > config.slippage_warning_pct {
        warning = Some(format!(
            "High slippage warning! Estimated slippage is {}%.",
            text::to_fixed(slippage_percent, 2)
        ));
    }

    if impact_percent > config.impact_warning_pct {
        warning = Some(match warning {
            Some(existing) => format!("{} {}", existing, IMPACT_WARNING),
            None => IMPACT_WARNING.to_string(),
        });
    }

    warning
}
