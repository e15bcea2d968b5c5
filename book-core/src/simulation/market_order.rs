use crate::types::{Price, PriceLevel, Quantity};

use super::{FillEstimate, text};

/// Walk the opposing side from the touch outward, taking as much of each
/// level as the order still needs.
///
/// `levels` must already be in touch-outward order and `best_price` is the
/// touch of that side.
pub fn sweep(levels: &[PriceLevel], best_price: Price, quantity: Quantity) -> FillEstimate {
    let mut remaining = quantity;
    let mut filled = 0.0;
    let mut total_cost = 0.0;

    for level in levels {
        if remaining <= 0.0 {
            break;
        }
        let take = remaining.min(level.size);
        filled += take;
        total_cost += take * level.price;
        remaining -= take;
    }

    let mut estimate = FillEstimate {
        filled_quantity: filled,
        ..Default::default()
    };

    if filled > 0.0 {
        let avg_fill_price = total_cost / filled;
        estimate.avg_fill_price = avg_fill_price;
        estimate.slippage_percent = (avg_fill_price - best_price).abs() / best_price * 100.0;

        let last_price = deepest_level_reached(levels, filled).unwrap_or(best_price);
        estimate.impact_percent = (last_price - best_price).abs() / best_price * 100.0;

        // Shortfall is only reported once something filled
        if remaining > 0.0 {
            estimate.shortfall = Some(format!(
                "Order may not fully fill. Only {} of {} could be filled with available liquidity.",
                text::to_fixed(filled, 4),
                text::number(quantity)
            ));
        }
    }

    estimate
}

/// Price of the first level at which resting size, summed from the touch,
/// covers `filled`. Independent of the average price paid.
fn deepest_level_reached(levels: &[PriceLevel], filled: Quantity) -> Option<Price> {
    let mut cumulative = 0.0;
    for level in levels {
        cumulative += level.size;
        if cumulative >= filled {
            return Some(level.price);
        }
    }
    None
}
