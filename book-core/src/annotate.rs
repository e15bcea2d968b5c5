use crate::types::{AnnotatedLevel, SimulatedOrderRequest, Side};

/// Insert a simulated limit order into one column of the book display.
///
/// Only a limit order whose side matches `side` is placed; anything else
/// returns `levels` unchanged. The marker goes in front of the first level it
/// outranks (for a buy, the first level priced at or below it; for a sell, the
/// first at or above it) or at the end, and the result is then cut to
/// `max_levels`, so the marker can push the last existing row out.
///
/// An order whose price or quantity is NaN is logged and ignored.
pub fn annotate(
    levels: &[AnnotatedLevel],
    side: Side,
    order: Option<&SimulatedOrderRequest>,
    max_levels: usize,
) -> Vec<AnnotatedLevel> {
    let Some(order) = order else {
        return levels.to_vec();
    };
    if !order.is_limit() || order.side != side {
        return levels.to_vec();
    }

    if order.price.is_nan() || order.quantity.is_nan() {
        #[cfg(feature = "instrument")]
        tracing::warn!(
            target: "annotate",
            side = side.as_str(),
            price = order.price,
            quantity = order.quantity,
            reason = "non-numeric price or quantity",
        );
        return levels.to_vec();
    }

    let marker = AnnotatedLevel::simulated(order.price, order.quantity);
    let position = levels
        .iter()
        .position(|level| match side {
            Side::Buy => order.price >= level.price,
            Side::Sell => order.price <= level.price,
        })
        .unwrap_or(levels.len());

    let mut out = Vec::with_capacity(levels.len() + 1);
    out.extend_from_slice(&levels[..position]);
    out.push(marker);
    out.extend_from_slice(&levels[position..]);
    out.truncate(max_levels);
    out
}
