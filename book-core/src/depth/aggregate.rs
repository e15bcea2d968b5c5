use crate::types::{AnnotatedLevel, PriceLevel};

/// Cumulative depth for one side, walked in the order given.
///
/// `cumulative[i]` is the sum of sizes up to and including level `i`;
/// `depth_percent[i]` is that sum relative to the side total (0 when the
/// total is 0). Levels are never reordered.
///
/// A non-finite or negative size invalidates the running sum: that level and
/// every later one get a NaN cumulative, and since the total is then undefined
/// every depth percentage on the side is NaN as well. Nothing is clamped.
pub fn aggregate(levels: &[PriceLevel]) -> Vec<AnnotatedLevel> {
    let mut running = 0.0;
    let mut poisoned = false;

    let mut out: Vec<AnnotatedLevel> = levels
        .iter()
        .map(|level| {
            if !(level.size.is_finite() && level.size >= 0.0) {
                poisoned = true;
            }
            running += level.size;
            AnnotatedLevel {
                price: level.price,
                size: level.size,
                cumulative: if poisoned { f64::NAN } else { running },
                depth_percent: 0.0,
                is_simulated: false,
            }
        })
        .collect();

    let total = out.last().map(|l| l.cumulative).unwrap_or(0.0);
    for level in out.iter_mut() {
        level.depth_percent = if total.is_nan() {
            f64::NAN
        } else if total == 0.0 {
            0.0
        } else {
            level.cumulative / total * 100.0
        };
    }

    out
}
