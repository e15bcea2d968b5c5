use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{OrderBookSnapshot, Price, PriceLevel};

/// Deterministic synthetic book around `mid`, `levels` deep on each side and
/// `tick` apart.
///
/// Bids come best-first and asks worst-first, the same shape the feed layer
/// delivers. Sizes fall in (0, 5].
pub fn synthetic_book(mid: Price, levels: usize, tick: Price, seed: u64) -> OrderBookSnapshot {
    let mut rng = StdRng::seed_from_u64(seed);
    let half_spread = tick * 0.5;

    let bids = (0..levels)
        .map(|i| PriceLevel::new(mid - half_spread - i as f64 * tick, random_size(&mut rng)))
        .collect();

    let mut asks: Vec<PriceLevel> = (0..levels)
        .map(|i| PriceLevel::new(mid + half_spread + i as f64 * tick, random_size(&mut rng)))
        .collect();
    asks.reverse();

    OrderBookSnapshot::new(bids, asks)
}

fn random_size(rng: &mut StdRng) -> f64 {
    // Exclusive lower bound keeps every level non-empty
    5.0 - rng.random_range(0.0..5.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_book() {
        assert_eq!(synthetic_book(100.0, 10, 0.5, 7), synthetic_book(100.0, 10, 0.5, 7));
        assert_ne!(synthetic_book(100.0, 10, 0.5, 7), synthetic_book(100.0, 10, 0.5, 8));
    }

    #[test]
    fn shape_matches_feed_convention() {
        let book = synthetic_book(100.0, 5, 1.0, 1);
        assert_eq!(book.bids.len(), 5);
        assert_eq!(book.asks.len(), 5);

        assert!(book.bids.windows(2).all(|w| w[0].price > w[1].price));
        assert!(book.asks.windows(2).all(|w| w[0].price > w[1].price));
        assert_eq!(book.best_bid(), Some(99.5));
        assert_eq!(book.best_ask(), Some(100.5));
        assert_eq!(book.asks.last().map(|l| l.price), Some(100.5));

        assert!(book.bids.iter().chain(&book.asks).all(|l| l.size > 0.0 && l.size <= 5.0));
    }
}
