//! Touch-outward access to a book snapshot.
//!
//! The feed hands over bids best-first and asks worst-first, and not every
//! venue is consistent about it. Every consumer in this crate goes through the
//! accessors here, which derive the touch from explicit extrema and sort a
//! copy of the levels, so storage order is never trusted.

use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use crate::types::{OrderBookSnapshot, Price, PriceLevel, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum BookSide {
    Bids,
    Asks,
}

impl Side {
    /// Column a resting order of this side would join.
    pub fn resting_side(&self) -> BookSide {
        match self {
            Side::Buy => BookSide::Bids,
            Side::Sell => BookSide::Asks,
        }
    }

    /// Column an aggressive order of this side consumes.
    pub fn opposing_side(&self) -> BookSide {
        match self {
            Side::Buy => BookSide::Asks,
            Side::Sell => BookSide::Bids,
        }
    }
}

impl OrderBookSnapshot {
    pub fn new(bids: Vec<PriceLevel>, asks: Vec<PriceLevel>) -> Self {
        Self { bids, asks }
    }

    /// Both sides carry at least one level.
    pub fn is_two_sided(&self) -> bool {
        !self.bids.is_empty() && !self.asks.is_empty()
    }

    pub fn levels(&self, side: BookSide) -> &[PriceLevel] {
        match side {
            BookSide::Bids => &self.bids,
            BookSide::Asks => &self.asks,
        }
    }

    /// Highest bid price.
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.iter().map(|l| l.price).reduce(f64::max)
    }

    /// Lowest ask price.
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.iter().map(|l| l.price).reduce(f64::min)
    }

    pub fn touch(&self, side: BookSide) -> Option<Price> {
        match side {
            BookSide::Bids => self.best_bid(),
            BookSide::Asks => self.best_ask(),
        }
    }

    /// Best ask minus best bid, 0 when either side is empty.
    pub fn spread(&self) -> f64 {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => ask - bid,
            _ => 0.0,
        }
    }

    pub fn mid_price(&self) -> Option<Price> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid + ask) * 0.5),
            _ => None,
        }
    }

    /// Copy of one side sorted from the touch outward: bids descending,
    /// asks ascending. The sort is stable, so equal prices keep feed order.
    pub fn touch_outward(&self, side: BookSide) -> Vec<PriceLevel> {
        let mut levels = self.levels(side).to_vec();
        match side {
            BookSide::Bids => levels.sort_by(|a, b| b.price.total_cmp(&a.price)),
            BookSide::Asks => levels.sort_by(|a, b| a.price.total_cmp(&b.price)),
        }
        levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lvl(price: f64, size: f64) -> PriceLevel {
        PriceLevel::new(price, size)
    }

    #[test]
    fn touch_comes_from_extrema_not_position() {
        // Asks deliberately unsorted: neither end is the best ask
        let book = OrderBookSnapshot::new(
            vec![lvl(98.0, 1.0), lvl(99.0, 4.0), lvl(97.0, 2.0)],
            vec![lvl(101.0, 5.0), lvl(100.0, 3.0), lvl(102.0, 1.0)],
        );
        assert_eq!(book.best_bid(), Some(99.0));
        assert_eq!(book.best_ask(), Some(100.0));
        assert_eq!(book.spread(), 1.0);
        assert_eq!(book.mid_price(), Some(99.5));
    }

    #[test]
    fn touch_outward_orders_both_sides_from_best() {
        let book = OrderBookSnapshot::new(
            vec![lvl(98.0, 1.0), lvl(99.0, 4.0)],
            vec![lvl(101.0, 5.0), lvl(100.0, 3.0)],
        );
        let bids: Vec<f64> = book.touch_outward(BookSide::Bids).iter().map(|l| l.price).collect();
        let asks: Vec<f64> = book.touch_outward(BookSide::Asks).iter().map(|l| l.price).collect();
        assert_eq!(bids, vec![99.0, 98.0]);
        assert_eq!(asks, vec![100.0, 101.0]);

        // Source untouched
        assert_eq!(book.asks[0].price, 101.0);
    }

    #[test]
    fn one_sided_book_has_no_spread() {
        let book = OrderBookSnapshot::new(vec![lvl(99.0, 1.0)], vec![]);
        assert!(!book.is_two_sided());
        assert_eq!(book.best_ask(), None);
        assert_eq!(book.spread(), 0.0);
        assert_eq!(book.mid_price(), None);
    }

    #[test]
    fn sides_map_to_columns() {
        assert_eq!(Side::Buy.opposing_side(), BookSide::Asks);
        assert_eq!(Side::Sell.opposing_side(), BookSide::Bids);
        assert_eq!(Side::Buy.resting_side(), BookSide::Bids);
        assert_eq!(Side::Sell.resting_side(), BookSide::Asks);
    }
}
