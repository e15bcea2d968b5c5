use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use crate::annotate::annotate;
use crate::book::BookSide;
use crate::config::BookConfig;
use crate::depth::aggregate;
use crate::types::{AnnotatedLevel, OrderBookSnapshot, SimulatedOrderRequest, Side};

/// Rows for the two columns of the order-book panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct BookView {
    /// Best bid first.
    pub bids: Vec<AnnotatedLevel>,
    /// Best ask first.
    pub asks: Vec<AnnotatedLevel>,
    pub spread: f64,
}

impl BookView {
    /// Both columns run from the touch outward, keep the `max_levels` levels
    /// nearest the touch, carry depth relative to what is shown, and get the
    /// simulated limit order spliced into the column it would rest in.
    pub fn build(
        book: &OrderBookSnapshot,
        order: Option<&SimulatedOrderRequest>,
        config: &BookConfig,
    ) -> Self {
        Self {
            bids: column(book, BookSide::Bids, order, config.max_levels),
            asks: column(book, BookSide::Asks, order, config.max_levels),
            spread: book.spread(),
        }
    }
}

fn column(
    book: &OrderBookSnapshot,
    side: BookSide,
    order: Option<&SimulatedOrderRequest>,
    max_levels: usize,
) -> Vec<AnnotatedLevel> {
    let mut levels = book.touch_outward(side);
    levels.truncate(max_levels);
    let depth = aggregate(&levels);

    let resting = match side {
        BookSide::Bids => Side::Buy,
        BookSide::Asks => Side::Sell,
    };
    annotate(&depth, resting, order, max_levels)
}
