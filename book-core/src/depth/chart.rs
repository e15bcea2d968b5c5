use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use crate::book::BookSide;
use crate::types::{OrderBookSnapshot, Price, Quantity};

/// One x-position of the depth area chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct DepthPoint {
    pub price: Price,
    pub bids: Option<Quantity>,
    pub asks: Option<Quantity>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct DepthChart {
    pub points: Vec<DepthPoint>,
}

/// Merged bid/ask depth curves on one ascending price axis.
///
/// Each side contributes its `chart_levels` levels nearest the touch, with
/// size accumulated from the touch outward. The bid curve is then carried
/// forward across the ask region and the ask curve backward across the bid
/// region, which gives the stepped "mountain" shape.
pub fn depth_chart(book: &OrderBookSnapshot, chart_levels: usize) -> DepthChart {
    let mut points: Vec<DepthPoint> = Vec::new();

    let mut cumulative = 0.0;
    for level in book.touch_outward(BookSide::Bids).into_iter().take(chart_levels) {
        cumulative += level.size;
        points.push(DepthPoint {
            price: level.price,
            bids: Some(cumulative),
            asks: None,
        });
    }

    let mut cumulative = 0.0;
    for level in book.touch_outward(BookSide::Asks).into_iter().take(chart_levels) {
        cumulative += level.size;
        points.push(DepthPoint {
            price: level.price,
            bids: None,
            asks: Some(cumulative),
        });
    }

    points.sort_by(|a, b| a.price.total_cmp(&b.price));

    // Collapse shared prices; a later entry overrides the fields it carries.
    let mut merged: Vec<DepthPoint> = Vec::with_capacity(points.len());
    for point in points {
        match merged.last_mut() {
            Some(last) if last.price == point.price => {
                last.bids = point.bids.or(last.bids);
                last.asks = point.asks.or(last.asks);
            }
            _ => merged.push(point),
        }
    }

    for i in 1..merged.len() {
        if merged[i].bids.is_none() {
            merged[i].bids = merged[i - 1].bids;
        }
    }
    for i in (0..merged.len().saturating_sub(1)).rev() {
        if merged[i].asks.is_none() {
            merged[i].asks = merged[i + 1].asks;
        }
    }

    DepthChart { points: merged }
}
