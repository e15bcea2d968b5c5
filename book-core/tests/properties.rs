//! Property tests over seeded random books
//!
//! These check relationships that must hold for any book and order, not just
//! the hand-picked scenarios.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use book_core::{
    BookConfig, BookSide, BookView, OrderBookSnapshot, PriceLevel, Side, SimulatedOrderRequest,
    aggregate, annotate, demo::synthetic_book, depth_chart, estimate,
};

const SEEDS: u64 = 64;

// === FIXTURES ===

/// Random book with shuffled storage order and integer-ish sizes.
fn random_book(rng: &mut StdRng) -> OrderBookSnapshot {
    let depth = rng.random_range(1..30);
    let mid = rng.random_range(50.0..5_000.0);
    let tick = rng.random_range(0.01..2.0);

    let mut bids: Vec<PriceLevel> = (0..depth)
        .map(|i| PriceLevel::new(mid - tick * (i + 1) as f64, rng.random_range(1..20) as f64))
        .collect();
    let mut asks: Vec<PriceLevel> = (0..depth)
        .map(|i| PriceLevel::new(mid + tick * (i + 1) as f64, rng.random_range(1..20) as f64))
        .collect();
    bids.shuffle(rng);
    asks.shuffle(rng);

    OrderBookSnapshot::new(bids, asks)
}

fn random_order(rng: &mut StdRng, book: &OrderBookSnapshot) -> SimulatedOrderRequest {
    let side = if rng.random_bool(0.5) { Side::Buy } else { Side::Sell };
    let quantity = rng.random_range(0.5..200.0);
    if rng.random_bool(0.5) {
        SimulatedOrderRequest::market(side, quantity)
    } else {
        let mid = book.mid_price().unwrap_or(100.0);
        SimulatedOrderRequest::limit(side, mid * rng.random_range(0.97..1.03), quantity)
    }
}

fn liquidity(book: &OrderBookSnapshot, side: BookSide) -> f64 {
    book.levels(side).iter().map(|l| l.size).sum()
}

// === SIMULATION ===

#[test]
fn fill_never_exceeds_order_or_liquidity() {
    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let book = random_book(&mut rng);
        let order = random_order(&mut rng, &book);
        let m = estimate(&book, Some(&order));

        let available = liquidity(&book, order.side.opposing_side());
        assert!(
            m.filled_quantity <= order.quantity + 1e-9,
            "seed {}: filled {} > quantity {}",
            seed,
            m.filled_quantity,
            order.quantity
        );
        assert!(
            m.filled_quantity <= available + 1e-9,
            "seed {}: filled {} > liquidity {}",
            seed,
            m.filled_quantity,
            available
        );
        assert!(m.fill_percent >= 0.0 && m.fill_percent <= 100.0 + 1e-9, "seed {}", seed);
        assert!(m.slippage_percent >= 0.0 && m.impact_percent >= 0.0, "seed {}", seed);
    }
}

#[test]
fn fill_percent_is_filled_over_requested() {
    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let book = random_book(&mut rng);
        let order = random_order(&mut rng, &book);
        let m = estimate(&book, Some(&order));

        assert_eq!(m.fill_percent, m.filled_quantity / order.quantity * 100.0, "seed {}", seed);
    }
}

#[test]
fn market_orders_within_liquidity_have_no_shortfall() {
    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let book = random_book(&mut rng);
        let side = if seed % 2 == 0 { Side::Buy } else { Side::Sell };
        let available = liquidity(&book, side.opposing_side());

        let order = SimulatedOrderRequest::market(side, available * rng.random_range(0.1..1.0));
        let m = estimate(&book, Some(&order));

        assert!((m.fill_percent - 100.0).abs() < 1e-9, "seed {}: fill {}", seed, m.fill_percent);
        let shortfall = m.warning.as_deref().is_some_and(|w| w.starts_with("Order may not fully fill"));
        assert!(!shortfall, "seed {}: {:?}", seed, m.warning);
    }
}

#[test]
fn market_average_lies_between_touch_and_deepest_level() {
    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let book = random_book(&mut rng);
        let order = SimulatedOrderRequest::market(Side::Buy, rng.random_range(1.0..100.0));
        let m = estimate(&book, Some(&order));

        let best = book.best_ask().unwrap();
        let worst = book.asks.iter().map(|l| l.price).fold(f64::MIN, f64::max);
        assert!(
            m.avg_fill_price >= best - 1e-9 && m.avg_fill_price <= worst + 1e-9,
            "seed {}: avg {} outside [{}, {}]",
            seed,
            m.avg_fill_price,
            best,
            worst
        );
        assert!(m.slippage_percent <= m.impact_percent + 1e-9, "seed {}", seed);
    }
}

#[test]
fn estimates_are_deterministic() {
    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let book = random_book(&mut rng);
        let order = random_order(&mut rng, &book);

        let first = estimate(&book, Some(&order));
        let second = estimate(&book.clone(), Some(&order.clone()));
        assert_eq!(first.fill_percent.to_bits(), second.fill_percent.to_bits());
        assert_eq!(first.avg_fill_price.to_bits(), second.avg_fill_price.to_bits());
        assert_eq!(first, second, "seed {}", seed);
    }
}

// === DEPTH ===

#[test]
fn cumulative_ends_at_total_and_full_depth() {
    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let book = random_book(&mut rng);

        for side in [BookSide::Bids, BookSide::Asks] {
            let levels = book.touch_outward(side);
            let depth = aggregate(&levels);
            let last = depth.last().unwrap();

            assert_eq!(last.cumulative, liquidity(&book, side), "seed {}", seed);
            assert!((last.depth_percent - 100.0).abs() < 1e-9, "seed {}", seed);
            assert!(depth.windows(2).all(|w| w[0].cumulative <= w[1].cumulative));
        }
    }
}

#[test]
fn depth_chart_curves_are_monotone_away_from_touch() {
    for seed in 0..SEEDS {
        let book = synthetic_book(100.0, 60, 0.25, seed);
        let chart = depth_chart(&book, 50);

        assert!(chart.points.windows(2).all(|w| w[0].price < w[1].price), "seed {}", seed);
        let bids: Vec<f64> = chart.points.iter().filter_map(|p| p.bids).collect();
        let asks: Vec<f64> = chart.points.iter().filter_map(|p| p.asks).collect();
        assert!(bids.windows(2).all(|w| w[0] >= w[1]), "seed {}", seed);
        assert!(asks.windows(2).all(|w| w[0] <= w[1]), "seed {}", seed);
    }
}

// === ANNOTATION ===

#[test]
fn annotation_adds_one_marker_and_keeps_order() {
    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let book = random_book(&mut rng);
        let order = random_order(&mut rng, &book);
        let config = BookConfig {
            max_levels: 100,
            ..BookConfig::default()
        };

        let view = BookView::build(&book, Some(&order), &config);
        let markers = view
            .bids
            .iter()
            .chain(&view.asks)
            .filter(|l| l.is_simulated)
            .count();
        assert_eq!(markers, usize::from(order.is_limit()), "seed {}", seed);

        assert!(view.bids.windows(2).all(|w| w[0].price >= w[1].price), "seed {}", seed);
        assert!(view.asks.windows(2).all(|w| w[0].price <= w[1].price), "seed {}", seed);
    }
}

#[test]
fn annotation_respects_level_cap() {
    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let book = random_book(&mut rng);
        let bids = aggregate(&book.touch_outward(BookSide::Bids));
        let cap = rng.random_range(1..20);
        let order = SimulatedOrderRequest::limit(Side::Buy, book.best_bid().unwrap(), 1.0);

        let out = annotate(&bids, Side::Buy, Some(&order), cap);
        assert_eq!(out.len(), (bids.len() + 1).min(cap), "seed {}", seed);
        // Joining the touch puts the marker first
        assert!(out[0].is_simulated, "seed {}", seed);
    }
}
