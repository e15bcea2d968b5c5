use serde::{Deserialize, Serialize};
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;

pub mod annotate;
pub mod book;
pub mod config;
pub mod demo;
pub mod depth;
pub mod error;
pub mod order_form;
pub mod simulation;
pub mod types;
pub mod venue;
pub mod view;

pub use annotate::annotate;
pub use book::BookSide;
pub use config::*;
pub use depth::*;
pub use error::*;
pub use order_form::*;
pub use simulation::{estimate, estimate_with};
pub use types::*;
pub use venue::Venue;
pub use view::BookView;

#[cfg(feature = "instrument")]
pub use instrument;

// ============================================================================
// Feed status - Reported by the JS feed layer, never produced here
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum FeedStatus {
    Connecting,
    Connected,
    Disconnected,
    Error(String),
}

impl FeedStatus {
    pub fn label(&self) -> String {
        match self {
            FeedStatus::Connecting => "Connecting...".to_string(),
            FeedStatus::Connected => "Connected".to_string(),
            FeedStatus::Disconnected => "Disconnected".to_string(),
            FeedStatus::Error(msg) => format!("Error: {}", msg),
        }
    }
}

// ============================================================================
// WASM API - Dashboard
// ============================================================================

/// Page state of the order-book dashboard.
///
/// Holds only inputs (venue, symbol, latest book, feed status, simulated
/// order). Every derived value is recomputed from those on each call.
#[wasm_bindgen]
pub struct Dashboard {
    venue: Venue,
    symbol: String,
    book: OrderBookSnapshot,
    status: FeedStatus,
    order: Option<SimulatedOrderRequest>,
    config: BookConfig,
}

#[wasm_bindgen]
impl Dashboard {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        // Better panic messages in browser console
        console_error_panic_hook::set_once();

        Self::with_config(BookConfig::default())
    }

    #[wasm_bindgen]
    pub fn with_config(config: BookConfig) -> Self {
        let venue = Venue::default();
        Self {
            venue,
            symbol: venue.default_symbol().to_string(),
            book: OrderBookSnapshot::default(),
            status: FeedStatus::Connecting,
            order: None,
            config,
        }
    }

    /// Dashboard preloaded with a synthetic book, for offline previews.
    #[wasm_bindgen]
    pub fn with_demo_book(seed: u64) -> Self {
        let mut dashboard = Self::new();
        dashboard.book = demo::synthetic_book(100.0, 40, 0.5, seed);
        dashboard.status = FeedStatus::Connected;
        dashboard
    }

    #[wasm_bindgen]
    pub fn venue(&self) -> Venue {
        self.venue
    }

    #[wasm_bindgen]
    pub fn symbol(&self) -> String {
        self.symbol.clone()
    }

    /// Switch venue. Resets the symbol to the venue default and drops the
    /// book and any simulated order until the feed reconnects.
    #[wasm_bindgen]
    pub fn select_venue(&mut self, venue: Venue) {
        self.venue = venue;
        self.symbol = venue.default_symbol().to_string();
        self.reset_feed();
    }

    #[wasm_bindgen]
    pub fn select_symbol(&mut self, symbol: &str) -> Result<(), String> {
        if !self.venue.supports(symbol) {
            return Err(BookError::UnknownSymbol {
                venue: self.venue.label(),
                symbol: symbol.to_string(),
            }
            .to_string());
        }
        self.symbol = symbol.to_string();
        self.reset_feed();
        Ok(())
    }

    /// Symbols the selected venue lists, in picker order.
    #[wasm_bindgen]
    pub fn symbols(&self) -> Vec<String> {
        self.venue.symbols().iter().map(|s| s.to_string()).collect()
    }

    /// Public book feed the JS layer should subscribe to for the selected venue.
    #[wasm_bindgen]
    pub fn feed_url(&self) -> String {
        self.venue.feed_url().to_string()
    }

    #[wasm_bindgen]
    pub fn status(&self) -> FeedStatus {
        self.status.clone()
    }

    #[wasm_bindgen]
    pub fn status_label(&self) -> String {
        self.status.label()
    }

    #[wasm_bindgen]
    pub fn set_status(&mut self, status: FeedStatus) {
        self.status = status;
    }

    /// Replace the book wholesale with the latest normalized snapshot.
    #[wasm_bindgen]
    pub fn set_book(&mut self, book: OrderBookSnapshot) {
        self.book = book;
    }

    /// Same as `set_book`, from a JSON payload. A malformed payload leaves the
    /// current book in place.
    #[wasm_bindgen]
    pub fn set_book_json(&mut self, json: &str) -> Result<(), String> {
        self.load_book_json(json).map_err(|e| e.to_string())
    }

    #[wasm_bindgen]
    pub fn simulate(&mut self, order: SimulatedOrderRequest) -> Result<(), String> {
        self.submit(order).map_err(|e| e.to_string())
    }

    #[wasm_bindgen]
    pub fn simulate_form(&mut self, form: OrderForm) -> Result<(), String> {
        form.parse()
            .and_then(|order| self.submit(order))
            .map_err(|e| e.to_string())
    }

    #[wasm_bindgen]
    pub fn clear_simulation(&mut self) {
        self.order = None;
    }

    #[wasm_bindgen]
    pub fn has_simulation(&self) -> bool {
        self.order.is_some()
    }

    /// Metrics for the current simulated order (zeroed when there is none).
    #[wasm_bindgen]
    pub fn metrics(&self) -> DerivedMetrics {
        simulation::estimate_with(&self.book, self.order.as_ref(), &self.config)
    }

    #[wasm_bindgen]
    pub fn book_view(&self) -> BookView {
        BookView::build(&self.book, self.order.as_ref(), &self.config)
    }

    #[wasm_bindgen]
    pub fn depth_chart(&self) -> DepthChart {
        depth::depth_chart(&self.book, self.config.chart_levels)
    }

    #[wasm_bindgen]
    pub fn spread(&self) -> f64 {
        self.book.spread()
    }

    #[wasm_bindgen]
    pub fn suggested_limit_price(&self, side: Side) -> Option<f64> {
        order_form::suggested_limit_price(&self.book, side)
    }
}

// ============================================================================
// Rust-side helpers
// ============================================================================

impl Dashboard {
    pub fn book(&self) -> &OrderBookSnapshot {
        &self.book
    }

    pub fn simulated_order(&self) -> Option<&SimulatedOrderRequest> {
        self.order.as_ref()
    }

    pub fn load_book_json(&mut self, json: &str) -> Result<(), BookError> {
        match serde_json::from_str::<OrderBookSnapshot>(json) {
            Ok(book) => {
                self.book = book;
                Ok(())
            }
            Err(e) => {
                #[cfg(feature = "instrument")]
                tracing::warn!(target: "dashboard", error = %e, "rejected book payload");
                Err(e.into())
            }
        }
    }

    pub fn submit(&mut self, order: SimulatedOrderRequest) -> Result<(), OrderError> {
        order.validate()?;
        self.order = Some(order);
        Ok(())
    }

    fn reset_feed(&mut self) {
        self.book = OrderBookSnapshot::default();
        self.order = None;
        self.status = FeedStatus::Connecting;
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
