use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use crate::error::OrderError;

pub type Price = f64;
pub type Quantity = f64;

// ============================================================================
// Book - Resting liquidity as delivered by the feed normalizer
// ============================================================================

/// A single resting quantity at a price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct PriceLevel {
    pub price: Price,
    pub size: Quantity,
}

impl PriceLevel {
    pub fn new(price: Price, size: Quantity) -> Self {
        Self { price, size }
    }
}

/// Two-sided book snapshot. Replaced wholesale on every feed update.
///
/// Bids arrive best-first (descending). Asks arrive worst-first, so the
/// best ask sits at the end of the vector. Nothing downstream relies on
/// either ordering: see `book.rs` for the touch-outward accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct OrderBookSnapshot {
    pub bids: Vec<PriceLevel>,
    pub asks: Vec<PriceLevel>,
}

// ============================================================================
// Orders - Hypothetical, never-executed requests from the control panel
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "Buy",
            Side::Sell => "Sell",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum OrderType {
    Market,
    Limit,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Market => "Market",
            OrderType::Limit => "Limit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct SimulatedOrderRequest {
    pub order_type: OrderType,
    pub side: Side,
    /// Only meaningful for limit orders.
    pub price: Price,
    pub quantity: Quantity,
    /// Presentation metadata. Has no effect on any computed metric.
    #[serde(default)]
    pub delay: String,
}

impl SimulatedOrderRequest {
    pub fn market(side: Side, quantity: Quantity) -> Self {
        Self {
            order_type: OrderType::Market,
            side,
            price: 0.0,
            quantity,
            delay: "0".to_string(),
        }
    }

    pub fn limit(side: Side, price: Price, quantity: Quantity) -> Self {
        Self {
            order_type: OrderType::Limit,
            side,
            price,
            quantity,
            delay: "0".to_string(),
        }
    }

    pub fn is_limit(&self) -> bool {
        self.order_type == OrderType::Limit
    }

    /// Submission rule of the order form: positive quantity, and a positive
    /// price when the order is a limit.
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.quantity.is_nan() {
            return Err(OrderError::NonNumeric { field: "quantity" });
        }
        if self.quantity <= 0.0 {
            return Err(OrderError::NonPositiveQuantity(self.quantity));
        }
        if self.is_limit() {
            if self.price.is_nan() {
                return Err(OrderError::NonNumeric { field: "price" });
            }
            if self.price <= 0.0 {
                return Err(OrderError::InvalidLimitPrice(self.price));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Derived outputs - Recomputed from scratch on every change
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    pub fill_percent: f64,
    pub slippage_percent: f64,
    pub impact_percent: f64,
    pub avg_fill_price: Price,
    pub filled_quantity: Quantity,
    pub warning: Option<String>,
}

/// A price level decorated for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedLevel {
    pub price: Price,
    pub size: Quantity,
    pub cumulative: Quantity,
    pub depth_percent: f64,
    pub is_simulated: bool,
}

impl AnnotatedLevel {
    /// Marker row for a simulated order. Depth is deliberately left at zero.
    pub fn simulated(price: Price, size: Quantity) -> Self {
        Self {
            price,
            size,
            cumulative: 0.0,
            depth_percent: 0.0,
            is_simulated: true,
        }
    }
}
