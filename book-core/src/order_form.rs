use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use crate::error::OrderError;
use crate::types::{OrderBookSnapshot, OrderType, Price, Side, SimulatedOrderRequest};

/// Order entry as typed into the control panel, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct OrderForm {
    pub order_type: OrderType,
    pub side: Side,
    pub price: String,
    pub quantity: String,
    pub delay: String,
}

impl Default for OrderForm {
    fn default() -> Self {
        Self {
            order_type: OrderType::Limit,
            side: Side::Buy,
            price: String::new(),
            quantity: String::new(),
            delay: "0".to_string(),
        }
    }
}

impl OrderForm {
    /// Turn the typed form into a request. Market orders ignore the price box
    /// and carry a price of 0.
    pub fn parse(&self) -> Result<SimulatedOrderRequest, OrderError> {
        let price = match self.order_type {
            OrderType::Limit => parse_number(&self.price, "price")?,
            OrderType::Market => 0.0,
        };
        let quantity = parse_number(&self.quantity, "quantity")?;

        let order = SimulatedOrderRequest {
            order_type: self.order_type,
            side: self.side,
            price,
            quantity,
            delay: self.delay.clone(),
        };
        order.validate()?;
        Ok(order)
    }

    /// Pre-fill the price box from the current touch, if there is one.
    pub fn prefill_price(&mut self, book: &OrderBookSnapshot) {
        if let Some(price) = suggested_limit_price(book, self.side) {
            self.price = price.to_string();
        }
    }
}

/// Default limit price for a new order: the best ask for a buy, the best bid
/// for a sell.
pub fn suggested_limit_price(book: &OrderBookSnapshot, side: Side) -> Option<Price> {
    book.touch(side.opposing_side())
}

fn parse_number(text: &str, field: &'static str) -> Result<f64, OrderError> {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(OrderError::NonNumeric { field }),
    }
}
