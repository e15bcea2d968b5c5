use thiserror::Error;

/// Rejections raised when a simulated order is submitted.
///
/// The estimation, aggregation and annotation paths never return these: they
/// fall back to defined values instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrderError {
    #[error("Quantity must be greater than zero (got {0})")]
    NonPositiveQuantity(f64),

    #[error("Limit orders need a price greater than zero (got {0})")]
    InvalidLimitPrice(f64),

    #[error("Field `{field}` is not a number")]
    NonNumeric { field: &'static str },
}

/// Failures while taking input from the feed layer.
#[derive(Error, Debug)]
pub enum BookError {
    #[error("Malformed book payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{venue} does not list symbol {symbol}")]
    UnknownSymbol { venue: &'static str, symbol: String },
}
