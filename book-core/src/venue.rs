use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

// ============================================================================
// Venues - Where the feed layer sources books from
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum Venue {
    #[default]
    Okx,
    Bybit,
    Deribit,
}

impl Venue {
    pub fn all() -> impl Iterator<Item = Venue> {
        [Venue::Okx, Venue::Bybit, Venue::Deribit].into_iter()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Venue::Okx => "OKX",
            Venue::Bybit => "BYBIT",
            Venue::Deribit => "DERIBIT",
        }
    }

    /// Instruments offered in the symbol picker, in display order.
    pub fn symbols(&self) -> &'static [&'static str] {
        match self {
            Venue::Okx => &["BTC-USDT", "ETH-USDT", "SOL-USDT"],
            Venue::Bybit => &["BTCUSDT", "ETHUSDT", "SOLUSDT"],
            Venue::Deribit => &["BTC-PERPETUAL", "ETH-PERPETUAL", "SOL-PERPETUAL"],
        }
    }

    pub fn default_symbol(&self) -> &'static str {
        self.symbols()[0]
    }

    pub fn supports(&self, symbol: &str) -> bool {
        self.symbols().contains(&symbol)
    }

    /// Public book feed endpoint.
    pub fn feed_url(&self) -> &'static str {
        match self {
            Venue::Okx => "wss://ws.okx.com:8443/ws/v5/public",
            Venue::Bybit => "wss://stream.bybit.com/v5/public/spot",
            Venue::Deribit => "wss://www.deribit.com/ws/api/v2",
        }
    }
}
