use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

// === CONSTANTS ===

/// Rows shown per side of the order-book panel.
pub const MAX_LEVELS: usize = 15;
/// Levels per side fed into the depth chart.
pub const CHART_LEVELS: usize = 50;
/// Slippage above this percentage raises a warning.
pub const SLIPPAGE_WARNING_PCT: f64 = 1.0;
/// Market impact above this percentage raises a warning.
pub const IMPACT_WARNING_PCT: f64 = 1.0;

/// Display and warning knobs for the dashboard.
///
/// Missing fields deserialize to their defaults, so the browser can pass a
/// partial object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(default, rename_all = "camelCase")]
pub struct BookConfig {
    /// Level cap applied to each side of the book panel, after insertion of
    /// the simulated row.
    pub max_levels: usize,
    /// Levels per side used to draw the depth chart.
    pub chart_levels: usize,
    pub slippage_warning_pct: f64,
    pub impact_warning_pct: f64,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            max_levels: MAX_LEVELS,
            chart_levels: CHART_LEVELS,
            slippage_warning_pct: SLIPPAGE_WARNING_PCT,
            impact_warning_pct: IMPACT_WARNING_PCT,
        }
    }
}
