// =============================================================================
// Market Data — daily price history sources
// =============================================================================

pub mod yahoo;

use anyhow::Result;

use crate::types::PriceBar;

pub use yahoo::YahooClient;

/// Supplier of daily OHLCV history for a symbol.
///
/// An empty `Vec` is a valid answer (unknown or delisted ticker); the
/// pipeline decides what to do with it.
pub trait PriceSource {
    /// Fetch the configured trailing window of bars, ascending by date.
    async fn fetch_daily(&self, symbol: &str) -> Result<Vec<PriceBar>>;
}
