// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free indicator functions over a close-price series.
// Outputs are index-aligned with the input: positions without enough history
// are `None` rather than being dropped, so callers can read `.last()` and
// know it refers to the most recent bar.

pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;
