// =============================================================================
// Signals Module
// =============================================================================
//
// Turns a close-price series into a per-symbol verdict:
// - Indicator snapshot (latest RSI, MACD cross, MA50/EMA200 cross)
// - Conjunctive BUY/HOLD rule
// - Short / medium / long horizon scores
// - The immutable record that ends up in the report

pub mod record;
pub mod rule;
pub mod scoring;
pub mod snapshot;

pub use record::SignalRecord;
pub use snapshot::IndicatorSnapshot;
