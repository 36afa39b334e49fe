// =============================================================================
// Moving Average Convergence / Divergence (MACD)
// =============================================================================
//
//   line      = EMA(close, fast) - EMA(close, slow)
//   signal    = EMA(line, signal)
//   histogram = line - signal

use super::ema::calculate_ema;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

/// The three MACD series, index-aligned with the input closes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Macd {
    pub line: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

impl Macd {
    /// Latest `(line, signal)` pair, if any.
    pub fn last(&self) -> Option<(f64, f64)> {
        Some((*self.line.last()?, *self.signal.last()?))
    }
}

/// Compute MACD line, signal line and histogram.
///
/// Returns empty series for empty input or any zero span.
pub fn calculate_macd(closes: &[f64], fast: usize, slow: usize, signal: usize) -> Macd {
    let fast_ema = calculate_ema(closes, fast);
    let slow_ema = calculate_ema(closes, slow);

    let line: Vec<f64> = fast_ema
        .iter()
        .zip(slow_ema.iter())
        .map(|(f, s)| f - s)
        .collect();

    let signal_line = calculate_ema(&line, signal);
    if signal_line.len() != line.len() {
        return Macd::default();
    }

    let histogram = line
        .iter()
        .zip(signal_line.iter())
        .map(|(l, s)| l - s)
        .collect();

    Macd {
        line,
        signal: signal_line,
        histogram,
    }
}
