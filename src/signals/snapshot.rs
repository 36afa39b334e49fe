// =============================================================================
// Indicator Snapshot — latest indicator state for one symbol
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::indicators::ema::calculate_ema;
use crate::indicators::macd::{calculate_macd, DEFAULT_FAST, DEFAULT_SIGNAL, DEFAULT_SLOW};
use crate::indicators::rsi::current_rsi;
use crate::indicators::sma::calculate_sma;
use crate::types::CrossState;

pub const RSI_PERIOD: usize = 14;
/// Rolling-mean leg of the trend cross.
pub const TREND_SMA_PERIOD: usize = 50;
/// Exponential leg of the trend cross.
pub const TREND_EMA_SPAN: usize = 200;

/// Most recent indicator readings. Each field is `None` when the series is
/// too short to produce it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub rsi: Option<f64>,
    /// MACD line vs. its signal line.
    pub macd_cross: Option<CrossState>,
    /// 50-period rolling mean vs. 200-span EMA.
    pub ema_cross: Option<CrossState>,
}

impl IndicatorSnapshot {
    #[cfg(test)]
    pub fn new(
        rsi: Option<f64>,
        macd_cross: Option<CrossState>,
        ema_cross: Option<CrossState>,
    ) -> Self {
        Self {
            rsi,
            macd_cross,
            ema_cross,
        }
    }

    /// Compute the snapshot from an ascending series of closes.
    pub fn from_closes(closes: &[f64]) -> Self {
        let rsi = current_rsi(closes, RSI_PERIOD);

        let macd_cross = calculate_macd(closes, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
            .last()
            .filter(|(line, signal)| line.is_finite() && signal.is_finite())
            .map(|(line, signal)| CrossState::from_comparison(line, signal));

        let ma = calculate_sma(closes, TREND_SMA_PERIOD).last().copied().flatten();
        let ema = calculate_ema(closes, TREND_EMA_SPAN)
            .last()
            .copied()
            .filter(|v| v.is_finite());
        let ema_cross = match (ma, ema) {
            (Some(ma), Some(ema)) => Some(CrossState::from_comparison(ma, ema)),
            _ => None,
        };

        Self {
            rsi,
            macd_cross,
            ema_cross,
        }
    }
}
