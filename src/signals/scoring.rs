// =============================================================================
// Horizon Scores
// =============================================================================
//
// Deliberately simple heuristics; tune freely.
//
//   short  = (100 - RSI) / 10          (5 when RSI is unavailable)
//   medium = short  ± 1                (+1 when MACD cross is bullish)
//   long   = medium ± 1                (+1 when MA/EMA cross is bullish)

use serde::{Deserialize, Serialize};

use crate::types::CrossState;

use super::snapshot::IndicatorSnapshot;

pub const NEUTRAL_SHORT_SCORE: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub short: f64,
    pub medium: f64,
    pub long: f64,
}

impl Scores {
    pub fn from_snapshot(snapshot: &IndicatorSnapshot) -> Self {
        let short = snapshot
            .rsi
            .map(|rsi| (100.0 - rsi) / 10.0)
            .unwrap_or(NEUTRAL_SHORT_SCORE);
        let medium = short + cross_adjustment(snapshot.macd_cross);
        let long = medium + cross_adjustment(snapshot.ema_cross);

        Self { short, medium, long }
    }
}

fn cross_adjustment(cross: Option<CrossState>) -> f64 {
    if cross.is_some_and(CrossState::is_bullish) {
        1.0
    } else {
        -1.0
    }
}

/// Two-decimal rounding of the exact binary value; ties go to even.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
