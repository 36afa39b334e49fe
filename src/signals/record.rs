// =============================================================================
// Signal Record — one immutable row of the daily report
// =============================================================================
//
// Field order here is the JSON key order in `signals.json`.

use serde::{Deserialize, Serialize};

use crate::types::{CrossState, Fundamentals, Signal};

use super::rule::derive_signal;
use super::scoring::{round2, Scores};
use super::snapshot::IndicatorSnapshot;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    pub symbol: String,
    pub score_short: f64,
    pub score_medium: f64,
    pub score_long: f64,
    pub signal: Signal,
    pub rsi: Option<f64>,
    pub macd_cross: Option<CrossState>,
    pub ema_cross: Option<CrossState>,
    pub fundamentals: Fundamentals,
}

impl SignalRecord {
    /// Score the snapshot, apply the rule and round for publication.
    pub fn from_snapshot(symbol: impl Into<String>, snapshot: &IndicatorSnapshot) -> Self {
        let scores = Scores::from_snapshot(snapshot);
        let signal = derive_signal(snapshot.rsi, snapshot.macd_cross, snapshot.ema_cross);

        Self {
            symbol: symbol.into(),
            score_short: round2(scores.short),
            score_medium: round2(scores.medium),
            score_long: round2(scores.long),
            signal,
            rsi: snapshot.rsi.map(round2),
            macd_cross: snapshot.macd_cross,
            ema_cross: snapshot.ema_cross,
            fundamentals: Fundamentals::default(),
        }
    }

    pub fn is_buy(&self) -> bool {
        self.signal == Signal::Buy
    }
}
