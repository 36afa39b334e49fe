// =============================================================================
// Shared types used across the daily signal report
// =============================================================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily bar for a single symbol. Only `close` feeds the indicators;
/// the other columns may be missing upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
    pub volume: Option<f64>,
}

/// Which side of its reference line a moving quantity currently sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrossState {
    Bullish,
    Bearish,
}

impl CrossState {
    /// `Bullish` when `fast` is strictly above `slow`, `Bearish` otherwise.
    pub fn from_comparison(fast: f64, slow: f64) -> Self {
        if fast > slow {
            Self::Bullish
        } else {
            Self::Bearish
        }
    }

    pub fn is_bullish(self) -> bool {
        self == Self::Bullish
    }
}

impl std::fmt::Display for CrossState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bullish => write!(f, "bullish"),
            Self::Bearish => write!(f, "bearish"),
        }
    }
}

/// Categorical recommendation emitted per symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Hold,
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Hold => write!(f, "HOLD"),
        }
    }
}

/// Fundamental metrics attached to every record. Not sourced yet, so both
/// fields serialise as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fundamentals {
    #[serde(rename = "PE")]
    pub pe: Option<f64>,
    #[serde(rename = "ROE")]
    pub roe: Option<f64>,
}
