// =============================================================================
// Signal Rule — conjunctive BUY/HOLD gate
// =============================================================================
//
//   BUY  <=>  RSI present AND RSI < 60
//             AND MACD cross bullish
//             AND MA/EMA cross bullish
//   HOLD otherwise.
//
// No weighting: any single failed condition forces HOLD.

use crate::types::{CrossState, Signal};

/// RSI must be strictly below this for a BUY.
pub const BUY_RSI_CEILING: f64 = 60.0;

pub fn derive_signal(
    rsi: Option<f64>,
    macd_cross: Option<CrossState>,
    ema_cross: Option<CrossState>,
) -> Signal {
    let rsi_ok = rsi.is_some_and(|r| r < BUY_RSI_CEILING);
    let macd_ok = macd_cross.is_some_and(CrossState::is_bullish);
    let ema_ok = ema_cross.is_some_and(CrossState::is_bullish);

    if rsi_ok && macd_ok && ema_ok {
        Signal::Buy
    } else {
        Signal::Hold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CrossState::{Bearish, Bullish};

    #[test]
    fn all_conditions_met_is_buy() {
        assert_eq!(derive_signal(Some(55.0), Some(Bullish), Some(Bullish)), Signal::Buy);
    }

    #[test]
    fn rsi_at_or_above_ceiling_is_hold() {
        assert_eq!(derive_signal(Some(60.0), Some(Bullish), Some(Bullish)), Signal::Hold);
        assert_eq!(derive_signal(Some(65.0), Some(Bullish), Some(Bullish)), Signal::Hold);
    }

    #[test]
    fn missing_rsi_is_never_buy() {
        assert_eq!(derive_signal(None, Some(Bullish), Some(Bullish)), Signal::Hold);
    }

    #[test]
    fn any_bearish_cross_is_hold() {
        assert_eq!(derive_signal(Some(40.0), Some(Bearish), Some(Bullish)), Signal::Hold);
        assert_eq!(derive_signal(Some(40.0), Some(Bullish), Some(Bearish)), Signal::Hold);
        assert_eq!(derive_signal(Some(40.0), None, Some(Bullish)), Signal::Hold);
        assert_eq!(derive_signal(Some(40.0), Some(Bullish), None), Signal::Hold);
    }

    #[test]
    fn each_condition_flips_buy_to_hold() {
        let base = (Some(30.0), Some(Bullish), Some(Bullish));
        assert_eq!(derive_signal(base.0, base.1, base.2), Signal::Buy);

        let flips = [
            (Some(75.0), base.1, base.2),
            (None, base.1, base.2),
            (base.0, Some(Bearish), base.2),
            (base.0, base.1, Some(Bearish)),
        ];
        for (rsi, macd, ema) in flips {
            assert_eq!(derive_signal(rsi, macd, ema), Signal::Hold, "{rsi:?} {macd:?} {ema:?}");
        }
    }
}
