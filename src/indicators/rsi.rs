// =============================================================================
// Relative Strength Index (RSI) — rolling-mean variant
// =============================================================================
//
// Step 1 — Price changes (deltas) from consecutive closes. The first close
//          has no delta.
// Step 2 — Split into gains (positive deltas) and losses (magnitude of the
//          negative deltas).
// Step 3 — Simple rolling mean of gains and losses over `period` deltas.
//          No Wilder smoothing after the seed window: every value is a
//          fresh mean of its own window.
// Step 4 — RS  = mean_gain / mean_loss
//          RSI = 100 - 100 / (1 + RS), or 100 when mean_loss is zero.
// =============================================================================

/// Compute the RSI series for `closes` over `period` deltas.
///
/// The result is index-aligned with `closes`. Index 0 has no delta, so the
/// first defined value is at index `period`; everything before it is `None`.
///
/// # Edge cases
/// - `period == 0` => all `None`
/// - `closes.len() <= period` => all `None`
/// - mean loss of zero => 100.0 (covers flat windows as well)
/// - non-finite results => `None`
pub fn calculate_rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; closes.len()];
    if period == 0 || closes.len() <= period {
        return result;
    }

    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
    let period_f = period as f64;

    for (offset, window) in deltas.windows(period).enumerate() {
        let (sum_gain, sum_loss) = window.iter().fold((0.0_f64, 0.0_f64), |(g, l), &d| {
            if d > 0.0 {
                (g + d, l)
            } else {
                (g, l - d)
            }
        });

        result[offset + period] = rsi_from_means(sum_gain / period_f, sum_loss / period_f);
    }

    result
}

/// Most recent RSI value, if the series has one.
pub fn current_rsi(closes: &[f64], period: usize) -> Option<f64> {
    calculate_rsi(closes, period).last().copied().flatten()
}

fn rsi_from_means(mean_gain: f64, mean_loss: f64) -> Option<f64> {
    let rsi = if mean_loss == 0.0 {
        100.0
    } else {
        let rs = mean_gain / mean_loss;
        100.0 - 100.0 / (1.0 + rs)
    };

    rsi.is_finite().then_some(rsi)
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn ascending(n: usize) -> Vec<f64> {
        (1..=n).map(|x| x as f64).collect()
    }

    #[test]
    fn rsi_empty_input() {
        assert!(calculate_rsi(&[], 14).is_empty());
    }

    #[test]
    fn rsi_period_zero() {
        assert_eq!(calculate_rsi(&[1.0, 2.0], 0), vec![None, None]);
    }

    #[test]
    fn rsi_insufficient_data_is_all_none() {
        let series = calculate_rsi(&ascending(14), 14);
        assert_eq!(series.len(), 14);
        assert!(series.iter().all(Option::is_none));
    }

    #[test]
    fn rsi_prefix_then_defined() {
        let series = calculate_rsi(&ascending(30), 14);
        assert_eq!(series.len(), 30);
        assert!(series[..14].iter().all(Option::is_none));
        assert!(series[14..].iter().all(Option::is_some));
    }

    #[test]
    fn rsi_all_gains_is_100() {
        let series = calculate_rsi(&ascending(30), 14);
        for v in series.into_iter().flatten() {
            assert!((v - 100.0).abs() < 1e-10, "expected 100.0, got {v}");
        }
    }

    #[test]
    fn rsi_flat_market_is_100() {
        // Mean loss is zero, so RSI is pinned to 100 rather than undefined.
        let series = calculate_rsi(&[50.0; 20], 14);
        assert_eq!(series[19], Some(100.0));
    }

    #[test]
    fn rsi_all_losses_is_0() {
        let closes: Vec<f64> = (1..=30).rev().map(|x| x as f64).collect();
        let v = current_rsi(&closes, 14).unwrap();
        assert!(v.abs() < 1e-10);
    }

    #[test]
    fn rsi_balanced_moves_is_50() {
        // Alternating +1 / -1 => equal mean gain and mean loss.
        let closes = vec![10.0, 11.0, 10.0, 11.0, 10.0];
        let series = calculate_rsi(&closes, 2);
        assert!(series[..2].iter().all(Option::is_none));
        for v in series[2..].iter().flatten() {
            assert!((v - 50.0).abs() < 1e-10);
        }
    }

    #[test]
    fn rsi_uses_plain_window_mean() {
        // Window of 4 deltas: +2, -1, +1, -2 => gain 3/4, loss 3/4 => 50.
        // Then +4 enters, +2 drops: -1, +1, -2, +4 => gain 5/4, loss 3/4.
        let closes = vec![10.0, 12.0, 11.0, 12.0, 10.0, 14.0];
        let series = calculate_rsi(&closes, 4);
        assert!((series[4].unwrap() - 50.0).abs() < 1e-10);
        let expected = 100.0 - 100.0 / (1.0 + 5.0 / 3.0);
        assert!((series[5].unwrap() - expected).abs() < 1e-10);
    }

    #[test]
    fn rsi_range_check() {
        let closes = vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08,
            45.89, 46.03, 44.18, 44.22, 44.57, 43.42, 42.66, 43.13,
        ];
        for v in calculate_rsi(&closes, 14).into_iter().flatten() {
            assert!((0.0..=100.0).contains(&v), "RSI {v} out of range");
        }
    }
}
