// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// Plain rolling mean over a fixed window:
//   SMA_t = (close_{t-period+1} + ... + close_t) / period

/// Rolling mean of `values` over `period` points.
///
/// The first `period - 1` entries are `None`. A window whose mean is
/// non-finite (NaN in the input) is also `None`.
pub fn calculate_sma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return result;
    }

    for (offset, window) in values.windows(period).enumerate() {
        let mean = window.iter().sum::<f64>() / period as f64;
        if mean.is_finite() {
            result[offset + period - 1] = Some(mean);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sma_prefix_is_undefined() {
        let sma = calculate_sma(&[1.0, 2.0, 3.0, 4.0], 3);
        assert_eq!(sma.len(), 4);
        assert!(sma[0].is_none());
        assert!(sma[1].is_none());
        assert!((sma[2].unwrap() - 2.0).abs() < 1e-12);
        assert!((sma[3].unwrap() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn sma_short_input_is_all_none() {
        let sma = calculate_sma(&[1.0, 2.0], 5);
        assert_eq!(sma, vec![None, None]);
    }

    #[test]
    fn sma_period_zero() {
        assert_eq!(calculate_sma(&[1.0], 0), vec![None]);
    }

    #[test]
    fn sma_nan_window_is_none() {
        let sma = calculate_sma(&[1.0, f64::NAN, 3.0, 4.0, 5.0], 2);
        assert!(sma[1].is_none());
        assert!(sma[2].is_none());
        assert!((sma[4].unwrap() - 4.5).abs() < 1e-12);
    }
}
