// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent prices, making it more responsive to new
// information than the Simple Moving Average (SMA).
//
// Formula (recursive form, no bias adjustment):
//   alpha  = 2 / (span + 1)
//   EMA_0  = value_0
//   EMA_t  = value_t * alpha + EMA_{t-1} * (1 - alpha)
//
// Seeding with the first observation means every output position is defined.
// =============================================================================

/// Compute the EMA series for `values` with smoothing derived from `span`.
///
/// The result has the same length as the input.
///
/// # Edge cases
/// - `span == 0` => empty vec (no valid smoothing factor)
/// - empty input => empty vec
pub fn calculate_ema(values: &[f64], span: usize) -> Vec<f64> {
    if span == 0 || values.is_empty() {
        return Vec::new();
    }

    let alpha = 2.0 / (span as f64 + 1.0);

    let mut result = Vec::with_capacity(values.len());
    let mut prev = values[0];
    result.push(prev);

    for &value in &values[1..] {
        let ema = value * alpha + prev * (1.0 - alpha);
        result.push(ema);
        prev = ema;
    }

    result
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ema_empty_input() {
        assert!(calculate_ema(&[], 5).is_empty());
    }

    #[test]
    fn ema_span_zero() {
        assert!(calculate_ema(&[1.0, 2.0, 3.0], 0).is_empty());
    }

    #[test]
    fn ema_seeded_with_first_observation() {
        let ema = calculate_ema(&[7.0], 200);
        assert_eq!(ema, vec![7.0]);
    }

    #[test]
    fn ema_known_values() {
        // span 3 => alpha = 0.5
        let ema = calculate_ema(&[1.0, 2.0, 3.0, 4.0], 3);
        let expected = [1.0, 1.5, 2.25, 3.125];
        assert_eq!(ema.len(), expected.len());
        for (a, b) in ema.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-12, "got {a}, expected {b}");
        }
    }

    #[test]
    fn ema_of_flat_series_is_flat() {
        let ema = calculate_ema(&[100.0; 50], 12);
        assert!(ema.iter().all(|v| (v - 100.0).abs() < 1e-12));
    }

    #[test]
    fn ema_lags_a_rising_series() {
        let closes: Vec<f64> = (1..=100).map(|x| x as f64).collect();
        let ema = calculate_ema(&closes, 10);
        let last = *ema.last().unwrap();
        assert!(last < 100.0);
        assert!(last > 90.0);
    }
}
