//! MACD — moving average convergence/divergence.
//!
//! dif = EMA_12(close) - EMA_26(close)
//! dea = EMA_9(dif)
//! hist = 2 * (dif - dea)

use super::ema::ema;

pub const FAST_SPAN: usize = 12;
pub const SLOW_SPAN: usize = 26;
pub const SIGNAL_SPAN: usize = 9;

/// The three MACD component series, each the same length as the input.
#[derive(Debug, Clone)]
pub struct MacdSeries {
    pub dif: Vec<f64>,
    pub dea: Vec<f64>,
    pub hist: Vec<f64>,
}

/// MACD over a close series with the canonical 12/26/9 spans.
pub fn macd(close: &[f64]) -> MacdSeries {
    let fast = ema(close, FAST_SPAN);
    let slow = ema(close, SLOW_SPAN);
    let dif: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
    let dea = ema(&dif, SIGNAL_SPAN);
    let hist = dif.iter().zip(&dea).map(|(d, s)| 2.0 * (d - s)).collect();
    MacdSeries { dif, dea, hist }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn constant_series_is_all_zero() {
        let result = macd(&[50.0; 40]);
        for i in 0..40 {
            assert_approx(result.dif[i], 0.0, DEFAULT_EPSILON);
            assert_approx(result.dea[i], 0.0, DEFAULT_EPSILON);
            assert_approx(result.hist[i], 0.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn rising_series_turns_positive() {
        let close: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let result = macd(&close);
        let last = close.len() - 1;
        // Fast EMA tracks a rising series more closely than the slow EMA.
        assert!(result.dif[last] > 0.0);
        assert!(result.hist[last] > 0.0);
    }

    #[test]
    fn hist_is_twice_the_dif_dea_spread() {
        let close: Vec<f64> = (0..30).map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0).collect();
        let result = macd(&close);
        for i in 0..close.len() {
            assert_approx(
                result.hist[i],
                2.0 * (result.dif[i] - result.dea[i]),
                DEFAULT_EPSILON,
            );
        }
    }

    #[test]
    fn length_preserved() {
        let result = macd(&[1.0, 2.0, 3.0]);
        assert_eq!(result.dif.len(), 3);
        assert_eq!(result.dea.len(), 3);
        assert_eq!(result.hist.len(), 3);
    }
}
