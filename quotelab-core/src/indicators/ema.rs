//! Exponential moving average.
//!
//! Recursive: `ema[i] = alpha * x[i] + (1 - alpha) * ema[i-1]` with
//! `alpha = 2 / (span + 1)`. Seed: `ema[0] = x[0]` — the first element, not
//! an SMA seed, so the output is defined from index 0 onward.

/// EMA of `values` with the given span.
pub fn ema(values: &[f64], span: usize) -> Vec<f64> {
    assert!(span >= 1, "EMA span must be >= 1");
    let alpha = 2.0 / (span as f64 + 1.0);
    let mut result = Vec::with_capacity(values.len());
    let mut prev = 0.0;
    for (i, &value) in values.iter().enumerate() {
        let next = if i == 0 {
            value
        } else {
            alpha * value + (1.0 - alpha) * prev
        };
        result.push(next);
        prev = next;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn span_1_equals_input() {
        let values = [100.0, 200.0, 300.0];
        assert_eq!(ema(&values, 1), values.to_vec());
    }

    #[test]
    fn span_3_known_values() {
        // alpha = 2/(3+1) = 0.5, seed = first element
        // ema[0] = 10
        // ema[1] = 0.5*11 + 0.5*10 = 10.5
        // ema[2] = 0.5*12 + 0.5*10.5 = 11.25
        // ema[3] = 0.5*13 + 0.5*11.25 = 12.125
        let result = ema(&[10.0, 11.0, 12.0, 13.0], 3);
        assert_approx(result[0], 10.0, DEFAULT_EPSILON);
        assert_approx(result[1], 10.5, DEFAULT_EPSILON);
        assert_approx(result[2], 11.25, DEFAULT_EPSILON);
        assert_approx(result[3], 12.125, DEFAULT_EPSILON);
    }

    #[test]
    fn constant_series_stays_constant() {
        let result = ema(&[7.5; 30], 12);
        for &v in &result {
            assert_approx(v, 7.5, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(ema(&[], 12).is_empty());
    }
}
