//! Rolling mean with a degrading window.
//!
//! `rolling_mean(x, w)[i]` is the mean of `x[max(0, i-w+1) ..= i]`: before
//! index w-1 the window shrinks to what exists, so the output is defined at
//! every index.

/// Rolling mean of `values` over a trailing window of at most `window` points.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    assert!(window >= 1, "window must be >= 1");
    let mut result = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for i in 0..values.len() {
        sum += values[i];
        if i >= window {
            sum -= values[i - window];
        }
        let count = (i + 1).min(window);
        result.push(sum / count as f64);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn degrading_window_before_full_width() {
        let result = rolling_mean(&[10.0, 11.0, 12.0, 13.0, 14.0], 3);
        assert_approx(result[0], 10.0, DEFAULT_EPSILON);
        assert_approx(result[1], 10.5, DEFAULT_EPSILON);
        assert_approx(result[2], 11.0, DEFAULT_EPSILON);
        assert_approx(result[3], 12.0, DEFAULT_EPSILON);
        assert_approx(result[4], 13.0, DEFAULT_EPSILON);
    }

    #[test]
    fn window_1_is_identity() {
        let values = [100.0, 200.0, 300.0];
        let result = rolling_mean(&values, 1);
        assert_eq!(result, values.to_vec());
    }

    #[test]
    fn window_wider_than_series_is_prefix_mean() {
        let result = rolling_mean(&[10.0, 20.0], 5);
        assert_approx(result[0], 10.0, DEFAULT_EPSILON);
        assert_approx(result[1], 15.0, DEFAULT_EPSILON);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(rolling_mean(&[], 20).is_empty());
    }
}
