//! Bollinger Bands over a degrading trailing window.
//!
//! mid = mean(close, window), upper/lower = mid +/- mult * sigma, where sigma
//! is the population standard deviation (divide by the count, not count - 1).

/// The three band series, each the same length as the input.
#[derive(Debug, Clone)]
pub struct BollingerSeries {
    pub mid: Vec<f64>,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
}

/// Bollinger Bands of `close` over a trailing window of at most `window`
/// points, with `multiplier` standard deviations of band width.
pub fn bollinger(close: &[f64], window: usize, multiplier: f64) -> BollingerSeries {
    assert!(window >= 1, "window must be >= 1");
    let n = close.len();
    let mut mid = Vec::with_capacity(n);
    let mut upper = Vec::with_capacity(n);
    let mut lower = Vec::with_capacity(n);

    for i in 0..n {
        let start = (i + 1).saturating_sub(window);
        let slice = &close[start..=i];
        let count = slice.len() as f64;
        let mean = slice.iter().sum::<f64>() / count;
        let variance = slice
            .iter()
            .map(|v| {
                let diff = v - mean;
                diff * diff
            })
            .sum::<f64>()
            / count;
        let sigma = variance.sqrt();

        mid.push(mean);
        upper.push(mean + multiplier * sigma);
        lower.push(mean - multiplier * sigma);
    }

    BollingerSeries { mid, upper, lower }
}

/// Position of a close inside the band as a percentage of band width.
/// Defaults to exactly 50 for a zero-width band.
pub fn position_pct(close: f64, upper: f64, lower: f64) -> f64 {
    let width = upper - lower;
    if width == 0.0 {
        50.0
    } else {
        (close - lower) / width * 100.0
    }
}
