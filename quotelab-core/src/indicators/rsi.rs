//! Relative Strength Index, two variants.
//!
//! Both derive from per-step gains and losses with `gain[0] = loss[0] = 0`:
//! - smoothed: EMA of gains and losses over the period span;
//! - windowed: degrading-window simple means of gains and losses.
//!
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss), and exactly 100 whenever the
//! average loss is 0 (a flat or purely rising window is fully overbought).

use super::ema::ema;
use super::ma::rolling_mean;

/// Per-step gain and loss series. Index 0 has no predecessor, so both are 0.
pub fn gains_losses(close: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let n = close.len();
    let mut gains = vec![0.0; n];
    let mut losses = vec![0.0; n];
    for i in 1..n {
        let delta = close[i] - close[i - 1];
        if delta > 0.0 {
            gains[i] = delta;
        } else {
            losses[i] = -delta;
        }
    }
    (gains, losses)
}

/// Smoothed RSI: exponential averages of gains and losses.
pub fn rsi_smoothed(close: &[f64], period: usize) -> Vec<f64> {
    let (gains, losses) = gains_losses(close);
    let avg_gain = ema(&gains, period);
    let avg_loss = ema(&losses, period);
    avg_gain
        .iter()
        .zip(&avg_loss)
        .map(|(&g, &l)| rsi_value(g, l))
        .collect()
}

/// Windowed RSI: degrading-window simple means of gains and losses.
pub fn rsi_windowed(close: &[f64], period: usize) -> Vec<f64> {
    let (gains, losses) = gains_losses(close);
    let avg_gain = rolling_mean(&gains, period);
    let avg_loss = rolling_mean(&losses, period);
    avg_gain
        .iter()
        .zip(&avg_loss)
        .map(|(&g, &l)| rsi_value(g, l))
        .collect()
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}
