//! Indicator mathematics.
//!
//! Every function here is pure and total: for an input series of length n it
//! returns a series of length n with a defined value at every index. Window
//! statistics use all available points when fewer than the nominal window
//! exist (degrading window), so there is no NaN warmup region — downstream
//! consumers always read the latest bar's indicators and rely on that
//! non-null contract.

pub mod bollinger;
pub mod ema;
pub mod engine;
pub mod ma;
pub mod macd;
pub mod rsi;

pub use bollinger::{bollinger, position_pct, BollingerSeries};
pub use ema::ema;
pub use engine::enrich;
pub use ma::rolling_mean;
pub use macd::{macd, MacdSeries};
pub use rsi::{rsi_smoothed, rsi_windowed};

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLC: open = prev close (or close for the first bar),
/// high/low bracket open and close, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<crate::domain::DailyBar> {
    use crate::domain::DailyBar;
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            DailyBar {
                symbol: "TEST".to_string(),
                trade_date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                pre_close: open,
                change: close - open,
                pct_change: if open == 0.0 { 0.0 } else { (close - open) / open * 100.0 },
                volume: 1_000.0,
                amount: 10_000.0,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
