//! The enrichment entry point: bars in, indicator bars out.

use super::bollinger::bollinger;
use super::ma::rolling_mean;
use super::macd::macd;
use super::rsi::{rsi_smoothed, rsi_windowed};
use crate::domain::{DailyBar, IndicatorBar};

pub const MA_SHORT: usize = 5;
pub const MA_MEDIUM: usize = 10;
pub const MA_LONG: usize = 20;
pub const MA_QUARTER: usize = 60;

pub const RSI_FAST: usize = 6;
pub const RSI_MEDIUM: usize = 12;
pub const RSI_SLOW: usize = 24;
pub const RSI_WINDOWED: usize = 14;

pub const BOLL_WINDOW: usize = 20;
pub const BOLL_MULTIPLIER: f64 = 2.0;

/// Enrich an ascending bar series with the canonical derived indicators.
///
/// Pure and deterministic: one output element per input element, every
/// derived field defined at every index. The input must already be sorted
/// ascending by trade date (the acquirer guarantees this).
pub fn enrich(bars: &[DailyBar]) -> Vec<IndicatorBar> {
    let close: Vec<f64> = bars.iter().map(|b| b.close).collect();

    let ma5 = rolling_mean(&close, MA_SHORT);
    let ma10 = rolling_mean(&close, MA_MEDIUM);
    let ma20 = rolling_mean(&close, MA_LONG);
    let ma60 = rolling_mean(&close, MA_QUARTER);
    let macd = macd(&close);
    let rsi6 = rsi_smoothed(&close, RSI_FAST);
    let rsi12 = rsi_smoothed(&close, RSI_MEDIUM);
    let rsi24 = rsi_smoothed(&close, RSI_SLOW);
    let rsi14 = rsi_windowed(&close, RSI_WINDOWED);
    let boll = bollinger(&close, BOLL_WINDOW, BOLL_MULTIPLIER);

    bars.iter()
        .enumerate()
        .map(|(i, bar)| IndicatorBar {
            bar: bar.clone(),
            ma5: ma5[i],
            ma10: ma10[i],
            ma20: ma20[i],
            ma60: ma60[i],
            macd_dif: macd.dif[i],
            macd_dea: macd.dea[i],
            macd_hist: macd.hist[i],
            rsi6: rsi6[i],
            rsi12: rsi12[i],
            rsi24: rsi24[i],
            rsi14: rsi14[i],
            boll_mid: boll.mid[i],
            boll_upper: boll.upper[i],
            boll_lower: boll.lower[i],
        })
        .collect()
}
