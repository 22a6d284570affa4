//! Snapshot assembly: select the bar for the requested date, validate history
//! sufficiency, and package the latest indicator values with the enriched
//! history and the rendered report.

use crate::domain::{IndicatorBar, MarketSnapshot};
use crate::indicators::position_pct;
use crate::report::render_report;
use chrono::NaiveDate;
use thiserror::Error;

/// Minimum bars up to and including the selected bar. The engine would still
/// produce degraded-window values below this, but a degraded MA20/BOLL is not
/// meaningful enough to report as ground truth.
pub const MIN_HISTORY_BARS: usize = 20;

/// Data-insufficiency errors. These reflect real data scarcity, are never
/// retried, and always surface to the caller.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("no bars acquired for the requested range")]
    EmptyHistory,

    #[error("no bar on or before {0}")]
    NoBarOnOrBefore(NaiveDate),

    #[error("insufficient history: {have} bars up to the selected date, need {need}")]
    InsufficientHistory { have: usize, need: usize },
}

/// Assemble the public snapshot for `(symbol, date)` from an enriched series.
///
/// The series must be sorted ascending. Bars after the requested date are
/// dropped from the returned history — they never leak into the result.
/// `change`/`change_pct` use the immediately preceding enriched bar's close
/// for consistency with the displayed history, not the provider's `pre_close`.
pub fn assemble(
    symbol: &str,
    date: NaiveDate,
    mut enriched: Vec<IndicatorBar>,
) -> Result<MarketSnapshot, SnapshotError> {
    if enriched.is_empty() {
        return Err(SnapshotError::EmptyHistory);
    }

    let idx = enriched
        .iter()
        .rposition(|b| b.bar.trade_date <= date)
        .ok_or(SnapshotError::NoBarOnOrBefore(date))?;

    if idx + 1 < MIN_HISTORY_BARS {
        return Err(SnapshotError::InsufficientHistory {
            have: idx + 1,
            need: MIN_HISTORY_BARS,
        });
    }

    enriched.truncate(idx + 1);
    let latest = enriched[idx].clone();

    let prev_close = enriched[idx - 1].bar.close;
    let change = latest.bar.close - prev_close;
    let change_pct = if prev_close == 0.0 {
        0.0
    } else {
        change / prev_close * 100.0
    };

    let report = render_report(symbol, &enriched);

    Ok(MarketSnapshot {
        symbol: symbol.to_string(),
        trade_date: latest.bar.trade_date,
        price: latest.bar.close,
        change,
        change_pct,
        ma5: latest.ma5,
        ma10: latest.ma10,
        ma20: latest.ma20,
        ma60: latest.ma60,
        macd_dif: latest.macd_dif,
        macd_dea: latest.macd_dea,
        macd_hist: latest.macd_hist,
        rsi6: latest.rsi6,
        rsi12: latest.rsi12,
        rsi24: latest.rsi24,
        rsi14: latest.rsi14,
        boll_mid: latest.boll_mid,
        boll_upper: latest.boll_upper,
        boll_lower: latest.boll_lower,
        boll_position_pct: position_pct(latest.bar.close, latest.boll_upper, latest.boll_lower),
        history: enriched,
        report,
    })
}
