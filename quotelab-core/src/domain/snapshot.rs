//! Enriched bars and the public snapshot result.

use super::bar::DailyBar;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A `DailyBar` extended with the canonical derived indicator fields.
///
/// Every field is defined at every index of an enriched series: window
/// statistics degrade to a shorter window at the start of the series instead
/// of leaving an undefined warmup region. Early-history imprecision is a
/// documented limitation of that contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorBar {
    pub bar: DailyBar,
    pub ma5: f64,
    pub ma10: f64,
    pub ma20: f64,
    pub ma60: f64,
    pub macd_dif: f64,
    pub macd_dea: f64,
    pub macd_hist: f64,
    pub rsi6: f64,
    pub rsi12: f64,
    pub rsi24: f64,
    pub rsi14: f64,
    pub boll_mid: f64,
    pub boll_upper: f64,
    pub boll_lower: f64,
}

/// The public result for one `(symbol, date)` query.
///
/// The latest qualifying bar's values are surfaced as top-level fields;
/// `history` carries the full enriched series up to and including that bar.
/// `price` equals the close of the bar whose trade date is the latest trading
/// day on or before the requested date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub symbol: String,
    pub trade_date: NaiveDate,
    pub price: f64,
    /// Close minus the immediately preceding enriched bar's close (not the
    /// provider's own `pre_close`), for consistency with the displayed history.
    pub change: f64,
    pub change_pct: f64,
    pub ma5: f64,
    pub ma10: f64,
    pub ma20: f64,
    pub ma60: f64,
    pub macd_dif: f64,
    pub macd_dea: f64,
    pub macd_hist: f64,
    pub rsi6: f64,
    pub rsi12: f64,
    pub rsi24: f64,
    pub rsi14: f64,
    pub boll_mid: f64,
    pub boll_upper: f64,
    pub boll_lower: f64,
    /// Position of the close inside the Bollinger band, as a percentage.
    /// Exactly 50 for a zero-width band.
    pub boll_position_pct: f64,
    pub history: Vec<IndicatorBar>,
    pub report: String,
}
