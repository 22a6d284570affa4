//! Fallback orchestration over an ordered list of quote providers.
//!
//! Providers are tried strictly in sequence — the later legs are fallbacks,
//! not races. A leg fails when it errors or when it yields zero usable rows;
//! the reason is remembered and the next leg is tried. Only when every leg
//! has failed does the acquirer surface one combined error naming each leg.

use super::provider::{DataError, QuoteProvider, RawDailyRow};
use crate::domain::{DailyBar, TradingRange};
use log::{debug, warn};

pub struct DailySeriesAcquirer {
    providers: Vec<Box<dyn QuoteProvider>>,
}

impl DailySeriesAcquirer {
    pub fn new(providers: Vec<Box<dyn QuoteProvider>>) -> Self {
        Self { providers }
    }

    /// Fetch and normalize daily bars, trying each provider in order.
    ///
    /// Fails only when every provider is unusable. A winning provider's rows
    /// are sorted ascending by trade date, deduplicated (last row wins), and
    /// completed into the canonical bar shape.
    pub fn fetch(&self, symbol: &str, range: &TradingRange) -> Result<Vec<DailyBar>, DataError> {
        let mut reasons: Vec<(String, String)> = Vec::new();

        for provider in &self.providers {
            let name = provider.name().to_string();
            match provider.fetch_raw(symbol, range) {
                Ok(rows) if !rows.is_empty() => {
                    debug!("provider '{name}' returned {} rows for {symbol}", rows.len());
                    return Ok(normalize(symbol, rows));
                }
                Ok(_) => {
                    let reason = DataError::EmptySeries { provider: name.clone() }.to_string();
                    warn!("{reason}; trying next provider");
                    reasons.push((name, reason));
                }
                Err(e) => {
                    warn!("provider '{name}' failed for {symbol}: {e}; trying next provider");
                    reasons.push((name, e.to_string()));
                }
            }
        }

        Err(DataError::AllProvidersFailed { reasons })
    }
}

/// Sort ascending, keep the last row per trade date, and complete the
/// derived fields absent from the raw rows.
///
/// `pre_close` defaults to the previous row's close, and to the row's own
/// close for the first row (so its change is 0). `change`/`pct_change` are
/// recomputed from that default when the provider left them out.
pub(crate) fn normalize(symbol: &str, mut rows: Vec<RawDailyRow>) -> Vec<DailyBar> {
    rows.sort_by_key(|r| r.trade_date);

    let mut deduped: Vec<RawDailyRow> = Vec::with_capacity(rows.len());
    for row in rows {
        match deduped.last_mut() {
            Some(prev) if prev.trade_date == row.trade_date => *prev = row,
            _ => deduped.push(row),
        }
    }

    let mut bars = Vec::with_capacity(deduped.len());
    let mut prev_close: Option<f64> = None;
    for row in deduped {
        let pre_close = row.pre_close.or(prev_close).unwrap_or(row.close);
        let change = row.change.unwrap_or(row.close - pre_close);
        let pct_change = match row.pct_change {
            Some(pct) => pct,
            None if pre_close != 0.0 => change / pre_close * 100.0,
            None => 0.0,
        };
        prev_close = Some(row.close);
        bars.push(DailyBar {
            symbol: symbol.to_string(),
            trade_date: row.trade_date,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            pre_close,
            change,
            pct_change,
            volume: row.volume,
            amount: row.amount,
        });
    }
    bars
}
