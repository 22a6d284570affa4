//! Primary quote provider: token-authenticated HTTP API.
//!
//! Speaks the shared positional-row envelope. Without a configured token the
//! leg fails immediately with a credential error so the acquirer records the
//! reason and moves on to the next provider.

use super::envelope::{ApiClient, ApiData, FieldMap};
use super::provider::{DataError, QuoteProvider, RawDailyRow};
use crate::domain::{parse_wire_date, TradingRange};
use serde_json::json;

/// Columns requested from the daily-bar API.
pub const DAILY_FIELDS: &str = "trade_date,open,high,low,close,pre_close,change,pct_chg,vol,amount";

pub struct PrimaryHttpProvider {
    api: ApiClient,
    token: Option<String>,
}

impl PrimaryHttpProvider {
    pub fn new(api: ApiClient, token: Option<String>) -> Self {
        Self { api, token }
    }
}

impl QuoteProvider for PrimaryHttpProvider {
    fn name(&self) -> &str {
        "primary"
    }

    fn fetch_raw(&self, symbol: &str, range: &TradingRange) -> Result<Vec<RawDailyRow>, DataError> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| DataError::MissingCredential("primary quote provider".into()))?;

        let data = self.api.call(
            token,
            "daily",
            json!({
                "ts_code": symbol,
                "start_date": range.start_wire(),
                "end_date": range.end_wire(),
            }),
            DAILY_FIELDS,
        )?;

        Ok(rows_from_data(&data))
    }
}

/// Decode positional rows into raw daily rows.
///
/// Rows missing a parseable trade date or any OHLC value are dropped here,
/// before the acquirer's empty-series check counts what is left.
fn rows_from_data(data: &ApiData) -> Vec<RawDailyRow> {
    let map = FieldMap::new(&data.fields);
    data.items
        .iter()
        .filter_map(|row| {
            let trade_date = map.text(row, "trade_date").as_deref().and_then(parse_wire_date)?;
            Some(RawDailyRow {
                trade_date,
                open: map.number(row, "open")?,
                high: map.number(row, "high")?,
                low: map.number(row, "low")?,
                close: map.number(row, "close")?,
                pre_close: map.number(row, "pre_close"),
                change: map.number(row, "change"),
                pct_change: map.number(row, "pct_chg"),
                volume: map.number(row, "vol").unwrap_or(0.0),
                amount: map.number(row, "amount").unwrap_or(0.0),
            })
        })
        .collect()
}
