//! Quote provider trait and structured error types.
//!
//! The `QuoteProvider` trait abstracts over bar sources (token-authenticated
//! HTTP API, out-of-process analytics job) so the acquirer can try an ordered
//! list of them and tests can script them. Providers return raw rows; the
//! acquirer owns normalization into the one canonical bar shape.

use crate::domain::TradingRange;
use chrono::NaiveDate;
use thiserror::Error;

/// Raw daily row from a provider, before normalization.
///
/// `open`..`close` are required — providers drop rows missing a parseable
/// date or any OHLC value before returning. The derived fields stay optional
/// here; the acquirer fills absent ones from the previous row's close.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDailyRow {
    pub trade_date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub pre_close: Option<f64>,
    pub change: Option<f64>,
    pub pct_change: Option<f64>,
    pub volume: f64,
    pub amount: f64,
}

/// Structured error types for the data layer.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("no credential configured for {0}")]
    MissingCredential(String),

    #[error("http error: {0}")]
    Http(String),

    #[error("malformed provider response: {0}")]
    BadEnvelope(String),

    #[error("analytics job failed: {0}")]
    JobFailed(String),

    #[error("provider '{provider}' returned no usable rows")]
    EmptySeries { provider: String },

    #[error("all quote providers failed: {}", format_reasons(.reasons))]
    AllProvidersFailed { reasons: Vec<(String, String)> },
}

fn format_reasons(reasons: &[(String, String)]) -> String {
    reasons
        .iter()
        .map(|(provider, reason)| format!("[{provider}] {reason}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Trait for daily-bar providers, tried in a strict fallback order.
///
/// Adding a provider means adding an implementation to the acquirer's list —
/// the fallback control flow itself never changes.
pub trait QuoteProvider: Send + Sync {
    /// Short tag used in fallback diagnostics (e.g., "primary").
    fn name(&self) -> &str;

    /// Fetch raw daily rows for a symbol over a resolved trading range.
    fn fetch_raw(&self, symbol: &str, range: &TradingRange) -> Result<Vec<RawDailyRow>, DataError>;
}
