//! Secondary quote provider: out-of-process analytics job.
//!
//! The job is spawned once per request; its lifetime is exactly one
//! request/response exchange. One JSON document with
//! `{symbol, start_date, end_date}` goes to its stdin, one JSON document of
//! shape `{"items": [...]}` or `{"error": "..."}` comes back on stdout. A
//! non-zero exit code or malformed output is a hard leg failure, and the leg
//! is never retried.

use super::provider::{DataError, QuoteProvider, RawDailyRow};
use crate::domain::{parse_wire_date, TradingRange};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::process::{Command, Stdio};

#[derive(Debug, Serialize)]
struct JobRequest<'a> {
    symbol: &'a str,
    start_date: String,
    end_date: String,
}

#[derive(Debug, Deserialize)]
struct JobResponse {
    #[serde(default)]
    items: Option<Vec<JobRow>>,
    #[serde(default)]
    error: Option<String>,
}

/// One row from the job. The bridge emits `pre_close`/`change`/`pct_chg` as
/// nullable for the first session of its window; normalization patches them.
#[derive(Debug, Deserialize)]
struct JobRow {
    #[serde(default)]
    trade_date: Option<String>,
    #[serde(default)]
    open: Option<f64>,
    #[serde(default)]
    high: Option<f64>,
    #[serde(default)]
    low: Option<f64>,
    #[serde(default)]
    close: Option<f64>,
    #[serde(default)]
    pre_close: Option<f64>,
    #[serde(default)]
    change: Option<f64>,
    #[serde(default)]
    pct_chg: Option<f64>,
    #[serde(default)]
    vol: Option<f64>,
    #[serde(default)]
    amount: Option<f64>,
}

pub struct SecondaryJobProvider {
    command: Vec<String>,
}

impl SecondaryJobProvider {
    /// `command` is the program followed by its arguments.
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }

    fn run_job(&self, request: &JobRequest<'_>) -> Result<JobResponse, DataError> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or_else(|| DataError::JobFailed("no job command configured".into()))?;

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| DataError::JobFailed(format!("failed to spawn '{program}': {e}")))?;

        let payload = serde_json::to_vec(request)
            .map_err(|e| DataError::JobFailed(format!("failed to encode job request: {e}")))?;

        // Closing stdin signals end-of-input to the job.
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| DataError::JobFailed("job stdin unavailable".into()))?;
        stdin
            .write_all(&payload)
            .map_err(|e| DataError::JobFailed(format!("failed to write job request: {e}")))?;
        drop(stdin);

        let output = child
            .wait_with_output()
            .map_err(|e| DataError::JobFailed(format!("failed to collect job output: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DataError::JobFailed(format!(
                "exit status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        serde_json::from_slice(&output.stdout)
            .map_err(|e| DataError::JobFailed(format!("malformed job output: {e}")))
    }
}

impl QuoteProvider for SecondaryJobProvider {
    fn name(&self) -> &str {
        "secondary"
    }

    fn fetch_raw(&self, symbol: &str, range: &TradingRange) -> Result<Vec<RawDailyRow>, DataError> {
        let request = JobRequest {
            symbol,
            start_date: range.start_wire(),
            end_date: range.end_wire(),
        };
        let response = self.run_job(&request)?;

        if let Some(error) = response.error {
            return Err(DataError::JobFailed(error));
        }
        let items = response
            .items
            .ok_or_else(|| DataError::JobFailed("job output missing 'items'".into()))?;

        Ok(items.into_iter().filter_map(row_to_raw).collect())
    }
}

fn row_to_raw(row: JobRow) -> Option<RawDailyRow> {
    let trade_date = parse_wire_date(row.trade_date.as_deref()?)?;
    Some(RawDailyRow {
        trade_date,
        open: row.open?,
        high: row.high?,
        low: row.low?,
        close: row.close?,
        pre_close: row.pre_close,
        change: row.change,
        pct_change: row.pct_chg,
        volume: row.vol.unwrap_or(0.0),
        amount: row.amount.unwrap_or(0.0),
    })
}
