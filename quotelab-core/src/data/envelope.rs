//! Wire envelope of the token-authenticated HTTP provider.
//!
//! Every API (daily bars, trading calendar) shares one envelope: a POST of
//! `{api_name, token, params, fields}` answered by
//! `{code, msg, data: {fields: [...], items: [[...]]}}`. Rows are positional;
//! `FieldMap` resolves column names to indices so row decoding stays
//! order-independent.

use super::provider::DataError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    api_name: &'a str,
    token: &'a str,
    params: serde_json::Value,
    fields: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    pub code: i64,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<ApiData>,
}

/// The `data` payload: column names plus positional rows.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiData {
    pub fields: Vec<String>,
    pub items: Vec<Vec<serde_json::Value>>,
}

impl ApiResponse {
    fn into_data(self, api_name: &str) -> Result<ApiData, DataError> {
        if self.code != 0 {
            return Err(DataError::BadEnvelope(format!(
                "{api_name}: provider code {} ({})",
                self.code,
                self.msg.unwrap_or_default()
            )));
        }
        self.data
            .ok_or_else(|| DataError::BadEnvelope(format!("{api_name}: missing data payload")))
    }
}

/// Column-name to row-index mapping for positional rows.
pub struct FieldMap {
    index: HashMap<String, usize>,
}

impl FieldMap {
    pub fn new(fields: &[String]) -> Self {
        let index = fields
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self { index }
    }

    /// Text value of a column; numbers are rendered as their decimal form.
    pub fn text(&self, row: &[serde_json::Value], name: &str) -> Option<String> {
        match self.value(row, name)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Numeric value of a column, coercing numeric strings.
    pub fn number(&self, row: &[serde_json::Value], name: &str) -> Option<f64> {
        match self.value(row, name)? {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    fn value<'a>(&self, row: &'a [serde_json::Value], name: &str) -> Option<&'a serde_json::Value> {
        row.get(*self.index.get(name)?)
    }
}

/// Blocking HTTP client for the envelope, with bounded timeout and a small
/// fixed number of retries with linear backoff. Only transport and HTTP-status
/// failures are retried; a malformed envelope fails immediately.
pub struct ApiClient {
    client: reqwest::blocking::Client,
    base_url: String,
    max_retries: u32,
    base_delay: Duration,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        max_retries: u32,
        base_delay: Duration,
    ) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            base_url: base_url.into(),
            max_retries,
            base_delay,
        }
    }

    /// Call one API and validate the envelope down to its `data` payload.
    pub fn call(
        &self,
        token: &str,
        api_name: &str,
        params: serde_json::Value,
        fields: &str,
    ) -> Result<ApiData, DataError> {
        let request = ApiRequest {
            api_name,
            token,
            params,
            fields,
        };

        let mut last_error = None;
        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                std::thread::sleep(self.base_delay * attempt);
            }

            match self.client.post(&self.base_url).json(&request).send() {
                Ok(resp) => {
                    let status = resp.status();
                    if !status.is_success() {
                        last_error = Some(DataError::Http(format!("HTTP {status} from {api_name}")));
                        continue;
                    }
                    let envelope: ApiResponse = resp.json().map_err(|e| {
                        DataError::BadEnvelope(format!("failed to parse {api_name} response: {e}"))
                    })?;
                    return envelope.into_data(api_name);
                }
                Err(e) => {
                    if e.is_connect() || e.is_timeout() {
                        last_error = Some(DataError::Http(e.to_string()));
                        continue;
                    }
                    return Err(DataError::Http(e.to_string()));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| DataError::Http(format!("{api_name}: max retries exceeded"))))
    }
}
