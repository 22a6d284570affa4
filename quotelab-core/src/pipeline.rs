//! The end-to-end snapshot pipeline.
//!
//! One invocation runs Calendar -> Acquirer -> Engine -> Assembler ->
//! Renderer, strictly in that order; each stage's output is the next stage's
//! only input. The pipeline holds no state across calls, so concurrent
//! invocations for different symbols or dates need no coordination.

use crate::calendar::{resolve_range, HttpTradingCalendar, TradingCalendar};
use crate::config::PipelineConfig;
use crate::data::envelope::ApiClient;
use crate::data::{
    DailySeriesAcquirer, DataError, PrimaryHttpProvider, QuoteProvider, SecondaryJobProvider,
};
use crate::domain::MarketSnapshot;
use crate::indicators::enrich;
use crate::snapshot::{assemble, SnapshotError};
use chrono::NaiveDate;
use log::debug;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

pub struct SnapshotPipeline {
    config: PipelineConfig,
    calendar: Box<dyn TradingCalendar>,
    acquirer: DailySeriesAcquirer,
}

impl std::fmt::Debug for SnapshotPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotPipeline")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SnapshotPipeline {
    /// Build the production pipeline: HTTP calendar, primary HTTP provider,
    /// and (when configured) the out-of-process secondary provider.
    pub fn from_config(config: PipelineConfig) -> Result<Self, PipelineError> {
        if config.token.is_none() && config.secondary_command.is_empty() {
            return Err(PipelineError::Config(
                "no primary credential and no secondary job command configured".into(),
            ));
        }

        let timeout = Duration::from_secs(config.request_timeout_secs);
        let base_delay = Duration::from_millis(config.retry_base_delay_ms);
        let api = || {
            ApiClient::new(
                config.api_base_url.clone(),
                timeout,
                config.max_retries,
                base_delay,
            )
        };

        let calendar = Box::new(HttpTradingCalendar::new(api(), config.token.clone()));

        let mut providers: Vec<Box<dyn QuoteProvider>> = vec![Box::new(PrimaryHttpProvider::new(
            api(),
            config.token.clone(),
        ))];
        if !config.secondary_command.is_empty() {
            providers.push(Box::new(SecondaryJobProvider::new(
                config.secondary_command.clone(),
            )));
        }

        Ok(Self::with_components(config, calendar, providers))
    }

    /// Assemble a pipeline from explicit components. This is the test seam —
    /// scripted calendars and providers plug in here.
    pub fn with_components(
        config: PipelineConfig,
        calendar: Box<dyn TradingCalendar>,
        providers: Vec<Box<dyn QuoteProvider>>,
    ) -> Self {
        Self {
            config,
            calendar,
            acquirer: DailySeriesAcquirer::new(providers),
        }
    }

    /// Run one full invocation for `(symbol, date)`.
    pub fn snapshot(&self, symbol: &str, date: NaiveDate) -> Result<MarketSnapshot, PipelineError> {
        let range = resolve_range(self.calendar.as_ref(), date, self.config.lookback_days);
        debug!("resolved trading range {} to {} for {symbol}", range.start, range.end);

        let bars = self.acquirer.fetch(symbol, &range)?;
        debug!("acquired {} bars for {symbol}", bars.len());

        let enriched = enrich(&bars);
        Ok(assemble(symbol, date, enriched)?)
    }
}
