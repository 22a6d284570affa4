//! quotelab core — daily-bar acquisition and indicator pipeline.
//!
//! One invocation resolves the trading-date range for a target date, fetches
//! raw daily bars through a two-tier provider fallback (token-authenticated
//! HTTP API, then an out-of-process analytics job), enriches the series with
//! the canonical indicators (MA, MACD, two RSI variants, Bollinger Bands),
//! and assembles a `MarketSnapshot` with a rendered text report.
//!
//! Stages are strictly sequential and stateless:
//! Calendar -> Acquirer -> Engine -> Assembler -> Renderer.

pub mod calendar;
pub mod config;
pub mod data;
pub mod domain;
pub mod indicators;
pub mod pipeline;
pub mod report;
pub mod snapshot;
