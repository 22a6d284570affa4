//! quotelab CLI — fetch bars, compute indicators, print the market report.
//!
//! Commands:
//! - `snapshot` — run the full pipeline for one (symbol, date) query and
//!   print the text report (or the snapshot JSON), optionally writing
//!   `snapshot.json` and `history.csv` artifacts.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use quotelab_core::config::PipelineConfig;
use quotelab_core::domain::MarketSnapshot;
use quotelab_core::pipeline::SnapshotPipeline;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "quotelab", about = "quotelab CLI — daily-bar snapshot pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch daily bars, compute indicators, and print the market report.
    Snapshot {
        /// Instrument code (e.g., 600000.SH).
        symbol: String,

        /// Analysis date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<String>,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Trading-day lookback window. Overrides the config value.
        #[arg(long)]
        lookback: Option<usize>,

        /// Print the snapshot as JSON instead of the text report.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Directory to write snapshot.json and history.csv artifacts.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Snapshot {
            symbol,
            date,
            config,
            lookback,
            json,
            output_dir,
        } => run_snapshot(symbol, date, config, lookback, json, output_dir),
    }
}

fn run_snapshot(
    symbol: String,
    date: Option<String>,
    config_path: Option<PathBuf>,
    lookback: Option<usize>,
    json: bool,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let date = match date {
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .with_context(|| format!("invalid date '{s}', expected YYYY-MM-DD"))?,
        None => chrono::Local::now().date_naive(),
    };

    let mut config = match &config_path {
        Some(path) => PipelineConfig::from_file(path)?,
        None => PipelineConfig::default(),
    };
    config = config.with_env_token();
    if let Some(lookback) = lookback {
        config.lookback_days = lookback;
    }

    let pipeline = SnapshotPipeline::from_config(config)?;
    let snapshot = pipeline.snapshot(&symbol, date)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{}", snapshot.report);
    }

    if let Some(dir) = output_dir {
        save_artifacts(&snapshot, &dir)?;
        println!("Artifacts saved to: {}", dir.display());
    }

    Ok(())
}

/// Write snapshot.json and history.csv into `dir`.
fn save_artifacts(snapshot: &MarketSnapshot, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output dir {}", dir.display()))?;

    std::fs::write(
        dir.join("snapshot.json"),
        serde_json::to_string_pretty(snapshot)?,
    )?;

    let mut writer = csv::Writer::from_path(dir.join("history.csv"))?;
    writer.write_record([
        "trade_date",
        "open",
        "high",
        "low",
        "close",
        "pre_close",
        "change",
        "pct_change",
        "volume",
        "amount",
        "ma5",
        "ma10",
        "ma20",
        "ma60",
        "macd_dif",
        "macd_dea",
        "macd_hist",
        "rsi6",
        "rsi12",
        "rsi24",
        "rsi14",
        "boll_mid",
        "boll_upper",
        "boll_lower",
    ])?;
    for row in &snapshot.history {
        writer.write_record([
            row.bar.trade_date.to_string(),
            row.bar.open.to_string(),
            row.bar.high.to_string(),
            row.bar.low.to_string(),
            row.bar.close.to_string(),
            row.bar.pre_close.to_string(),
            row.bar.change.to_string(),
            row.bar.pct_change.to_string(),
            row.bar.volume.to_string(),
            row.bar.amount.to_string(),
            row.ma5.to_string(),
            row.ma10.to_string(),
            row.ma20.to_string(),
            row.ma60.to_string(),
            row.macd_dif.to_string(),
            row.macd_dea.to_string(),
            row.macd_hist.to_string(),
            row.rsi6.to_string(),
            row.rsi12.to_string(),
            row.rsi24.to_string(),
            row.rsi14.to_string(),
            row.boll_mid.to_string(),
            row.boll_upper.to_string(),
            row.boll_lower.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
