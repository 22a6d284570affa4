//! DailyBar — the fundamental market data unit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading session for a single instrument.
///
/// `pre_close`, `change`, and `pct_change` are normalized by the acquirer:
/// when a provider omits them, they are recomputed from the previous session's
/// close (first bar of a series defaults to its own close, so `change` is 0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    pub symbol: String,
    pub trade_date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub pre_close: f64,
    pub change: f64,
    pub pct_change: f64,
    pub volume: f64,
    pub amount: f64,
}

impl DailyBar {
    /// Basic OHLC sanity check: high >= low, positive prices, OHLC within range.
    pub fn is_sane(&self) -> bool {
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.open > 0.0
            && self.close > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bar() -> DailyBar {
        DailyBar {
            symbol: "600000.SH".into(),
            trade_date: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            open: 10.0,
            high: 10.5,
            low: 9.8,
            close: 10.3,
            pre_close: 10.0,
            change: 0.3,
            pct_change: 3.0,
            volume: 50_000.0,
            amount: 515_000.0,
        }
    }

    #[test]
    fn bar_is_sane() {
        assert!(sample_bar().is_sane());
    }

    #[test]
    fn bar_detects_insane_high_low() {
        let mut bar = sample_bar();
        bar.high = 9.7; // below low
        assert!(!bar.is_sane());
    }

    #[test]
    fn bar_serialization_roundtrip() {
        let bar = sample_bar();
        let json = serde_json::to_string(&bar).unwrap();
        let deser: DailyBar = serde_json::from_str(&json).unwrap();
        assert_eq!(bar, deser);
    }
}
