//! Trading-date ranges and the provider wire date encoding.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive start/end trading-date range handed to the quote providers.
///
/// `end` is a trading day on or before the target date whenever the calendar
/// resolver had calendar data; otherwise both bounds are plain calendar days
/// forming a wider, safe superset (downstream filtering still works).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TradingRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Start bound in the provider's 8-digit encoding.
    pub fn start_wire(&self) -> String {
        to_wire_date(self.start)
    }

    /// End bound in the provider's 8-digit encoding.
    pub fn end_wire(&self) -> String {
        to_wire_date(self.end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Format a date as the 8-digit `YYYYMMDD` string the providers speak.
pub fn to_wire_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Parse a provider date. Accepts `YYYYMMDD` and the dashed `YYYY-MM-DD`
/// form some sources emit before normalization.
pub fn parse_wire_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y%m%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_date_roundtrip() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        assert_eq!(to_wire_date(date), "20240510");
        assert_eq!(parse_wire_date("20240510"), Some(date));
    }

    #[test]
    fn parse_accepts_dashed_form() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        assert_eq!(parse_wire_date("2024-05-10"), Some(date));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(parse_wire_date("not-a-date"), None);
        assert_eq!(parse_wire_date(""), None);
        assert_eq!(parse_wire_date("20241301"), None); // month 13
    }

    #[test]
    fn range_contains_is_inclusive() {
        let range = TradingRange::new(
            NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
        );
        assert!(range.contains(range.start));
        assert!(range.contains(range.end));
        assert!(!range.contains(NaiveDate::from_ymd_opt(2024, 5, 11).unwrap()));
    }
}
