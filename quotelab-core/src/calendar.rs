//! Trading-calendar resolution.
//!
//! `resolve_range` turns a target date plus a trading-day lookback into the
//! inclusive range handed to the quote providers. Calendar failures are fully
//! absorbed here: the resolver degrades to a wider calendar-day window and
//! never returns an error — this is the resilience boundary for calendar
//! unavailability.

use crate::data::envelope::{ApiClient, FieldMap};
use crate::data::provider::DataError;
use crate::domain::{parse_wire_date, to_wire_date, TradingRange};
use chrono::{Duration, NaiveDate};
use log::warn;
use serde_json::json;

/// Extra calendar days probed beyond the lookback, to cover holidays and
/// weekends inside the window.
const PROBE_PAD_DAYS: i64 = 20;

/// Extra calendar days added to the degraded fallback window.
const FALLBACK_PAD_DAYS: i64 = 10;

/// Source of open trading days over a probe window.
pub trait TradingCalendar: Send + Sync {
    /// Trading days (exchange open) in `[start, end]`, in no particular order.
    fn open_days(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>, DataError>;
}

/// Resolve the trading range for `target` with at least `lookback_days`
/// trading days when the calendar is known.
///
/// `end` is the largest open day on or before `target`; if the probe window
/// holds open days but none qualify, the most recent available day is used as
/// a degraded fallback. On any calendar failure (or an empty probe) the range
/// degrades to plain calendar-day arithmetic: a wider, imprecise but safe
/// superset, since downstream date filtering still applies.
pub fn resolve_range(
    calendar: &dyn TradingCalendar,
    target: NaiveDate,
    lookback_days: usize,
) -> TradingRange {
    let probe_start = target - Duration::days(lookback_days as i64 + PROBE_PAD_DAYS);
    let probe_end = target + Duration::days(1);

    match calendar.open_days(probe_start, probe_end) {
        Ok(mut days) if !days.is_empty() => {
            days.sort_unstable();
            days.dedup();
            let end_idx = days
                .iter()
                .rposition(|d| *d <= target)
                .unwrap_or(days.len() - 1);
            let start_idx = (end_idx + 1).saturating_sub(lookback_days).min(end_idx);
            TradingRange::new(days[start_idx], days[end_idx])
        }
        Ok(_) => {
            warn!("trading calendar returned no open days around {target}; using calendar-day window");
            fallback_range(target, lookback_days)
        }
        Err(e) => {
            warn!("trading calendar unavailable ({e}); using calendar-day window");
            fallback_range(target, lookback_days)
        }
    }
}

fn fallback_range(target: NaiveDate, lookback_days: usize) -> TradingRange {
    TradingRange::new(
        target - Duration::days(lookback_days as i64 + FALLBACK_PAD_DAYS),
        target,
    )
}

/// Calendar backed by the primary provider's `trade_cal` API.
pub struct HttpTradingCalendar {
    api: ApiClient,
    token: Option<String>,
}

impl HttpTradingCalendar {
    pub fn new(api: ApiClient, token: Option<String>) -> Self {
        Self { api, token }
    }
}

impl TradingCalendar for HttpTradingCalendar {
    fn open_days(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>, DataError> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| DataError::MissingCredential("trading calendar".into()))?;

        let data = self.api.call(
            token,
            "trade_cal",
            json!({
                "start_date": to_wire_date(start),
                "end_date": to_wire_date(end),
            }),
            "cal_date,is_open",
        )?;

        let map = FieldMap::new(&data.fields);
        let mut days = Vec::new();
        for row in &data.items {
            if map.number(row, "is_open") != Some(1.0) {
                continue;
            }
            if let Some(day) = map.text(row, "cal_date").as_deref().and_then(parse_wire_date) {
                days.push(day);
            }
        }
        Ok(days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedCalendar {
        days: Result<Vec<NaiveDate>, &'static str>,
    }

    impl TradingCalendar for FixedCalendar {
        fn open_days(&self, _start: NaiveDate, _end: NaiveDate) -> Result<Vec<NaiveDate>, DataError> {
            match &self.days {
                Ok(days) => Ok(days.clone()),
                Err(msg) => Err(DataError::Http((*msg).to_string())),
            }
        }
    }

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    /// Mon 2024-05-06 .. Fri 2024-05-10, then Mon 2024-05-13.
    fn week_days() -> Vec<NaiveDate> {
        vec![
            date(5, 6),
            date(5, 7),
            date(5, 8),
            date(5, 9),
            date(5, 10),
            date(5, 13),
        ]
    }

    #[test]
    fn end_is_largest_open_day_on_or_before_target() {
        let cal = FixedCalendar { days: Ok(week_days()) };
        // Saturday: the preceding Friday is the end.
        let range = resolve_range(&cal, date(5, 11), 3);
        assert_eq!(range.end, date(5, 10));
        assert_eq!(range.start, date(5, 8));
    }

    #[test]
    fn lookback_longer_than_history_clamps_to_first_open_day() {
        let cal = FixedCalendar { days: Ok(week_days()) };
        let range = resolve_range(&cal, date(5, 10), 50);
        assert_eq!(range.start, date(5, 6));
        assert_eq!(range.end, date(5, 10));
    }

    #[test]
    fn no_open_day_before_target_degrades_to_most_recent_available() {
        let cal = FixedCalendar { days: Ok(vec![date(5, 13)]) };
        let range = resolve_range(&cal, date(5, 10), 3);
        assert_eq!(range.end, date(5, 13));
        assert_eq!(range.start, date(5, 13));
    }

    #[test]
    fn unsorted_days_are_handled() {
        let mut days = week_days();
        days.reverse();
        let cal = FixedCalendar { days: Ok(days) };
        let range = resolve_range(&cal, date(5, 10), 2);
        assert_eq!(range.start, date(5, 9));
        assert_eq!(range.end, date(5, 10));
    }

    #[test]
    fn zero_open_days_falls_back_to_calendar_window() {
        let cal = FixedCalendar { days: Ok(Vec::new()) };
        let range = resolve_range(&cal, date(5, 10), 30);
        assert_eq!(range.end, date(5, 10));
        assert_eq!(range.start, date(5, 10) - Duration::days(40));
    }

    #[test]
    fn calendar_error_never_raises() {
        let cal = FixedCalendar { days: Err("boom") };
        let range = resolve_range(&cal, date(5, 10), 30);
        assert_eq!(range.end, date(5, 10));
        assert_eq!(range.start, date(5, 10) - Duration::days(40));
    }
}
