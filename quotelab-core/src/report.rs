//! Deterministic text report over an enriched history.
//!
//! Formats values already computed by the engine and assembler; it holds no
//! numeric logic of its own beyond window statistics over the displayed bars.
//! Section structure and thresholds are the contract here, not exact wording.

use crate::domain::IndicatorBar;
use crate::indicators::position_pct;

/// Number of trailing bars shown in the report.
pub const REPORT_WINDOW: usize = 5;

pub const RSI_OVERBOUGHT: f64 = 80.0;
pub const RSI_OVERSOLD: f64 = 20.0;

/// Band-position thresholds for the near-band hints.
pub const NEAR_UPPER_PCT: f64 = 80.0;
pub const NEAR_LOWER_PCT: f64 = 20.0;

/// Render the text report over the last `REPORT_WINDOW` bars of `history`.
///
/// The crossover note is edge-detected on the sign of `dif - dea` between the
/// last two bars of the full history, independent of the display window.
pub fn render_report(symbol: &str, history: &[IndicatorBar]) -> String {
    let window = &history[history.len().saturating_sub(REPORT_WINDOW)..];
    let Some(latest) = window.last() else {
        return String::new();
    };

    let mut out = String::new();
    out.push_str(&format!("=== Market Snapshot: {symbol} ===\n"));
    out.push_str(&format!(
        "Period: {} to {} ({} bars shown)\n",
        window[0].bar.trade_date,
        latest.bar.trade_date,
        window.len()
    ));

    // Price: change against the immediately preceding enriched bar.
    let prev = (history.len() >= 2).then(|| &history[history.len() - 2]);
    let change = prev.map_or(0.0, |p| latest.bar.close - p.bar.close);
    let change_pct = match prev {
        Some(p) if p.bar.close != 0.0 => change / p.bar.close * 100.0,
        _ => 0.0,
    };
    out.push_str("\n--- Price ---\n");
    out.push_str(&format!(
        "Close: {:.2} ({:+.2}, {:+.2}%)\n",
        latest.bar.close, change, change_pct
    ));

    out.push_str("\n--- Moving Averages ---\n");
    for (label, value) in [
        ("MA5", latest.ma5),
        ("MA10", latest.ma10),
        ("MA20", latest.ma20),
        ("MA60", latest.ma60),
    ] {
        let hint = if latest.bar.close >= value {
            "price above"
        } else {
            "price below"
        };
        out.push_str(&format!("{label:<5} {value:.2} ({hint})\n"));
    }

    out.push_str("\n--- MACD ---\n");
    let bias = if latest.macd_hist >= 0.0 { "bullish" } else { "bearish" };
    out.push_str(&format!(
        "DIF {:.4}  DEA {:.4}  HIST {:.4} ({bias})\n",
        latest.macd_dif, latest.macd_dea, latest.macd_hist
    ));
    if let Some(prev) = prev {
        let prev_spread = prev.macd_dif - prev.macd_dea;
        let curr_spread = latest.macd_dif - latest.macd_dea;
        if prev_spread <= 0.0 && curr_spread > 0.0 {
            out.push_str("Golden cross: DIF crossed above DEA\n");
        } else if prev_spread >= 0.0 && curr_spread < 0.0 {
            out.push_str("Dead cross: DIF crossed below DEA\n");
        }
    }

    out.push_str("\n--- RSI ---\n");
    for (label, value) in [
        ("RSI6", latest.rsi6),
        ("RSI12", latest.rsi12),
        ("RSI24", latest.rsi24),
        ("RSI14", latest.rsi14),
    ] {
        let hint = if value >= RSI_OVERBOUGHT {
            " (overbought)"
        } else if value <= RSI_OVERSOLD {
            " (oversold)"
        } else {
            ""
        };
        out.push_str(&format!("{label:<6} {value:.1}{hint}\n"));
    }

    out.push_str("\n--- Bollinger Bands ---\n");
    out.push_str(&format!(
        "Mid {:.2}  Upper {:.2}  Lower {:.2}\n",
        latest.boll_mid, latest.boll_upper, latest.boll_lower
    ));
    let position = position_pct(latest.bar.close, latest.boll_upper, latest.boll_lower);
    let band_hint = if position >= NEAR_UPPER_PCT {
        " (near upper band)"
    } else if position <= NEAR_LOWER_PCT {
        " (near lower band)"
    } else {
        ""
    };
    out.push_str(&format!("Position: {position:.1}% of band{band_hint}\n"));

    out.push_str(&format!("\n--- Last {} Bars ---\n", window.len()));
    let max_high = window.iter().map(|b| b.bar.high).fold(f64::MIN, f64::max);
    let min_low = window.iter().map(|b| b.bar.low).fold(f64::MAX, f64::min);
    let mean_close = window.iter().map(|b| b.bar.close).sum::<f64>() / window.len() as f64;
    let mean_volume = window.iter().map(|b| b.bar.volume).sum::<f64>() / window.len() as f64;
    out.push_str(&format!("High max: {max_high:.2}  Low min: {min_low:.2}\n"));
    out.push_str(&format!("Close avg: {mean_close:.2}  Volume avg: {mean_volume:.0}\n"));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DailyBar;
    use chrono::NaiveDate;

    fn bar(day: u32, close: f64) -> IndicatorBar {
        IndicatorBar {
            bar: DailyBar {
                symbol: "600000.SH".into(),
                trade_date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                pre_close: close,
                change: 0.0,
                pct_change: 0.0,
                volume: 1_000.0,
                amount: 10_000.0,
            },
            ma5: close,
            ma10: close,
            ma20: close,
            ma60: close,
            macd_dif: 0.0,
            macd_dea: 0.0,
            macd_hist: 0.0,
            rsi6: 50.0,
            rsi12: 50.0,
            rsi24: 50.0,
            rsi14: 50.0,
            boll_mid: close,
            boll_upper: close + 2.0,
            boll_lower: close - 2.0,
        }
    }

    #[test]
    fn empty_history_renders_nothing() {
        assert!(render_report("600000.SH", &[]).is_empty());
    }

    #[test]
    fn sections_are_present() {
        let history: Vec<_> = (1..=8).map(|d| bar(d, 10.0 + d as f64 * 0.1)).collect();
        let report = render_report("600000.SH", &history);
        for section in [
            "600000.SH",
            "--- Price ---",
            "--- Moving Averages ---",
            "--- MACD ---",
            "--- RSI ---",
            "--- Bollinger Bands ---",
            "--- Last 5 Bars ---",
        ] {
            assert!(report.contains(section), "missing section: {section}");
        }
    }

    #[test]
    fn golden_cross_is_edge_detected() {
        let mut prev = bar(9, 10.0);
        prev.macd_dif = -0.1;
        prev.macd_dea = 0.0;
        let mut curr = bar(10, 10.2);
        curr.macd_dif = 0.1;
        curr.macd_dea = 0.0;
        let report = render_report("600000.SH", &[prev, curr]);
        assert!(report.contains("Golden cross"));
        assert!(!report.contains("Dead cross"));
    }

    #[test]
    fn dead_cross_is_edge_detected() {
        let mut prev = bar(9, 10.0);
        prev.macd_dif = 0.1;
        prev.macd_dea = 0.0;
        let mut curr = bar(10, 9.8);
        curr.macd_dif = -0.1;
        curr.macd_dea = 0.0;
        let report = render_report("600000.SH", &[prev, curr]);
        assert!(report.contains("Dead cross"));
        assert!(!report.contains("Golden cross"));
    }

    #[test]
    fn no_cross_without_a_sign_flip() {
        let mut prev = bar(9, 10.0);
        prev.macd_dif = 0.2;
        let mut curr = bar(10, 10.1);
        curr.macd_dif = 0.1;
        let report = render_report("600000.SH", &[prev, curr]);
        assert!(!report.contains("cross:"));
    }

    #[test]
    fn overbought_and_near_band_hints() {
        let mut b = bar(10, 11.9);
        b.rsi6 = 85.0;
        b.rsi14 = 15.0;
        b.boll_upper = 12.0;
        b.boll_lower = 8.0;
        let report = render_report("600000.SH", &[b]);
        assert!(report.contains("RSI6   85.0 (overbought)"));
        assert!(report.contains("RSI14  15.0 (oversold)"));
        assert!(report.contains("(near upper band)"));
    }

    #[test]
    fn window_stats_cover_displayed_bars_only() {
        // 6 bars; the first (close 100) must not leak into the 5-bar stats.
        let mut history = vec![bar(1, 100.0)];
        history.extend((2..=6).map(|d| bar(d, 10.0)));
        let report = render_report("600000.SH", &history);
        assert!(report.contains("High max: 11.00"));
        assert!(report.contains("Low min: 9.00"));
        assert!(report.contains("Close avg: 10.00"));
    }
}
