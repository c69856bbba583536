//! Markdown text for alerts.

use crate::types::{Alert, MaSeverity, MaStatus, SignalRecord, WeeklySnapshot};
use std::fmt::Write;

fn price(v: Option<f64>) -> String {
    v.map(|p| format!("{:.2}", p)).unwrap_or_else(|| "N/A".to_string())
}

fn whole(v: Option<f64>) -> String {
    v.map(|p| format!("{:.0}", p)).unwrap_or_else(|| "N/A".to_string())
}

fn tick(ok: bool) -> &'static str {
    if ok {
        "✅"
    } else {
        "❌"
    }
}

/// Render an alert as a Telegram Markdown message.
pub fn format_alert(alert: &Alert) -> String {
    match alert {
        Alert::Signal {
            symbol,
            resolution,
            policy,
            record,
        } => format_signal(symbol, resolution.label(), policy.name(), record),
        Alert::Overview {
            symbol,
            daily,
            weekly,
        } => format_overview(symbol, daily, weekly.as_ref()),
        Alert::MaBreakdown {
            symbol,
            severity,
            daily,
            weekly,
        } => format_ma_breakdown(symbol, *severity, daily, weekly),
    }
}

fn format_signal(symbol: &str, period: &str, policy: &str, r: &SignalRecord) -> String {
    let mut out = String::new();

    if r.is_confirmed_buy {
        let _ = writeln!(out, "🟢 *DARVAS CONFIRMED BUY*");
        let _ = writeln!(out, "📌 {} | {} ({})", symbol, r.date, policy);
        let _ = writeln!(out, "💰 Close: {:.2} > box top: {}", r.close, price(r.top));
        let _ = writeln!(
            out,
            "📊 Volume > {} avg: {} ({:.0} vs {})",
            period,
            tick(r.is_high_volume()),
            r.volume,
            whole(r.avg_volume)
        );
        if r.sma20.is_some() || r.sma50.is_some() {
            let _ = writeln!(out, "📈 SMA20: {} | SMA50: {}", price(r.sma20), price(r.sma50));
        }
        let _ = writeln!(out, "🎯 Action: BUY");
    }

    if r.is_confirmed_sell {
        if !out.is_empty() {
            out.push('\n');
        }
        let _ = writeln!(out, "🔴 *DARVAS CONFIRMED SELL*");
        let _ = writeln!(out, "📌 {} | {} ({})", symbol, r.date, policy);
        let _ = writeln!(out, "💰 Close: {:.2} < box bottom: {}", r.close, price(r.bottom));
        let _ = writeln!(out, "🎯 Action: SELL / STOP LOSS");
    }

    if r.is_buying_climax || r.is_selling_climax {
        if !out.is_empty() {
            out.push('\n');
        }
        let _ = writeln!(out, "⚠️ *CLIMAX* {} | {}", symbol, r.date);
        if r.is_buying_climax {
            let _ = writeln!(out, "• Buying climax: high-volume rejection at a fresh high");
        }
        if r.is_selling_climax {
            let _ = writeln!(out, "• Selling climax: high-volume rejection at a fresh low");
        }
        let _ = writeln!(out, "📊 Volume {:.0} vs avg {}", r.volume, whole(r.avg_volume));
    }

    out
}

fn signal_word(r: &SignalRecord) -> (&'static str, &'static str) {
    if r.is_confirmed_buy {
        ("🟢 BUY", "CONSIDER BUYING (Darvas + volume)")
    } else if r.is_confirmed_sell {
        ("🔴 SELL", "CONSIDER SELLING (Darvas)")
    } else {
        ("⚪️ WAIT", "Keep watching")
    }
}

fn format_overview(symbol: &str, daily: &SignalRecord, weekly: Option<&WeeklySnapshot>) -> String {
    let (signal, verdict) = signal_word(daily);
    let mut out = String::new();

    let _ = writeln!(out, "🔍 *{}* | Darvas overview", symbol);
    let _ = writeln!(out, "📈 Close: {:.2}", daily.close);
    let _ = writeln!(
        out,
        "📊 Daily volume: {:.0} | 20-day avg: {}",
        daily.volume,
        whole(daily.avg_volume)
    );
    match weekly {
        Some(w) => {
            let _ = writeln!(
                out,
                "📊 Weekly volume: {:.0} | 20-week avg: {}",
                w.volume,
                whole(w.avg_volume)
            );
        }
        None => {
            let _ = writeln!(out, "📊 Weekly volume: N/A");
        }
    }
    let _ = writeln!(
        out,
        "📦 Box: top={}, bottom={}",
        price(daily.top),
        price(daily.bottom)
    );
    let _ = writeln!(out, "🎯 Signal: {}", signal);
    if let Some(w) = weekly {
        let _ = writeln!(out, "🗓 Weekly signal: {}", signal_word(&w.latest).0);
    }
    let _ = writeln!(out, "\n===> {}", verdict);

    out
}

fn format_ma_breakdown(symbol: &str, severity: MaSeverity, daily: &MaStatus, weekly: &MaStatus) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "🔍 *{}* | moving averages", symbol);
    match severity {
        MaSeverity::Full => {
            let _ = writeln!(out, "- Below MA10 daily and weekly? {}", tick(daily.below_ma10 && weekly.below_ma10));
            let _ = writeln!(out, "- Below MA20 daily and weekly? {}", tick(daily.below_ma20 && weekly.below_ma20));
            let _ = writeln!(out, "\n===> Recommendation: SELL");
        }
        MaSeverity::Partial => {
            let _ = writeln!(out, "- Below MA10 daily and weekly? {}", tick(daily.below_ma10 && weekly.below_ma10));
            let _ = writeln!(out, "- Below MA20 daily? {}", tick(daily.below_ma20));
            let _ = writeln!(out, "- Below MA20 weekly? {}", tick(weekly.below_ma20));
            let _ = writeln!(out, "\n===> Recommendation: SELL PART OF THE POSITION");
        }
    }

    out
}
