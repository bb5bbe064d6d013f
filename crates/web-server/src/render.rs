// In crates/web-server/src/render.rs

use backtester::AccuracyReport;
use chrono::{DateTime, FixedOffset, Offset, Utc};
use core_types::{Signal, SignalRow};
use engine::{DashboardSnapshot, IntervalPanel};
use std::fmt::Write;

const STYLE: &str = "body{font-family:sans-serif;margin:2rem;color:#222}\
table{border-collapse:collapse;margin-bottom:2rem}\
th,td{padding:.3rem .8rem;border-bottom:1px solid #ddd;text-align:right}\
th{background:#f4f4f4}\
.buy{color:#fff;background:#2e7d32}\
.sell{color:#fff;background:#c62828}\
.hold{color:#fff;background:#757575}\
.error{color:#c62828}";

/// Renders the whole dashboard as a standalone HTML page.
pub fn render_dashboard(snapshot: &DashboardSnapshot, utc_offset_minutes: i32) -> String {
    let offset = FixedOffset::east_opt(utc_offset_minutes * 60).unwrap_or(Utc.fix());

    let mut html = String::with_capacity(16 * 1024);
    let _ = write!(
        html,
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{title}</title>\
         <style>{STYLE}</style></head><body><h1>{title}</h1>\
         <p>{symbol} &middot; sentiment {score} ({source}) &middot; generated {generated}</p>",
        title = escape(&snapshot.title),
        symbol = escape(&snapshot.symbol.0),
        score = snapshot.sentiment.score,
        source = escape(&snapshot.sentiment.source),
        generated = format_time(snapshot.generated_at, offset),
    );

    for panel in &snapshot.panels {
        render_panel(&mut html, panel, snapshot.table_rows, offset);
    }

    html.push_str("</body></html>");
    html
}

fn render_panel(html: &mut String, panel: &IntervalPanel, table_rows: usize, offset: FixedOffset) {
    let _ = write!(html, "<section><h2>Timeframe: {}</h2>", panel.label);

    match (panel.report(), panel.error()) {
        (Some(report), _) => {
            let _ = write!(html, "<p>{}</p>", accuracy_label(&report.accuracy));
            render_table(html, report.recent(table_rows), offset);
        }
        (None, Some(error)) => {
            let _ = write!(html, "<p class=\"error\">Data unavailable: {}</p>", escape(error));
        }
        (None, None) => {}
    }

    html.push_str("</section>");
}

fn render_table(html: &mut String, rows: &[SignalRow], offset: FixedOffset) {
    html.push_str(
        "<table><thead><tr><th>Time</th><th>Close</th><th>RSI</th>\
         <th>MACD diff</th><th>Signal</th></tr></thead><tbody>",
    );

    for row in rows {
        let indicators = &row.indicators;
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{:.2}</td><td>{}</td><td>{}</td><td class=\"{}\">{}</td></tr>",
            format_time(indicators.bar.timestamp, offset),
            indicators.bar.close,
            format_optional(indicators.rsi, 2),
            format_optional(indicators.macd_diff, 4),
            signal_class(row.signal),
            row.signal,
        );
    }

    html.push_str("</tbody></table>");
}

/// The one-line accuracy summary shown above each table.
pub fn accuracy_label(report: &AccuracyReport) -> String {
    match report.accuracy {
        Some(accuracy) => format!(
            "Backtest accuracy ({} bars ahead): {:.2}% ({} of {} signals)",
            report.horizon, accuracy, report.correct_rows, report.scored_rows
        ),
        None => format!(
            "Backtest accuracy ({} bars ahead): n/a (not enough bars)",
            report.horizon
        ),
    }
}

pub fn signal_class(signal: Signal) -> &'static str {
    match signal {
        Signal::Buy => "buy",
        Signal::Sell => "sell",
        Signal::Hold => "hold",
    }
}

fn format_optional(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => "n/a".to_string(),
    }
}

fn format_time(timestamp: DateTime<Utc>, offset: FixedOffset) -> String {
    timestamp.with_timezone(&offset).format("%Y-%m-%d %H:%M").to_string()
}

/// Minimal HTML escaping for text nodes and attribute values.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
