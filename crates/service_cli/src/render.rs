//! Terminal rendering for stat tiles, watchlists and series.

use std::fmt::Write as _;

use market_core::format::{format_compact, format_currency, format_percentage};
use market_core::types::{InstrumentSnapshot, PricePoint, Trend};
use market_stats::DerivedStatistics;

const SPARK_BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render a price history as a one-line sparkline.
pub fn sparkline(prices: &[f64]) -> String {
    let (min, max) = prices
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| {
            (lo.min(p), hi.max(p))
        });
    let span = max - min;
    prices
        .iter()
        .map(|&p| {
            if span <= 0.0 || !span.is_finite() {
                SPARK_BARS[SPARK_BARS.len() / 2]
            } else {
                let level = ((p - min) / span * (SPARK_BARS.len() - 1) as f64).round() as usize;
                SPARK_BARS[level.min(SPARK_BARS.len() - 1)]
            }
        })
        .collect()
}

/// Arrow glyph for a trend.
pub fn trend_marker(trend: Trend) -> &'static str {
    match trend {
        Trend::Up => "▲",
        Trend::Down => "▼",
        Trend::Flat => "•",
    }
}

/// Render the four dashboard stat tiles.
pub fn stat_tiles(stats: &DerivedStatistics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<16}${}", "Market Cap", format_compact(stats.total_market_cap));
    let _ = writeln!(out, "{:<16}{}", "Trading Volume", format_compact(stats.total_volume as f64));
    let _ = writeln!(
        out,
        "{:<16}{} {} ({})",
        "Top Gainer",
        stats.top_gainer.symbol(),
        format_percentage(stats.top_gainer.change_percent()),
        stats.top_gainer.name()
    );
    let _ = writeln!(
        out,
        "{:<16}{} {} ({})",
        "Top Loser",
        stats.top_loser.symbol(),
        format_percentage(stats.top_loser.change_percent()),
        stats.top_loser.name()
    );
    let _ = writeln!(
        out,
        "{:<16}{} up / {} down / {} flat",
        "Breadth",
        stats.gainers.len(),
        stats.losers.len(),
        stats.unchanged.len()
    );
    out
}

/// Render one snapshot row, optionally with a sparkline.
pub fn snapshot_row(snapshot: &InstrumentSnapshot, history: Option<&[f64]>) -> String {
    let mut row = format!(
        "{} {:<8} {:>14} {:>12} {:>9} {:>10}",
        trend_marker(snapshot.trend()),
        snapshot.symbol(),
        format_currency(snapshot.price()),
        format_currency(snapshot.change()),
        format_percentage(snapshot.change_percent()),
        format_compact(snapshot.volume() as f64),
    );
    if let Some(history) = history {
        row.push_str("  ");
        row.push_str(&sparkline(history));
    }
    row
}

/// Render a titled list of snapshots.
pub fn snapshot_section(title: &str, snapshots: &[InstrumentSnapshot]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title);
    for snapshot in snapshots {
        let _ = writeln!(out, "{}", snapshot_row(snapshot, None));
    }
    out
}

/// Render a generated series as index/price rows.
pub fn series_table(points: &[PricePoint]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>5}  {:>14}", "#", "Price");
    for point in points {
        let _ = writeln!(out, "{:>5}  {:>14}", point.index, format_currency(point.price));
    }
    out
}
