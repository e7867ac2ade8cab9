//! Market overview command
//!
//! Refreshes the seed catalogue once, derives stock statistics and renders
//! the stat tiles, a stock watchlist with sparklines, indices and currencies.

use std::io::Write;

use chrono::{DateTime, Utc};
use market_core::types::{InstrumentKind, InstrumentSnapshot};
use market_stats::{DerivedStatistics, MarketAggregator};
use market_synth::catalog::Catalog;
use market_synth::refresh::SnapshotRefresher;
use market_synth::rng::RandomSource;
use market_synth::series::SeriesGenerator;
use serde::Serialize;
use tracing::info;

use crate::config::MarketConfig;
use crate::error::Result;
use crate::render;
use crate::{random_source, OutputFormat};

/// Watchlist entry: a refreshed stock and its recent history.
#[derive(Debug, Clone, Serialize)]
pub struct WatchlistEntry {
    /// Refreshed snapshot
    pub snapshot: InstrumentSnapshot,
    /// Oldest-first price history starting at the snapshot price
    pub history: Vec<f64>,
}

/// Everything the overview screen shows.
#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    /// Refresh timestamp
    pub as_of: DateTime<Utc>,
    /// Statistics over the refreshed stocks
    pub stats: DerivedStatistics,
    /// Leading stocks with histories
    pub watchlist: Vec<WatchlistEntry>,
    /// Refreshed indices
    pub indices: Vec<InstrumentSnapshot>,
    /// Refreshed currency pairs
    pub currencies: Vec<InstrumentSnapshot>,
}

/// Build the overview at `now` drawing from `source`.
pub fn build<S: RandomSource + ?Sized>(
    config: &MarketConfig,
    now: DateTime<Utc>,
    source: &mut S,
) -> Result<Overview> {
    let catalog = Catalog::load(now)?;
    let refresher =
        SnapshotRefresher::new(config.refresh_volatility).with_distribution(config.distribution);

    let stocks = refresher.refresh_all(catalog.stocks(), now, &mut *source)?;
    let indices = refresher.refresh_all(catalog.indices(), now, &mut *source)?;
    let currencies = refresher.refresh_all(catalog.currencies(), now, &mut *source)?;

    let stats = MarketAggregator::for_kind(InstrumentKind::Equity).aggregate(&stocks)?;

    let generator = SeriesGenerator::new(config.history_length, config.card_volatility)
        .with_distribution(config.distribution);
    let watchlist = stocks
        .iter()
        .take(config.watchlist_size)
        .map(|snapshot| {
            let history = generator.generate(snapshot.price(), &mut *source)?;
            Ok(WatchlistEntry {
                snapshot: snapshot.clone(),
                history,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Overview {
        as_of: now,
        stats,
        watchlist,
        indices,
        currencies,
    })
}

/// Render an overview as terminal text.
pub fn render_table(overview: &Overview) -> String {
    let mut out = format!(
        "Market overview as of {}\n\n",
        overview.as_of.format("%Y-%m-%d %H:%M:%S UTC")
    );
    out.push_str(&render::stat_tiles(&overview.stats));
    out.push_str("\nWatchlist\n");
    for entry in &overview.watchlist {
        out.push_str(&render::snapshot_row(&entry.snapshot, Some(&entry.history)));
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&render::snapshot_section("Indices", &overview.indices));
    out.push('\n');
    out.push_str(&render::snapshot_section("Currencies", &overview.currencies));
    out
}

/// Run the overview command.
pub fn run<W: Write>(config: &MarketConfig, format: OutputFormat, out: &mut W) -> Result<()> {
    let mut source = random_source(config.seed);
    let overview = build(config, Utc::now(), source.as_mut())?;

    info!(
        stocks = overview.stats.instrument_count(),
        gainers = overview.stats.gainers.len(),
        losers = overview.stats.losers.len(),
        "overview refreshed"
    );

    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &overview)?;
            writeln!(out)?;
        }
        OutputFormat::Table => write!(out, "{}", render_table(&overview))?,
    }
    Ok(())
}
