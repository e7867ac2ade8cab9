//! Snapshot aggregation for dashboard-level statistics.
//!
//! Provides the filter/select/reduce pass that turns a collection of
//! instrument snapshots into gainers, losers, top movers and totals.

use market_core::types::{InstrumentKind, InstrumentSnapshot};
use market_core::{MarketError, Result};
use serde::Serialize;
use tracing::debug;

use crate::summation::{compensated_sum, saturating_total};

/// Statistics derived from a snapshot collection.
///
/// `gainers`, `losers` and `unchanged` partition the input and keep its
/// order. Top movers are the first snapshot in input order holding the
/// extreme percent change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedStatistics {
    /// Snapshots with positive percent change
    pub gainers: Vec<InstrumentSnapshot>,
    /// Snapshots with negative percent change
    pub losers: Vec<InstrumentSnapshot>,
    /// Snapshots with zero percent change
    pub unchanged: Vec<InstrumentSnapshot>,
    /// Largest percent change
    pub top_gainer: InstrumentSnapshot,
    /// Smallest percent change
    pub top_loser: InstrumentSnapshot,
    /// Sum of market caps, absent caps counted as zero
    pub total_market_cap: f64,
    /// Sum of traded volume
    pub total_volume: u64,
}

impl DerivedStatistics {
    /// Number of snapshots the statistics were derived from.
    pub fn instrument_count(&self) -> usize {
        self.gainers.len() + self.losers.len() + self.unchanged.len()
    }

    /// Share of instruments that gained, in [0, 1].
    pub fn advance_ratio(&self) -> f64 {
        self.gainers.len() as f64 / self.instrument_count() as f64
    }
}

/// Derive statistics from an ordered snapshot collection.
///
/// # Errors
///
/// Returns `MarketError::EmptyInput` when `snapshots` is empty.
pub fn aggregate(snapshots: &[InstrumentSnapshot]) -> Result<DerivedStatistics> {
    let first = snapshots.first().ok_or(MarketError::EmptyInput)?;

    let mut gainers = Vec::new();
    let mut losers = Vec::new();
    let mut unchanged = Vec::new();
    let mut top_gainer = first;
    let mut top_loser = first;

    for snapshot in snapshots {
        let pct = snapshot.change_percent();
        if pct > 0.0 {
            gainers.push(snapshot.clone());
        } else if pct < 0.0 {
            losers.push(snapshot.clone());
        } else {
            unchanged.push(snapshot.clone());
        }

        // Strict comparisons keep the earliest snapshot on ties.
        if pct > top_gainer.change_percent() {
            top_gainer = snapshot;
        }
        if pct < top_loser.change_percent() {
            top_loser = snapshot;
        }
    }

    let total_market_cap = compensated_sum(snapshots.iter().map(|s| s.market_cap().unwrap_or(0.0)));
    let total_volume = saturating_total(snapshots.iter().map(|s| s.volume()));

    debug!(
        count = snapshots.len(),
        gainers = gainers.len(),
        losers = losers.len(),
        top_gainer = top_gainer.symbol(),
        top_loser = top_loser.symbol(),
        "aggregated market snapshots"
    );

    Ok(DerivedStatistics {
        gainers,
        losers,
        unchanged,
        top_gainer: top_gainer.clone(),
        top_loser: top_loser.clone(),
        total_market_cap,
        total_volume,
    })
}

/// Aggregator with an optional instrument kind filter.
///
/// # Examples
///
/// ```
/// use market_core::types::InstrumentKind;
/// use market_core::MarketError;
/// use market_stats::MarketAggregator;
///
/// let equities = MarketAggregator::for_kind(InstrumentKind::Equity);
/// assert_eq!(equities.aggregate(&[]).unwrap_err(), MarketError::EmptyInput);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MarketAggregator {
    kind: Option<InstrumentKind>,
}

impl MarketAggregator {
    /// Create an aggregator over every snapshot.
    pub fn new() -> Self {
        Self { kind: None }
    }

    /// Create an aggregator restricted to one instrument kind.
    pub fn for_kind(kind: InstrumentKind) -> Self {
        Self { kind: Some(kind) }
    }

    /// Kind filter, if any.
    pub fn kind(&self) -> Option<InstrumentKind> {
        self.kind
    }

    /// Derive statistics from the snapshots passing the kind filter.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::EmptyInput` when no snapshot passes the filter.
    pub fn aggregate(&self, snapshots: &[InstrumentSnapshot]) -> Result<DerivedStatistics> {
        match self.kind {
            None => aggregate(snapshots),
            Some(kind) => {
                let selected: Vec<InstrumentSnapshot> = snapshots
                    .iter()
                    .filter(|s| s.kind() == kind)
                    .cloned()
                    .collect();
                aggregate(&selected)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{TimeZone, Utc};

    fn snap(symbol: &str, change_percent: f64) -> InstrumentSnapshot {
        InstrumentSnapshot::builder(symbol, symbol, InstrumentKind::Equity)
            .price(100.0)
            .change(change_percent, change_percent)
            .volume(1_000)
            .market_cap(1.0e9)
            .last_updated(Utc.with_ymd_and_hms(2024, 3, 15, 16, 0, 0).unwrap())
            .build()
            .unwrap()
    }

    fn symbols(list: &[InstrumentSnapshot]) -> Vec<&str> {
        list.iter().map(|s| s.symbol()).collect()
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(aggregate(&[]).unwrap_err(), MarketError::EmptyInput);
    }

    #[test]
    fn test_reference_example() {
        let stats = aggregate(&[snap("AAPL", 2.5), snap("TSLA", -3.1), snap("MSFT", 0.0)]).unwrap();
        assert_eq!(stats.top_gainer.symbol(), "AAPL");
        assert_eq!(stats.top_loser.symbol(), "TSLA");
        assert_eq!(symbols(&stats.gainers), vec!["AAPL"]);
        assert_eq!(symbols(&stats.losers), vec!["TSLA"]);
        assert_eq!(symbols(&stats.unchanged), vec!["MSFT"]);
        assert_eq!(stats.instrument_count(), 3);
    }

    #[test]
    fn test_partition_is_stable() {
        let input = [
            snap("A", 1.0),
            snap("B", -1.0),
            snap("C", 3.0),
            snap("D", 0.0),
            snap("E", -2.0),
            snap("F", 0.5),
        ];
        let stats = aggregate(&input).unwrap();
        assert_eq!(symbols(&stats.gainers), vec!["A", "C", "F"]);
        assert_eq!(symbols(&stats.losers), vec!["B", "E"]);
        assert_eq!(symbols(&stats.unchanged), vec!["D"]);
    }

    #[test]
    fn test_ties_take_first_encountered() {
        let input = [
            snap("X", 1.0),
            snap("Y", 4.0),
            snap("Z", 4.0),
            snap("P", -2.0),
            snap("Q", -2.0),
        ];
        let stats = aggregate(&input).unwrap();
        assert_eq!(stats.top_gainer.symbol(), "Y");
        assert_eq!(stats.top_loser.symbol(), "P");
    }

    #[test]
    fn test_single_snapshot_is_both_top_movers() {
        let stats = aggregate(&[snap("ONLY", 0.0)]).unwrap();
        assert_eq!(stats.top_gainer.symbol(), "ONLY");
        assert_eq!(stats.top_loser.symbol(), "ONLY");
        assert!(stats.gainers.is_empty());
        assert!(stats.losers.is_empty());
    }

    #[test]
    fn test_all_losers_top_gainer_is_least_negative() {
        let stats = aggregate(&[snap("A", -3.0), snap("B", -0.5), snap("C", -1.0)]).unwrap();
        assert_eq!(stats.top_gainer.symbol(), "B");
        assert_eq!(stats.top_loser.symbol(), "A");
        assert!(stats.gainers.is_empty());
    }

    #[test]
    fn test_totals_treat_missing_cap_as_zero() {
        let pair = InstrumentSnapshot::builder("EUR/USD", "Euro", InstrumentKind::CurrencyPair)
            .price(1.08)
            .volume(500)
            .build()
            .unwrap();
        let stats = aggregate(&[snap("A", 1.0), pair, snap("B", -1.0)]).unwrap();
        assert_relative_eq!(stats.total_market_cap, 2.0e9);
        assert_eq!(stats.total_volume, 2_500);
    }

    #[test]
    fn test_advance_ratio() {
        let input = [snap("A", 1.0), snap("B", -1.0), snap("C", 1.0), snap("D", 0.0)];
        let stats = aggregate(&input).unwrap();
        assert_relative_eq!(stats.advance_ratio(), 0.5);
    }

    #[test]
    fn test_kind_filter() {
        let index = InstrumentSnapshot::builder("SPX", "S&P 500", InstrumentKind::Index)
            .price(5_000.0)
            .change(50.0, 1.01)
            .build()
            .unwrap();
        let input = [snap("A", 0.4), index.clone()];

        let all = MarketAggregator::new().aggregate(&input).unwrap();
        assert_eq!(all.top_gainer.symbol(), "SPX");

        let equities = MarketAggregator::for_kind(InstrumentKind::Equity)
            .aggregate(&input)
            .unwrap();
        assert_eq!(equities.top_gainer.symbol(), "A");
        assert_eq!(equities.instrument_count(), 1);

        let pairs = MarketAggregator::for_kind(InstrumentKind::CurrencyPair).aggregate(&input);
        assert_eq!(pairs.unwrap_err(), MarketError::EmptyInput);
    }

    #[test]
    fn test_statistics_serialise() {
        let stats = aggregate(&[snap("AAPL", 2.5)]).unwrap();
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["top_gainer"]["symbol"], "AAPL");
        assert_eq!(json["total_volume"], 1_000);
    }
}
