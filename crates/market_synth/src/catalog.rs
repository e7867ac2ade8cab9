//! Static seed data for the dashboard.
//!
//! Seed records are the starting point for every "live" value the
//! dashboard shows; [`SnapshotRefresher`](crate::refresh::SnapshotRefresher)
//! derives fresh snapshots from them.

use chrono::{DateTime, Utc};
use market_core::types::{InstrumentKind, InstrumentSnapshot};
use market_core::Result;

/// Static seed record.
struct SeedRecord {
    symbol: &'static str,
    name: &'static str,
    price: f64,
    change: f64,
    change_percent: f64,
    volume: u64,
    market_cap: Option<f64>,
}

#[rustfmt::skip]
const STOCKS: [SeedRecord; 8] = [
    SeedRecord { symbol: "AAPL", name: "Apple Inc.", price: 187.68, change: 1.34, change_percent: 0.72, volume: 53_240_000, market_cap: Some(2.92e12) },
    SeedRecord { symbol: "MSFT", name: "Microsoft Corporation", price: 415.50, change: 3.25, change_percent: 0.79, volume: 22_180_000, market_cap: Some(3.09e12) },
    SeedRecord { symbol: "GOOGL", name: "Alphabet Inc.", price: 141.80, change: -0.92, change_percent: -0.64, volume: 25_630_000, market_cap: Some(1.78e12) },
    SeedRecord { symbol: "AMZN", name: "Amazon.com, Inc.", price: 178.75, change: 2.15, change_percent: 1.22, volume: 37_450_000, market_cap: Some(1.86e12) },
    SeedRecord { symbol: "NVDA", name: "NVIDIA Corporation", price: 878.35, change: 22.47, change_percent: 2.63, volume: 41_920_000, market_cap: Some(2.19e12) },
    SeedRecord { symbol: "META", name: "Meta Platforms, Inc.", price: 502.30, change: -4.18, change_percent: -0.83, volume: 15_870_000, market_cap: Some(1.28e12) },
    SeedRecord { symbol: "TSLA", name: "Tesla, Inc.", price: 177.67, change: -5.69, change_percent: -3.10, volume: 98_500_000, market_cap: Some(5.65e11) },
    SeedRecord { symbol: "JPM", name: "JPMorgan Chase & Co.", price: 198.45, change: 0.0, change_percent: 0.0, volume: 9_240_000, market_cap: Some(5.70e11) },
];

#[rustfmt::skip]
const INDICES: [SeedRecord; 5] = [
    SeedRecord { symbol: "SPX", name: "S&P 500", price: 5_117.09, change: 26.89, change_percent: 0.53, volume: 0, market_cap: None },
    SeedRecord { symbol: "IXIC", name: "NASDAQ Composite", price: 16_103.45, change: 130.27, change_percent: 0.82, volume: 0, market_cap: None },
    SeedRecord { symbol: "DJI", name: "Dow Jones Industrial Average", price: 38_905.66, change: -47.39, change_percent: -0.12, volume: 0, market_cap: None },
    SeedRecord { symbol: "FTSE", name: "FTSE 100", price: 7_682.50, change: 14.20, change_percent: 0.19, volume: 0, market_cap: None },
    SeedRecord { symbol: "N225", name: "Nikkei 225", price: 39_598.71, change: -311.11, change_percent: -0.78, volume: 0, market_cap: None },
];

#[rustfmt::skip]
const CURRENCIES: [SeedRecord; 5] = [
    SeedRecord { symbol: "EUR/USD", name: "Euro / US Dollar", price: 1.0842, change: 0.0014, change_percent: 0.13, volume: 0, market_cap: None },
    SeedRecord { symbol: "GBP/USD", name: "British Pound / US Dollar", price: 1.2695, change: -0.0021, change_percent: -0.17, volume: 0, market_cap: None },
    SeedRecord { symbol: "USD/JPY", name: "US Dollar / Japanese Yen", price: 149.82, change: 0.47, change_percent: 0.31, volume: 0, market_cap: None },
    SeedRecord { symbol: "USD/CHF", name: "US Dollar / Swiss Franc", price: 0.8854, change: -0.0009, change_percent: -0.10, volume: 0, market_cap: None },
    SeedRecord { symbol: "AUD/USD", name: "Australian Dollar / US Dollar", price: 0.6578, change: 0.0032, change_percent: 0.49, volume: 0, market_cap: None },
];

fn build(
    records: &[SeedRecord],
    kind: InstrumentKind,
    now: DateTime<Utc>,
) -> Result<Vec<InstrumentSnapshot>> {
    records
        .iter()
        .map(|r| {
            let mut builder = InstrumentSnapshot::builder(r.symbol, r.name, kind)
                .price(r.price)
                .change(r.change, r.change_percent)
                .volume(r.volume)
                .last_updated(now);
            if let Some(cap) = r.market_cap {
                builder = builder.market_cap(cap);
            }
            builder.build()
        })
        .collect()
}

/// Seed equities, stamped at `now`.
pub fn seed_stocks(now: DateTime<Utc>) -> Result<Vec<InstrumentSnapshot>> {
    build(&STOCKS, InstrumentKind::Equity, now)
}

/// Seed market indices, stamped at `now`.
pub fn seed_indices(now: DateTime<Utc>) -> Result<Vec<InstrumentSnapshot>> {
    build(&INDICES, InstrumentKind::Index, now)
}

/// Seed currency pairs, stamped at `now`.
pub fn seed_currencies(now: DateTime<Utc>) -> Result<Vec<InstrumentSnapshot>> {
    build(&CURRENCIES, InstrumentKind::CurrencyPair, now)
}

/// All seed instruments grouped by kind.
#[derive(Debug, Clone)]
pub struct Catalog {
    stocks: Vec<InstrumentSnapshot>,
    indices: Vec<InstrumentSnapshot>,
    currencies: Vec<InstrumentSnapshot>,
}

impl Catalog {
    /// Load every seed record, stamped at `now`.
    pub fn load(now: DateTime<Utc>) -> Result<Self> {
        Ok(Self {
            stocks: seed_stocks(now)?,
            indices: seed_indices(now)?,
            currencies: seed_currencies(now)?,
        })
    }

    /// Seed equities.
    pub fn stocks(&self) -> &[InstrumentSnapshot] {
        &self.stocks
    }

    /// Seed indices.
    pub fn indices(&self) -> &[InstrumentSnapshot] {
        &self.indices
    }

    /// Seed currency pairs.
    pub fn currencies(&self) -> &[InstrumentSnapshot] {
        &self.currencies
    }

    /// Iterate over every instrument: stocks, then indices, then currencies.
    pub fn iter(&self) -> impl Iterator<Item = &InstrumentSnapshot> {
        self.stocks
            .iter()
            .chain(self.indices.iter())
            .chain(self.currencies.iter())
    }

    /// Look up a symbol, ignoring ASCII case.
    pub fn find(&self, symbol: &str) -> Option<&InstrumentSnapshot> {
        let symbol = symbol.trim();
        self.iter().find(|s| s.symbol().eq_ignore_ascii_case(symbol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use market_core::types::Trend;
    use std::collections::HashSet;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 20, 0, 0).unwrap()
    }

    #[test]
    fn test_seed_records_are_valid() {
        let catalog = Catalog::load(now()).unwrap();
        assert_eq!(catalog.stocks().len(), 8);
        assert_eq!(catalog.indices().len(), 5);
        assert_eq!(catalog.currencies().len(), 5);
        assert!(catalog.iter().all(|s| s.last_updated() == now()));
    }

    #[test]
    fn test_symbols_unique() {
        let catalog = Catalog::load(now()).unwrap();
        let symbols: HashSet<&str> = catalog.iter().map(|s| s.symbol()).collect();
        assert_eq!(symbols.len(), catalog.iter().count());
    }

    #[test]
    fn test_only_equities_carry_market_cap() {
        let catalog = Catalog::load(now()).unwrap();
        assert!(catalog.stocks().iter().all(|s| s.market_cap().is_some()));
        assert!(catalog.indices().iter().all(|s| s.market_cap().is_none()));
        assert!(catalog.currencies().iter().all(|s| s.market_cap().is_none()));
    }

    #[test]
    fn test_stored_percent_consistent_with_change() {
        let catalog = Catalog::load(now()).unwrap();
        for s in catalog.iter() {
            let derived = s.change() / s.previous_close() * 100.0;
            assert!(
                (derived - s.change_percent()).abs() < 0.01,
                "{}: stored {} derived {}",
                s.symbol(),
                s.change_percent(),
                derived
            );
        }
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let catalog = Catalog::load(now()).unwrap();
        assert_eq!(catalog.find("tsla").unwrap().trend(), Trend::Down);
        assert_eq!(catalog.find(" eur/usd ").unwrap().symbol(), "EUR/USD");
        assert!(catalog.find("ZZZZ").is_none());
    }

    #[test]
    fn test_seed_stocks_include_unchanged() {
        let stocks = seed_stocks(now()).unwrap();
        assert!(stocks.iter().any(|s| s.trend() == Trend::Flat));
    }
}
