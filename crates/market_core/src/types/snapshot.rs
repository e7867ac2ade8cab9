//! Instrument snapshot types.
//!
//! An [`InstrumentSnapshot`] is one priced entity (stock, index or currency
//! pair) at a point in time. Snapshots are immutable values: refreshing a
//! quote produces a new snapshot rather than mutating an existing one.
//!
//! # Examples
//!
//! ```
//! use chrono::Utc;
//! use market_core::types::{InstrumentKind, InstrumentSnapshot, Trend};
//!
//! let tsla = InstrumentSnapshot::builder("TSLA", "Tesla, Inc.", InstrumentKind::Equity)
//!     .price(177.67)
//!     .from_previous_close(183.36)
//!     .volume(98_500_000)
//!     .last_updated(Utc::now())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(tsla.trend(), Trend::Down);
//! assert!(tsla.change_percent() < 0.0);
//! ```

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::{MarketError, Result};

/// Kind of priced instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstrumentKind {
    /// Listed equity (carries a market capitalisation)
    Equity,
    /// Market index
    Index,
    /// Foreign exchange pair
    CurrencyPair,
}

impl InstrumentKind {
    /// Get the display name of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            InstrumentKind::Equity => "Equity",
            InstrumentKind::Index => "Index",
            InstrumentKind::CurrencyPair => "CurrencyPair",
        }
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Direction of the last price change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    /// Positive change
    Up,
    /// Negative change
    Down,
    /// No change
    Flat,
}

impl Trend {
    /// Classify a signed change.
    pub fn from_change(change: f64) -> Self {
        match sign_of(change) {
            Ordering::Greater => Trend::Up,
            Ordering::Less => Trend::Down,
            Ordering::Equal => Trend::Flat,
        }
    }
}

/// Sign of a finite value, treating `-0.0` as zero.
#[inline]
fn sign_of(value: f64) -> Ordering {
    value.partial_cmp(&0.0).unwrap_or(Ordering::Equal)
}

/// One priced instrument at a point in time.
///
/// # Invariants
///
/// Checked by [`SnapshotBuilder::build`]:
/// - `price` is finite and strictly positive
/// - `change` and `change_percent` are finite and share a sign (or are both zero)
/// - `market_cap`, when present, is finite and non-negative
///
/// The magnitude relation `change_percent = change / (price - change) * 100`
/// is left to the caller; use [`SnapshotBuilder::from_previous_close`] to
/// derive both fields consistently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SnapshotRecord")]
pub struct InstrumentSnapshot {
    symbol: String,
    name: String,
    kind: InstrumentKind,
    price: f64,
    change: f64,
    change_percent: f64,
    volume: u64,
    market_cap: Option<f64>,
    last_updated: DateTime<Utc>,
}

impl InstrumentSnapshot {
    /// Start building a snapshot.
    pub fn builder(
        symbol: impl Into<String>,
        name: impl Into<String>,
        kind: InstrumentKind,
    ) -> SnapshotBuilder {
        SnapshotBuilder::new(symbol, name, kind)
    }

    /// Builder pre-populated with this snapshot's fields.
    pub fn to_builder(&self) -> SnapshotBuilder {
        SnapshotBuilder {
            symbol: self.symbol.clone(),
            name: self.name.clone(),
            kind: self.kind,
            price: Some(self.price),
            change: Some((self.change, self.change_percent)),
            previous_close: None,
            volume: self.volume,
            market_cap: self.market_cap,
            last_updated: Some(self.last_updated),
        }
    }

    /// Unique instrument identifier.
    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Instrument kind.
    #[inline]
    pub fn kind(&self) -> InstrumentKind {
        self.kind
    }

    /// Current price.
    #[inline]
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Absolute change since the previous close.
    #[inline]
    pub fn change(&self) -> f64 {
        self.change
    }

    /// Percentage change since the previous close.
    #[inline]
    pub fn change_percent(&self) -> f64 {
        self.change_percent
    }

    /// Traded volume.
    #[inline]
    pub fn volume(&self) -> u64 {
        self.volume
    }

    /// Market capitalisation, absent for non-equity instruments.
    #[inline]
    pub fn market_cap(&self) -> Option<f64> {
        self.market_cap
    }

    /// Time of the last update.
    #[inline]
    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    /// Price implied before the current change (`price - change`).
    #[inline]
    pub fn previous_close(&self) -> f64 {
        self.price - self.change
    }

    /// Direction of the current change.
    pub fn trend(&self) -> Trend {
        Trend::from_change(self.change)
    }
}

/// Builder for validated [`InstrumentSnapshot`] values.
#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    symbol: String,
    name: String,
    kind: InstrumentKind,
    price: Option<f64>,
    change: Option<(f64, f64)>,
    previous_close: Option<f64>,
    volume: u64,
    market_cap: Option<f64>,
    last_updated: Option<DateTime<Utc>>,
}

impl SnapshotBuilder {
    /// Create a builder with no price and zero change.
    pub fn new(symbol: impl Into<String>, name: impl Into<String>, kind: InstrumentKind) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            kind,
            price: None,
            change: None,
            previous_close: None,
            volume: 0,
            market_cap: None,
            last_updated: None,
        }
    }

    /// Set the current price.
    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the absolute and percentage change as stored values.
    pub fn change(mut self, change: f64, change_percent: f64) -> Self {
        self.change = Some((change, change_percent));
        self.previous_close = None;
        self
    }

    /// Derive the change fields from a previous close at build time.
    pub fn from_previous_close(mut self, previous_close: f64) -> Self {
        self.previous_close = Some(previous_close);
        self.change = None;
        self
    }

    /// Set the traded volume.
    pub fn volume(mut self, volume: u64) -> Self {
        self.volume = volume;
        self
    }

    /// Set the market capitalisation.
    pub fn market_cap(mut self, market_cap: f64) -> Self {
        self.market_cap = Some(market_cap);
        self
    }

    /// Clear the market capitalisation.
    pub fn without_market_cap(mut self) -> Self {
        self.market_cap = None;
        self
    }

    /// Set the update timestamp. Defaults to the current time.
    pub fn last_updated(mut self, last_updated: DateTime<Utc>) -> Self {
        self.last_updated = Some(last_updated);
        self
    }

    /// Validate and build the snapshot.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::InvalidArgument` when any invariant on
    /// [`InstrumentSnapshot`] is violated.
    pub fn build(self) -> Result<InstrumentSnapshot> {
        if self.symbol.trim().is_empty() {
            return Err(MarketError::invalid("symbol must not be empty"));
        }

        let price = self
            .price
            .ok_or_else(|| MarketError::invalid(format!("{}: price not set", self.symbol)))?;
        if !price.is_finite() || price <= 0.0 {
            return Err(MarketError::invalid(format!(
                "{}: price must be finite and positive, got {}",
                self.symbol, price
            )));
        }

        let (change, change_percent) = match (self.previous_close, self.change) {
            (Some(previous), _) => {
                if !previous.is_finite() || previous <= 0.0 {
                    return Err(MarketError::invalid(format!(
                        "{}: previous close must be finite and positive, got {}",
                        self.symbol, previous
                    )));
                }
                let change = price - previous;
                (change, change / previous * 100.0)
            }
            (None, Some(pair)) => pair,
            (None, None) => (0.0, 0.0),
        };

        if !change.is_finite() || !change_percent.is_finite() {
            return Err(MarketError::invalid(format!(
                "{}: change fields must be finite",
                self.symbol
            )));
        }
        if sign_of(change) != sign_of(change_percent) {
            return Err(MarketError::invalid(format!(
                "{}: change {} and change percent {} disagree in sign",
                self.symbol, change, change_percent
            )));
        }

        if let Some(cap) = self.market_cap {
            if !cap.is_finite() || cap < 0.0 {
                return Err(MarketError::invalid(format!(
                    "{}: market cap must be finite and non-negative, got {}",
                    self.symbol, cap
                )));
            }
        }

        Ok(InstrumentSnapshot {
            symbol: self.symbol,
            name: self.name,
            kind: self.kind,
            price,
            change,
            change_percent,
            volume: self.volume,
            market_cap: self.market_cap,
            last_updated: self.last_updated.unwrap_or_else(Utc::now),
        })
    }
}

/// Unvalidated wire form, checked on deserialisation.
#[derive(Deserialize)]
struct SnapshotRecord {
    symbol: String,
    name: String,
    kind: InstrumentKind,
    price: f64,
    change: f64,
    change_percent: f64,
    volume: u64,
    #[serde(default)]
    market_cap: Option<f64>,
    last_updated: DateTime<Utc>,
}

impl TryFrom<SnapshotRecord> for InstrumentSnapshot {
    type Error = MarketError;

    fn try_from(record: SnapshotRecord) -> Result<Self> {
        let mut builder = SnapshotBuilder::new(record.symbol, record.name, record.kind)
            .price(record.price)
            .change(record.change, record.change_percent)
            .volume(record.volume)
            .last_updated(record.last_updated);
        if let Some(cap) = record.market_cap {
            builder = builder.market_cap(cap);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 16, 0, 0).unwrap()
    }

    fn equity(symbol: &str) -> SnapshotBuilder {
        InstrumentSnapshot::builder(symbol, format!("{symbol} Corp"), InstrumentKind::Equity)
            .last_updated(stamp())
    }

    #[test]
    fn test_build_stores_fields() {
        let s = equity("AAPL")
            .price(187.68)
            .change(1.34, 0.72)
            .volume(53_240_000)
            .market_cap(2.92e12)
            .build()
            .unwrap();

        assert_eq!(s.symbol(), "AAPL");
        assert_eq!(s.kind(), InstrumentKind::Equity);
        assert_eq!(s.price(), 187.68);
        assert_eq!(s.change(), 1.34);
        assert_eq!(s.change_percent(), 0.72);
        assert_eq!(s.volume(), 53_240_000);
        assert_eq!(s.market_cap(), Some(2.92e12));
        assert_eq!(s.last_updated(), stamp());
        assert_relative_eq!(s.previous_close(), 186.34, epsilon = 1e-9);
    }

    #[test]
    fn test_missing_price_rejected() {
        let err = equity("AAPL").build().unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_non_positive_price_rejected() {
        for price in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(equity("X").price(price).build().is_err(), "price {price}");
        }
    }

    #[test]
    fn test_empty_symbol_rejected() {
        assert!(equity("  ").price(1.0).build().is_err());
    }

    #[test]
    fn test_sign_mismatch_rejected() {
        let err = equity("MSFT").price(400.0).change(2.0, -0.5).build().unwrap_err();
        assert!(err.to_string().contains("disagree in sign"));

        assert!(equity("MSFT").price(400.0).change(0.0, 0.1).build().is_err());
    }

    #[test]
    fn test_negative_zero_counts_as_zero() {
        let s = equity("MSFT").price(400.0).change(-0.0, 0.0).build().unwrap();
        assert_eq!(s.trend(), Trend::Flat);
    }

    #[test]
    fn test_negative_market_cap_rejected() {
        assert!(equity("X").price(1.0).market_cap(-5.0).build().is_err());
    }

    #[test]
    fn test_from_previous_close_derives_change() {
        let s = equity("NVDA").price(110.0).from_previous_close(100.0).build().unwrap();
        assert_relative_eq!(s.change(), 10.0, epsilon = 1e-12);
        assert_relative_eq!(s.change_percent(), 10.0, epsilon = 1e-12);
        assert_relative_eq!(s.previous_close(), 100.0, epsilon = 1e-12);
        assert_eq!(s.trend(), Trend::Up);
    }

    #[test]
    fn test_from_previous_close_rejects_zero() {
        assert!(equity("X").price(10.0).from_previous_close(0.0).build().is_err());
    }

    #[test]
    fn test_default_change_is_flat() {
        let s = equity("X").price(10.0).build().unwrap();
        assert_eq!(s.change(), 0.0);
        assert_eq!(s.trend(), Trend::Flat);
    }

    #[test]
    fn test_to_builder_round_trip() {
        let s = equity("AMZN").price(178.0).change(-1.0, -0.56).market_cap(1.8e12).build().unwrap();
        let copy = s.to_builder().build().unwrap();
        assert_eq!(s, copy);

        let moved = s.to_builder().price(180.0).from_previous_close(179.0).build().unwrap();
        assert_eq!(s.price(), 178.0);
        assert_eq!(moved.trend(), Trend::Up);
    }

    #[test]
    fn test_trend_classification() {
        assert_eq!(Trend::from_change(0.5), Trend::Up);
        assert_eq!(Trend::from_change(-0.5), Trend::Down);
        assert_eq!(Trend::from_change(0.0), Trend::Flat);
    }

    #[test]
    fn test_deserialise_validates() {
        let json = r#"{
            "symbol": "EUR/USD", "name": "Euro / US Dollar", "kind": "currency_pair",
            "price": 1.0842, "change": 0.0012, "change_percent": -0.11,
            "volume": 0, "last_updated": "2024-03-15T16:00:00Z"
        }"#;
        let err = serde_json::from_str::<InstrumentSnapshot>(json).unwrap_err();
        assert!(err.to_string().contains("disagree in sign"));
    }

    #[test]
    fn test_serde_json_round_trip() {
        let s = equity("GOOGL").price(141.8).change(0.9, 0.64).market_cap(1.77e12).build().unwrap();
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"kind\":\"equity\""));
        let back: InstrumentSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.symbol(), s.symbol());
        assert_eq!(back.last_updated(), s.last_updated());
        assert_relative_eq!(back.price(), s.price(), epsilon = 1e-9);
        assert_relative_eq!(back.market_cap().unwrap(), 1.77e12, max_relative = 1e-12);
    }
}
