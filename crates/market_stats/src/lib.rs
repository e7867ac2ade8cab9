//! # market_stats: Derived Market Statistics
//!
//! Summary statistics over a collection of instrument snapshots, as shown on
//! the dashboard's stat tiles:
//!
//! - gainers, losers and unchanged instruments (stable filters)
//! - top gainer and top loser by percent change (first wins on ties)
//! - total market capitalisation and total volume
//!
//! Statistics are recomputed on demand and never cached.
//!
//! ```rust
//! use chrono::Utc;
//! use market_core::types::{InstrumentKind, InstrumentSnapshot};
//! use market_stats::aggregate;
//!
//! let now = Utc::now();
//! let snap = |symbol: &str, change: f64, pct: f64| {
//!     InstrumentSnapshot::builder(symbol, symbol, InstrumentKind::Equity)
//!         .price(100.0)
//!         .change(change, pct)
//!         .last_updated(now)
//!         .build()
//!         .unwrap()
//! };
//!
//! let stats = aggregate(&[
//!     snap("AAPL", 2.44, 2.5),
//!     snap("TSLA", -3.2, -3.1),
//!     snap("MSFT", 0.0, 0.0),
//! ])
//! .unwrap();
//!
//! assert_eq!(stats.top_gainer.symbol(), "AAPL");
//! assert_eq!(stats.top_loser.symbol(), "TSLA");
//! assert_eq!(stats.gainers.len(), 1);
//! assert_eq!(stats.losers.len(), 1);
//! ```

pub mod aggregator;
pub mod summation;

pub use aggregator::{aggregate, DerivedStatistics, MarketAggregator};
