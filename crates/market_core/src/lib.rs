//! # market_core: Foundation Types for Synthetic Market Data
//!
//! ## Layer 1 (Foundation) Role
//!
//! market_core is the bottom layer of the workspace, providing:
//! - Instrument snapshot values: `InstrumentSnapshot`, `InstrumentKind`, `Trend`
//!   (`types::snapshot`)
//! - Generated history steps: `PricePoint` (`types::price_point`)
//! - Error types: `MarketError` (`types::error`)
//! - Display helpers for stat tiles and cards (`format`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other market_* crates, with minimal external dependencies:
//! - chrono: Snapshot timestamps
//! - serde: Serialisation of snapshots for JSON output
//! - thiserror: Error derivation
//!
//! ## Usage Examples
//!
//! ```rust
//! use chrono::Utc;
//! use market_core::format::format_percentage;
//! use market_core::types::{InstrumentKind, InstrumentSnapshot, Trend};
//!
//! let aapl = InstrumentSnapshot::builder("AAPL", "Apple Inc.", InstrumentKind::Equity)
//!     .price(187.68)
//!     .change(1.34, 0.72)
//!     .volume(53_240_000)
//!     .market_cap(2.92e12)
//!     .last_updated(Utc::now())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(aapl.trend(), Trend::Up);
//! assert_eq!(format_percentage(aapl.change_percent()), "+0.72%");
//! ```

pub mod format;
pub mod types;

pub use types::error::{MarketError, Result};
