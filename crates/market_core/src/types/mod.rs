//! Core value types for the market data layer.
//!
//! This module provides:
//! - `InstrumentSnapshot`: one priced instrument at a point in time
//! - `InstrumentKind`: equity, index or currency pair
//! - `Trend`: direction of the last change
//! - `PricePoint`: one step of a generated price history
//! - `MarketError`: error taxonomy shared by every crate

pub mod error;
pub mod price_point;
pub mod snapshot;

pub use error::{MarketError, Result};
pub use price_point::PricePoint;
pub use snapshot::{InstrumentKind, InstrumentSnapshot, SnapshotBuilder, Trend};
