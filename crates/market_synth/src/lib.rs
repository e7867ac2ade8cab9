//! # Synthetic Market Data
//!
//! Fabricates plausible market data for the dashboard presentation layer.
//!
//! ## Modules
//!
//! - [`rng`]: Injectable random sources (`RandomSource`, `SeededRng`, `ThreadRandom`)
//! - [`series`]: Bounded random-walk price histories
//! - [`refresh`]: "Live" snapshot regeneration from seed records
//! - [`catalog`]: Static seed stocks, indices and currency pairs
//!
//! Every generator takes its random source as an argument, so a
//! [`SeededRng`](rng::SeededRng) reproduces the same output for the same seed.
//!
//! ```rust
//! use market_synth::prelude::*;
//!
//! let mut rng = SeededRng::from_seed(7);
//! let history = generate_series(30, 187.68, 2.0, &mut rng).unwrap();
//! assert_eq!(history.len(), 30);
//! assert_eq!(history[0], 187.68);
//! ```

pub mod catalog;
pub mod refresh;
pub mod rng;
pub mod series;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::catalog::{seed_currencies, seed_indices, seed_stocks, Catalog};
    pub use crate::refresh::SnapshotRefresher;
    pub use crate::rng::{RandomSource, SeededRng, ThreadRandom};
    pub use crate::series::{
        generate_points, generate_series, generate_series_with, SeriesGenerator,
        StepDistribution, MAX_VOLATILITY, PRICE_FLOOR,
    };
}
