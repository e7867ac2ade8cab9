//! Generated price history steps.

use serde::{Deserialize, Serialize};

/// A single step of a generated price history.
///
/// The sequence index implies time order: index 0 is the oldest point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Position in the history, oldest first
    pub index: usize,
    /// Price at this step
    pub price: f64,
}

impl PricePoint {
    /// Create a new price point.
    #[inline]
    pub fn new(index: usize, price: f64) -> Self {
        Self { index, price }
    }

    /// Attach sequence indices to a chronological price series.
    pub fn from_series(prices: &[f64]) -> Vec<Self> {
        prices
            .iter()
            .enumerate()
            .map(|(index, &price)| Self::new(index, price))
            .collect()
    }
}
