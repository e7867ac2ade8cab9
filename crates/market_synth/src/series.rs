//! Synthetic price history generator.
//!
//! Generates bounded random-walk price histories for sparklines and charts.
//!
//! ## Walk
//!
//! Element 0 is the seed price. Each later element applies a percentage
//! step `δ ∈ [-volatility, +volatility]` multiplicatively to the previous
//! value, then floors it at [`PRICE_FLOOR`]:
//!
//! ```text
//! p[i] = max(p[i-1] * (1 + δ/100), PRICE_FLOOR)
//! ```
//!
//! Histories are chronological: oldest point first.

use std::fmt;
use std::str::FromStr;

use market_core::types::PricePoint;
use market_core::{MarketError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::rng::RandomSource;

/// Lowest price a generated step may reach.
pub const PRICE_FLOOR: f64 = 1e-4;

/// Largest accepted step bound (percent); a step below -100% has no meaning.
pub const MAX_VOLATILITY: f64 = 100.0;

/// Default number of points in a card sparkline.
pub const DEFAULT_HISTORY_LENGTH: usize = 30;

/// Default step bound (percent) for card sparklines.
pub const DEFAULT_CARD_VOLATILITY: f64 = 2.0;

/// Default step bound (percent) for the detail chart.
pub const DEFAULT_CHART_VOLATILITY: f64 = 2.5;

/// Distribution of the per-step percentage move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepDistribution {
    /// Uniform over `[-volatility, +volatility)`
    #[default]
    Uniform,
    /// Normal with σ = volatility / 3, clamped to the band
    Gaussian,
}

impl StepDistribution {
    /// Get the name of this distribution.
    pub fn name(&self) -> &'static str {
        match self {
            StepDistribution::Uniform => "uniform",
            StepDistribution::Gaussian => "gaussian",
        }
    }

    /// Draw one percentage move bounded by `volatility`.
    pub fn draw_percent<S: RandomSource + ?Sized>(&self, volatility: f64, source: &mut S) -> f64 {
        match self {
            StepDistribution::Uniform => (2.0 * source.next_unit() - 1.0) * volatility,
            StepDistribution::Gaussian => {
                (source.next_normal() * volatility / 3.0).clamp(-volatility, volatility)
            }
        }
    }
}

impl fmt::Display for StepDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StepDistribution {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "uniform" => Ok(StepDistribution::Uniform),
            "gaussian" | "normal" => Ok(StepDistribution::Gaussian),
            other => Err(MarketError::invalid(format!(
                "unknown step distribution '{}'. Supported: uniform, gaussian",
                other
            ))),
        }
    }
}

/// Check generator parameters.
pub fn validate_params(seed_price: f64, volatility: f64) -> Result<()> {
    if !seed_price.is_finite() || seed_price <= 0.0 {
        return Err(MarketError::invalid(format!(
            "seed price must be finite and positive, got {}",
            seed_price
        )));
    }
    if !volatility.is_finite() || !(0.0..=MAX_VOLATILITY).contains(&volatility) {
        return Err(MarketError::invalid(format!(
            "volatility must be between 0 and {}, got {}",
            MAX_VOLATILITY, volatility
        )));
    }
    Ok(())
}

/// Apply one percentage step to a price, keeping it in `[PRICE_FLOOR, f64::MAX]`.
#[inline]
pub fn apply_step(price: f64, delta_percent: f64) -> f64 {
    (price * (1.0 + delta_percent / 100.0)).clamp(PRICE_FLOOR, f64::MAX)
}

/// Generate a uniform random-walk history of `length` prices.
///
/// # Errors
///
/// Returns `MarketError::InvalidArgument` for a non-finite or non-positive
/// seed price, a volatility outside `[0, MAX_VOLATILITY]`, or a length that
/// cannot be allocated.
///
/// # Examples
///
/// ```rust
/// use market_synth::rng::SeededRng;
/// use market_synth::series::generate_series;
///
/// let mut rng = SeededRng::from_seed(1);
/// assert_eq!(generate_series(5, 100.0, 0.0, &mut rng).unwrap(), vec![100.0; 5]);
/// ```
pub fn generate_series<S: RandomSource + ?Sized>(
    length: usize,
    seed_price: f64,
    volatility: f64,
    source: &mut S,
) -> Result<Vec<f64>> {
    generate_series_with(StepDistribution::Uniform, length, seed_price, volatility, source)
}

/// Generate a random-walk history using the given step distribution.
///
/// `length <= 1` yields `[seed_price]`; zero volatility yields a constant
/// series without consuming any draws.
pub fn generate_series_with<S: RandomSource + ?Sized>(
    distribution: StepDistribution,
    length: usize,
    seed_price: f64,
    volatility: f64,
    source: &mut S,
) -> Result<Vec<f64>> {
    validate_params(seed_price, volatility)?;

    debug!(
        length,
        seed_price,
        volatility,
        distribution = distribution.name(),
        "generating price series"
    );

    if length <= 1 {
        return Ok(vec![seed_price]);
    }

    let mut series = Vec::new();
    series
        .try_reserve_exact(length)
        .map_err(|e| MarketError::invalid(format!("cannot allocate {} prices: {}", length, e)))?;

    if volatility == 0.0 {
        series.resize(length, seed_price);
        return Ok(series);
    }

    let mut price = seed_price;
    series.push(price);
    for _ in 1..length {
        let delta = distribution.draw_percent(volatility, source);
        price = apply_step(price, delta);
        series.push(price);
    }
    Ok(series)
}

/// Generate a uniform random-walk history as indexed points.
pub fn generate_points<S: RandomSource + ?Sized>(
    length: usize,
    seed_price: f64,
    volatility: f64,
    source: &mut S,
) -> Result<Vec<PricePoint>> {
    generate_series(length, seed_price, volatility, source).map(|s| PricePoint::from_series(&s))
}

/// Reusable history generator with fixed length, volatility and distribution.
///
/// # Examples
///
/// ```rust
/// use market_synth::rng::SeededRng;
/// use market_synth::series::{SeriesGenerator, StepDistribution};
///
/// let generator = SeriesGenerator::chart_history().with_distribution(StepDistribution::Gaussian);
/// let mut rng = SeededRng::from_seed(3);
/// let points = generator.generate_points(415.50, &mut rng).unwrap();
/// assert_eq!(points.len(), 30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesGenerator {
    length: usize,
    volatility: f64,
    distribution: StepDistribution,
}

impl SeriesGenerator {
    /// Create a generator with a uniform step distribution.
    pub fn new(length: usize, volatility: f64) -> Self {
        Self {
            length,
            volatility,
            distribution: StepDistribution::Uniform,
        }
    }

    /// Sparkline settings used on instrument cards.
    pub fn card_history() -> Self {
        Self::new(DEFAULT_HISTORY_LENGTH, DEFAULT_CARD_VOLATILITY)
    }

    /// Settings used for the selected-instrument chart.
    pub fn chart_history() -> Self {
        Self::new(DEFAULT_HISTORY_LENGTH, DEFAULT_CHART_VOLATILITY)
    }

    /// Set the step distribution.
    pub fn with_distribution(mut self, distribution: StepDistribution) -> Self {
        self.distribution = distribution;
        self
    }

    /// Set the history length.
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    /// Set the step bound in percent.
    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.volatility = volatility;
        self
    }

    /// Number of points generated.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Step bound in percent.
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Step distribution.
    pub fn distribution(&self) -> StepDistribution {
        self.distribution
    }

    /// Generate a history starting at `seed_price`.
    pub fn generate<S: RandomSource + ?Sized>(
        &self,
        seed_price: f64,
        source: &mut S,
    ) -> Result<Vec<f64>> {
        generate_series_with(
            self.distribution,
            self.length,
            seed_price,
            self.volatility,
            source,
        )
    }

    /// Generate a history as indexed points.
    pub fn generate_points<S: RandomSource + ?Sized>(
        &self,
        seed_price: f64,
        source: &mut S,
    ) -> Result<Vec<PricePoint>> {
        self.generate(seed_price, source)
            .map(|s| PricePoint::from_series(&s))
    }
}

impl Default for SeriesGenerator {
    fn default() -> Self {
        Self::card_history()
    }
}
