//! "Live" snapshot regeneration.
//!
//! The dashboard shows seed records as if they were ticking. Each refresh
//! takes one bounded random step from the current price and re-derives the
//! change fields against the snapshot's previous close. The input snapshot
//! is never modified; every refresh returns a fresh value.

use chrono::{DateTime, Utc};
use market_core::types::InstrumentSnapshot;
use market_core::{MarketError, Result};
use tracing::{debug, trace};

use crate::rng::RandomSource;
use crate::series::{apply_step, validate_params, StepDistribution};

/// Default per-refresh price step bound, in percent.
pub const DEFAULT_REFRESH_VOLATILITY: f64 = 0.5;

/// Default per-refresh volume drift bound, in percent.
pub const DEFAULT_VOLUME_DRIFT: f64 = 5.0;

/// Produces refreshed snapshot values from existing ones.
///
/// # Examples
///
/// ```rust
/// use chrono::Utc;
/// use market_synth::catalog::seed_stocks;
/// use market_synth::refresh::SnapshotRefresher;
/// use market_synth::rng::SeededRng;
///
/// let now = Utc::now();
/// let stocks = seed_stocks(now).unwrap();
/// let mut rng = SeededRng::from_seed(42);
///
/// let live = SnapshotRefresher::default().refresh_all(&stocks, now, &mut rng).unwrap();
/// assert_eq!(live.len(), stocks.len());
/// assert_eq!(live[0].symbol(), stocks[0].symbol());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapshotRefresher {
    /// Price step bound in percent
    volatility: f64,
    /// Volume drift bound in percent
    volume_drift: f64,
    /// Step distribution
    distribution: StepDistribution,
}

impl SnapshotRefresher {
    /// Create a refresher with the given price step bound.
    pub fn new(volatility: f64) -> Self {
        Self {
            volatility,
            volume_drift: DEFAULT_VOLUME_DRIFT,
            distribution: StepDistribution::Uniform,
        }
    }

    /// Set the volume drift bound in percent.
    pub fn with_volume_drift(mut self, volume_drift: f64) -> Self {
        self.volume_drift = volume_drift;
        self
    }

    /// Set the step distribution.
    pub fn with_distribution(mut self, distribution: StepDistribution) -> Self {
        self.distribution = distribution;
        self
    }

    /// Price step bound in percent.
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Produce a refreshed copy of `snapshot` stamped at `now`.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::InvalidArgument` when the refresher's
    /// volatility or volume drift is negative or non-finite.
    pub fn refresh<S: RandomSource + ?Sized>(
        &self,
        snapshot: &InstrumentSnapshot,
        now: DateTime<Utc>,
        source: &mut S,
    ) -> Result<InstrumentSnapshot> {
        validate_params(snapshot.price(), self.volatility)?;
        if !self.volume_drift.is_finite() || self.volume_drift < 0.0 {
            return Err(MarketError::invalid(format!(
                "volume drift must be finite and non-negative, got {}",
                self.volume_drift
            )));
        }

        let price = snapshot.price();
        let baseline = match snapshot.previous_close() {
            close if close.is_finite() && close > 0.0 => close,
            _ => price,
        };

        let new_price = if self.volatility > 0.0 {
            apply_step(price, self.distribution.draw_percent(self.volatility, source))
        } else {
            price
        };

        let volume = if self.volume_drift > 0.0 && snapshot.volume() > 0 {
            let drift = StepDistribution::Uniform.draw_percent(self.volume_drift, source);
            (snapshot.volume() as f64 * (1.0 + drift / 100.0)).round() as u64
        } else {
            snapshot.volume()
        };

        let mut builder = snapshot
            .to_builder()
            .price(new_price)
            .from_previous_close(baseline)
            .volume(volume)
            .last_updated(now);
        if let Some(cap) = snapshot.market_cap() {
            builder = builder.market_cap(cap * new_price / price);
        }

        let refreshed = builder.build()?;
        trace!(
            symbol = refreshed.symbol(),
            price = refreshed.price(),
            change_percent = refreshed.change_percent(),
            "refreshed snapshot"
        );
        Ok(refreshed)
    }

    /// Refresh every snapshot, preserving input order.
    pub fn refresh_all<S: RandomSource + ?Sized>(
        &self,
        snapshots: &[InstrumentSnapshot],
        now: DateTime<Utc>,
        source: &mut S,
    ) -> Result<Vec<InstrumentSnapshot>> {
        debug!(count = snapshots.len(), volatility = self.volatility, "refreshing snapshots");
        snapshots
            .iter()
            .map(|s| self.refresh(s, now, &mut *source))
            .collect()
    }
}

impl Default for SnapshotRefresher {
    fn default() -> Self {
        Self::new(DEFAULT_REFRESH_VOLATILITY)
    }
}
