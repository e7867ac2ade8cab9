//! Single-instrument history command

use std::io::Write;

use chrono::Utc;
use market_core::types::PricePoint;
use market_synth::catalog::Catalog;
use market_synth::rng::RandomSource;
use market_synth::series::{SeriesGenerator, StepDistribution};
use serde::Serialize;
use tracing::info;

use crate::config::{MarketConfig, MAX_HISTORY_LENGTH};
use crate::error::{CliError, Result};
use crate::render;
use crate::{random_source, OutputFormat};

/// Command-line overrides for a series request.
#[derive(Debug, Clone, Default)]
pub struct SeriesArgs {
    pub symbol: String,
    pub length: Option<usize>,
    pub volatility: Option<f64>,
    pub seed: Option<u64>,
    pub distribution: Option<StepDistribution>,
    pub format: OutputFormat,
}

/// Generated history for one instrument.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesReport {
    pub symbol: String,
    pub name: String,
    pub seed: Option<u64>,
    pub volatility: f64,
    pub distribution: StepDistribution,
    pub points: Vec<PricePoint>,
}

/// Generate the report for `args`, drawing from `source`.
///
/// The walk starts at the instrument's catalogue price.
pub fn build<S: RandomSource + ?Sized>(
    config: &MarketConfig,
    args: &SeriesArgs,
    source: &mut S,
) -> Result<SeriesReport> {
    let catalog = Catalog::load(Utc::now())?;
    let snapshot = catalog
        .find(&args.symbol)
        .ok_or_else(|| CliError::UnknownSymbol(args.symbol.clone()))?;

    let length = args.length.unwrap_or(config.history_length);
    if length == 0 || length > MAX_HISTORY_LENGTH {
        return Err(CliError::invalid_argument(format!(
            "length must be between 1 and {}, got {}",
            MAX_HISTORY_LENGTH, length
        )));
    }

    let generator = SeriesGenerator::new(length, args.volatility.unwrap_or(config.chart_volatility))
        .with_distribution(args.distribution.unwrap_or(config.distribution));
    let points = generator.generate_points(snapshot.price(), source)?;

    Ok(SeriesReport {
        symbol: snapshot.symbol().to_string(),
        name: snapshot.name().to_string(),
        seed: args.seed.or(config.seed),
        volatility: generator.volatility(),
        distribution: generator.distribution(),
        points,
    })
}

/// Run the series command.
pub fn run<W: Write>(config: &MarketConfig, args: &SeriesArgs, out: &mut W) -> Result<()> {
    let mut source = random_source(args.seed.or(config.seed));
    let report = build(config, args, source.as_mut())?;

    info!(
        symbol = %report.symbol,
        points = report.points.len(),
        distribution = report.distribution.name(),
        "series generated"
    );

    match args.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
        OutputFormat::Table => {
            let prices: Vec<f64> = report.points.iter().map(|p| p.price).collect();
            writeln!(
                out,
                "{} ({}), {} steps at ±{}%",
                report.symbol, report.name, report.distribution, report.volatility
            )?;
            writeln!(out, "{}\n", render::sparkline(&prices))?;
            write!(out, "{}", render::series_table(&report.points))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use market_synth::rng::SeededRng;

    fn args(symbol: &str) -> SeriesArgs {
        SeriesArgs {
            symbol: symbol.to_string(),
            ..SeriesArgs::default()
        }
    }

    #[test]
    fn test_defaults_from_config() {
        let config = MarketConfig::default();
        let report = build(&config, &args("msft"), &mut SeededRng::from_seed(2)).unwrap();
        assert_eq!(report.symbol, "MSFT");
        assert_eq!(report.points.len(), 30);
        assert_relative_eq!(report.points[0].price, 415.50);
        assert_eq!(report.volatility, 2.5);
        assert_eq!(report.distribution, StepDistribution::Uniform);
    }

    #[test]
    fn test_argument_overrides() {
        let config = MarketConfig::default();
        let request = SeriesArgs {
            length: Some(90),
            volatility: Some(0.0),
            seed: Some(4),
            distribution: Some(StepDistribution::Gaussian),
            ..args("EUR/USD")
        };
        let report = build(&config, &request, &mut SeededRng::from_seed(4)).unwrap();
        assert_eq!(report.points.len(), 90);
        assert_eq!(report.seed, Some(4));
        assert!(report.points.iter().all(|p| p.price == report.points[0].price));
    }

    #[test]
    fn test_unknown_symbol() {
        let config = MarketConfig::default();
        let err = build(&config, &args("ZZZZ"), &mut SeededRng::from_seed(1)).unwrap_err();
        assert!(matches!(err, CliError::UnknownSymbol(ref s) if s == "ZZZZ"));
    }

    #[test]
    fn test_zero_length_rejected() {
        let config = MarketConfig::default();
        let request = SeriesArgs {
            length: Some(0),
            ..args("AAPL")
        };
        let err = build(&config, &request, &mut SeededRng::from_seed(1)).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }

    #[test]
    fn test_length_above_limit_rejected() {
        let config = MarketConfig::default();
        for length in [MAX_HISTORY_LENGTH + 1, usize::MAX] {
            let request = SeriesArgs {
                length: Some(length),
                ..args("AAPL")
            };
            let err = build(&config, &request, &mut SeededRng::from_seed(1)).unwrap_err();
            assert!(matches!(err, CliError::InvalidArgument(_)), "length={length}");
        }
    }

    #[test]
    fn test_oversized_volatility_writes_nothing() {
        let config = MarketConfig::default();
        let request = SeriesArgs {
            length: Some(10),
            volatility: Some(1e300),
            seed: Some(1),
            format: OutputFormat::Json,
            ..args("AAPL")
        };
        let mut out = Vec::new();
        let err = run(&config, &request, &mut out).unwrap_err();
        assert!(matches!(err, CliError::Market(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_negative_volatility_is_market_error() {
        let config = MarketConfig::default();
        let request = SeriesArgs {
            volatility: Some(-1.0),
            ..args("AAPL")
        };
        let err = build(&config, &request, &mut SeededRng::from_seed(1)).unwrap_err();
        assert!(matches!(err, CliError::Market(_)));
    }
}
