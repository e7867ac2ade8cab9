//! Configuration check command
//!
//! Prints the effective configuration and reports validation problems.

use std::io::Write;
use std::path::Path;

use tracing::warn;

use crate::config::{ConfigError, MarketConfig};
use crate::error::Result;

/// Run the check command.
///
/// Writes the effective settings, then returns the validation error when
/// the configuration is unusable.
pub fn run<W: Write>(config: &MarketConfig, path: &Path, out: &mut W) -> Result<()> {
    let source = if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not found, using defaults)", path.display())
    };

    writeln!(out, "Configuration: {}", source)?;
    writeln!(out, "  history_length     = {}", config.history_length)?;
    writeln!(out, "  card_volatility    = {}", config.card_volatility)?;
    writeln!(out, "  chart_volatility   = {}", config.chart_volatility)?;
    writeln!(out, "  refresh_volatility = {}", config.refresh_volatility)?;
    writeln!(out, "  distribution       = {}", config.distribution)?;
    match config.seed {
        Some(seed) => writeln!(out, "  seed               = {}", seed)?,
        None => writeln!(out, "  seed               = (thread rng)")?,
    }
    writeln!(out, "  log_level          = {}", config.log_level)?;
    writeln!(out, "  watchlist_size     = {}", config.watchlist_size)?;

    match config.validate() {
        Ok(()) => {
            writeln!(out, "\nConfiguration OK")?;
            Ok(())
        }
        Err(ConfigError::Validation(errors)) => {
            writeln!(out, "\n{} problem(s) found:", errors.len())?;
            for error in &errors {
                warn!("{}", error);
                writeln!(out, "  - {}", error)?;
            }
            Err(ConfigError::Validation(errors).into())
        }
        Err(other) => Err(other.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;

    #[test]
    fn test_valid_config_reports_ok() {
        let mut out = Vec::new();
        run(
            &MarketConfig::default(),
            Path::new("does-not-exist.toml"),
            &mut out,
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("not found, using defaults"));
        assert!(text.contains("seed               = (thread rng)"));
        assert!(text.ends_with("Configuration OK\n"));
    }

    #[test]
    fn test_invalid_config_lists_problems() {
        let config = MarketConfig {
            watchlist_size: 0,
            ..MarketConfig::default()
        };
        let mut out = Vec::new();
        let err = run(&config, Path::new("does-not-exist.toml"), &mut out).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::Validation(_))));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("1 problem(s) found"));
        assert!(text.contains("watchlist_size"));
    }
}
