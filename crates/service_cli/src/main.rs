//! marketdash - Synthetic market dashboard
//!
//! # Commands
//!
//! - `marketdash overview` - Refresh the catalogue and show stats, watchlist,
//!   indices and currencies
//! - `marketdash series --symbol <SYMBOL>` - Generate a price history for one instrument
//! - `marketdash check` - Show the effective configuration and validate it
//!
//! Logs go to stderr so JSON output on stdout stays machine-readable.

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use market_synth::series::StepDistribution;
use service_cli::commands::{self, series::SeriesArgs};
use service_cli::{MarketConfig, OutputFormat};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Synthetic market dashboard CLI
#[derive(Parser)]
#[command(name = "marketdash")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "marketdash.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show market stats, watchlist, indices and currencies
    Overview {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Generate a synthetic price history for one instrument
    Series {
        /// Instrument symbol (e.g. AAPL, SPX, EUR/USD)
        #[arg(short, long)]
        symbol: String,

        /// Number of points, including the starting price
        #[arg(short, long)]
        length: Option<usize>,

        /// Maximum step size in percent
        #[arg(long)]
        volatility: Option<f64>,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Step distribution (uniform, gaussian)
        #[arg(short, long)]
        distribution: Option<StepDistribution>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Check configuration
    Check,
}

fn init_tracing(verbose: bool, config_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { config_level };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
    });

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = MarketConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?
        .with_env_override();

    init_tracing(cli.verbose, &config.log_level);
    debug!(config = %cli.config.display(), "configuration loaded");

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !matches!(cli.command, Commands::Check) {
        config.validate().context("invalid configuration")?;
    }

    match cli.command {
        Commands::Check => commands::check::run(&config, &cli.config, &mut out)?,
        Commands::Overview { format } => commands::overview::run(&config, format, &mut out)?,
        Commands::Series {
            symbol,
            length,
            volatility,
            seed,
            distribution,
            format,
        } => {
            let args = SeriesArgs {
                symbol,
                length,
                volatility,
                seed,
                distribution,
                format,
            };
            commands::series::run(&config, &args, &mut out)?
        }
    }

    Ok(())
}
