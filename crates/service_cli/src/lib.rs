//! # marketdash
//!
//! Command-line dashboard over synthetic market data.
//!
//! This crate wires the market layers together:
//!
//! - [`market_synth`] seeds and refreshes snapshots and generates histories
//! - [`market_stats`] derives gainers, losers, top movers and totals
//! - [`market_core`] supplies the shared types and display formatting
//!
//! Commands write to any [`std::io::Write`] so they can be driven from
//! tests as well as from the `marketdash` binary.

use clap::ValueEnum;
use market_synth::rng::{RandomSource, SeededRng, ThreadRandom};

pub mod commands;
pub mod config;
pub mod error;
pub mod render;

pub use config::{ConfigError, MarketConfig};
pub use error::{CliError, Result};

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable terminal output
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Random source for a run: seeded when `seed` is set, thread RNG otherwise.
pub fn random_source(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(SeededRng::from_seed(seed)),
        None => Box::new(ThreadRandom::new()),
    }
}
