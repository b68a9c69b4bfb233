//! CLI Definitions
//!
//! Command-line interface for replaying the strategy over historical data
//! and inspecting the spread signal.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Oilpairs - BNO/USO Spread Mean Reversion Pairs Trader
#[derive(Parser, Debug)]
#[command(
    name = "oilpairs",
    version = env!("CARGO_PKG_VERSION"),
    about = "BNO/USO spread mean reversion pairs trader",
    long_about = "Oilpairs trades the spread between two correlated oil ETFs: \
                  it shorts the rich leg and longs the cheap leg when the rolling \
                  z-score of the spread stretches past the entry threshold, and \
                  flattens once the spread reverts toward its mean."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay the strategy over a CSV of daily prices
    Run(RunCmd),

    /// Compute the spread z-score for the trailing window of a CSV
    Signal(SignalCmd),
}

/// Replay the strategy day by day
#[derive(Parser, Debug)]
pub struct RunCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config/pairs.toml")]
    pub config: PathBuf,

    /// CSV of daily prices with header date,price_a,price_b
    #[arg(short, long, value_name = "FILE")]
    pub data: PathBuf,
}

/// One-shot signal check
#[derive(Parser, Debug)]
pub struct SignalCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config/pairs.toml")]
    pub config: PathBuf,

    /// CSV of daily prices with header date,price_a,price_b
    #[arg(short, long, value_name = "FILE")]
    pub data: PathBuf,

    /// Override the rolling window length
    #[arg(long, value_name = "DAYS")]
    pub window: Option<usize>,
}
