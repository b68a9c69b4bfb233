//! Oilpairs - BNO/USO Pairs Trading Strategy
//!
//! Replays the spread mean reversion strategy over daily price history.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use oilpairs::adapters::cli::{CliApp, Command, RunCmd, SignalCmd};
use oilpairs::adapters::replay::{load_observations, run_replay, PaperExecution, ReplayFeed};
use oilpairs::application::DailyRebalancer;
use oilpairs::config::load_config;
use oilpairs::domain::{deviation_confidence, SpreadStats};
use oilpairs::ports::InstrumentPair;
use oilpairs::strategy::StrategyConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let app = CliApp::parse();
    init_logging(app.verbose, app.debug);

    match app.command {
        Command::Run(cmd) => run_command(cmd).await,
        Command::Signal(cmd) => signal_command(cmd).await,
    }
}

fn init_logging(verbose: bool, debug: bool) {
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    fmt().with_env_filter(filter).with_target(false).init();
}

async fn run_command(cmd: RunCmd) -> Result<()> {
    tracing::info!("Starting oilpairs replay...");

    let config = load_config(&cmd.config).context("Failed to load configuration")?;
    let strategy_config = StrategyConfig::from(&config);
    let pair = InstrumentPair::new(
        config.instruments.symbol_a.clone(),
        config.instruments.symbol_b.clone(),
    );

    let feed = Arc::new(
        ReplayFeed::from_csv_path(&cmd.data, strategy_config.window_length)
            .with_context(|| format!("Failed to load price file {}", cmd.data.display()))?,
    );
    let execution = PaperExecution::new();

    let mut rebalancer = DailyRebalancer::new(
        strategy_config,
        Arc::clone(&feed),
        execution.clone(),
        pair,
        config.instruments.benchmark.clone(),
    );

    let summary = run_replay(&feed, &mut rebalancer)
        .await
        .context("Replay failed")?;

    println!("Replay complete");
    println!("  Trading days:     {}", summary.days);
    println!("  No-signal days:   {}", summary.no_signal_days);
    println!("  Orders submitted: {}", summary.orders_submitted);
    println!("  Final position:   {}", summary.final_position);
    if let Some(z) = summary.last_z_score {
        println!("  Last z-score:     {:.4}", z);
    }

    Ok(())
}

async fn signal_command(cmd: SignalCmd) -> Result<()> {
    let config = load_config(&cmd.config).context("Failed to load configuration")?;
    let window_length = cmd.window.unwrap_or(config.strategy.window_length);

    let observations = load_observations(&cmd.data)
        .with_context(|| format!("Failed to load price file {}", cmd.data.display()))?;
    anyhow::ensure!(
        observations.len() >= window_length,
        "Price file has {} rows, need at least {} for one full window",
        observations.len(),
        window_length
    );

    let window = &observations[observations.len() - window_length..];
    match SpreadStats::from_window(window) {
        Some(stats) => {
            println!(
                "{}/{} spread over trailing {} days",
                config.instruments.symbol_a, config.instruments.symbol_b, window_length
            );
            println!("  Current spread: {:.4}", stats.current_spread);
            println!("  Rolling mean:   {:.4}", stats.mean);
            println!("  Rolling std:    {:.4}", stats.std_dev);
            println!("  Z-score:        {:.4}", stats.z_score);
            println!(
                "  Confidence:     {:.1}%",
                deviation_confidence(stats.z_score) * 100.0
            );
        }
        None => {
            println!("No signal: spread deviation is zero over the trailing window");
        }
    }

    Ok(())
}
