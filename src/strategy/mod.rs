//! Strategy Layer - Spread Mean Reversion with Z-Score Gating
//!
//! Composes the rolling spread statistics with a three-state position
//! machine. The strategy enters short-spread past +entry_threshold,
//! long-spread past -entry_threshold, and flattens inside the exit band;
//! everything between the bands is a hold.

pub mod pairs;
pub mod params;

pub use pairs::{decide, Evaluation, PairsStrategy, StrategyError, TradeDecision};
pub use params::{ConfigError, StrategyConfig};
