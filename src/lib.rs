//! Oilpairs - BNO/USO Pairs Trading Strategy Library
//!
//! A mean reversion pairs trade on two correlated oil ETFs: when the z-score
//! of the rolling price spread stretches past the entry threshold the strategy
//! shorts the rich leg and longs the cheap leg, then flattens once the spread
//! reverts toward its mean.
//!
//! # Modules
//!
//! - `domain`: Core business types (PairObservation, SpreadStats, SpreadPosition)
//! - `ports`: Trait abstractions for the host platform (MarketDataPort, ExecutionPort)
//! - `strategy`: Signal generation and the position state machine (PairsStrategy)
//! - `adapters`: External implementations (CLI, CSV replay host)
//! - `config`: Configuration loading and validation
//! - `application`: Daily rebalancer orchestrating ports and strategy

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod strategy;
