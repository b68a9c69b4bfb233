//! Ports Layer - Host Platform Abstractions
//!
//! The strategy runs inside an external scheduling/execution host. These
//! traits are the only surface it touches: daily price history in, target
//! percentage orders and telemetry out.

pub mod execution;
pub mod market_data;
pub mod mocks;

pub use execution::{ExecutionError, ExecutionPort};
pub use market_data::{InstrumentPair, MarketDataError, MarketDataPort};
