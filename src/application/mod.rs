//! Application Layer - Daily Rebalancer

pub mod rebalancer;

pub use rebalancer::{DailyRebalancer, OrchestratorError, RebalanceOutcome};
