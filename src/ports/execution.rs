use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("Target fraction {0} outside [-1.0, 1.0]")]
    InvalidFraction(f64),
    #[error("Order submission failed: {0}")]
    SubmitFailed(String),
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

/// Execution port trait.
///
/// Orders are target-percentage instructions: adjust the holding in one
/// instrument to a signed fraction of total portfolio value (negative =
/// short). Fills, rebalancing mechanics and accounting belong to the host.
#[async_trait]
pub trait ExecutionPort: Send + Sync {
    /// Adjust the holding in `symbol` to `fraction` of portfolio value.
    async fn set_target_percent(&self, symbol: &str, fraction: f64) -> Result<(), ExecutionError>;

    /// Record a named telemetry value with the host (e.g. the daily z-score).
    async fn record_metric(&self, name: &str, value: f64) -> Result<(), ExecutionError>;

    /// Select the benchmark the host compares returns against. Called once
    /// at strategy initialization.
    async fn set_benchmark(&self, symbol: &str) -> Result<(), ExecutionError>;
}
