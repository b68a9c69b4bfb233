//! Recording mocks for the host platform ports, used by unit and
//! integration tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::PairObservation;
use crate::ports::execution::{ExecutionError, ExecutionPort};
use crate::ports::market_data::{InstrumentPair, MarketDataError, MarketDataPort};

/// Market data mock that serves a fixed window of observations
#[derive(Debug, Default, Clone)]
pub struct FixedHistory {
    window: Vec<PairObservation>,
}

impl FixedHistory {
    pub fn new(window: Vec<PairObservation>) -> Self {
        Self { window }
    }
}

#[async_trait]
impl MarketDataPort for FixedHistory {
    async fn daily_history(
        &self,
        _pair: &InstrumentPair,
        window_length: usize,
    ) -> Result<Vec<PairObservation>, MarketDataError> {
        let start = self.window.len().saturating_sub(window_length);
        Ok(self.window[start..].to_vec())
    }
}

/// Market data mock that fails with missing data for one leg
#[derive(Debug, Clone)]
pub struct FailingHistory {
    pub missing_symbol: String,
}

impl FailingHistory {
    pub fn new(missing_symbol: impl Into<String>) -> Self {
        Self {
            missing_symbol: missing_symbol.into(),
        }
    }
}

#[async_trait]
impl MarketDataPort for FailingHistory {
    async fn daily_history(
        &self,
        _pair: &InstrumentPair,
        _window_length: usize,
    ) -> Result<Vec<PairObservation>, MarketDataError> {
        Err(MarketDataError::MissingData {
            symbol: self.missing_symbol.clone(),
        })
    }
}

/// Execution mock that records every call for later assertion
#[derive(Debug, Default, Clone)]
pub struct RecordingExecution {
    orders: Arc<Mutex<Vec<(String, f64)>>>,
    metrics: Arc<Mutex<Vec<(String, f64)>>>,
    benchmarks: Arc<Mutex<Vec<String>>>,
}

impl RecordingExecution {
    pub fn new() -> Self {
        Self::default()
    }

    /// All `set_target_percent` calls in order
    pub fn orders(&self) -> Vec<(String, f64)> {
        self.orders.lock().unwrap().clone()
    }

    /// All `record_metric` calls in order
    pub fn metrics(&self) -> Vec<(String, f64)> {
        self.metrics.lock().unwrap().clone()
    }

    /// All `set_benchmark` calls in order
    pub fn benchmarks(&self) -> Vec<String> {
        self.benchmarks.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExecutionPort for RecordingExecution {
    async fn set_target_percent(&self, symbol: &str, fraction: f64) -> Result<(), ExecutionError> {
        if !(-1.0..=1.0).contains(&fraction) {
            return Err(ExecutionError::InvalidFraction(fraction));
        }
        self.orders.lock().unwrap().push((symbol.to_string(), fraction));
        Ok(())
    }

    async fn record_metric(&self, name: &str, value: f64) -> Result<(), ExecutionError> {
        self.metrics.lock().unwrap().push((name.to_string(), value));
        Ok(())
    }

    async fn set_benchmark(&self, symbol: &str) -> Result<(), ExecutionError> {
        self.benchmarks.lock().unwrap().push(symbol.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn obs(price_a: f64, price_b: f64) -> PairObservation {
        PairObservation {
            timestamp: Utc.with_ymd_and_hms(2026, 1, 2, 14, 30, 0).unwrap(),
            price_a,
            price_b,
        }
    }

    #[tokio::test]
    async fn test_fixed_history_trims_to_window() {
        let history = FixedHistory::new(vec![obs(1.0, 1.0), obs(2.0, 1.0), obs(3.0, 1.0)]);
        let pair = InstrumentPair::new("BNO", "USO");

        let window = history.daily_history(&pair, 2).await.unwrap();
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].price_a, 2.0);
    }

    #[tokio::test]
    async fn test_failing_history() {
        let history = FailingHistory::new("USO");
        let pair = InstrumentPair::new("BNO", "USO");

        let err = history.daily_history(&pair, 50).await.unwrap_err();
        assert!(matches!(err, MarketDataError::MissingData { symbol } if symbol == "USO"));
    }

    #[tokio::test]
    async fn test_recording_execution() {
        let exec = RecordingExecution::new();
        exec.set_target_percent("BNO", -0.5).await.unwrap();
        exec.set_target_percent("USO", 0.5).await.unwrap();
        exec.record_metric("zscore", 2.0).await.unwrap();
        exec.set_benchmark("XOP").await.unwrap();

        assert_eq!(
            exec.orders(),
            vec![("BNO".to_string(), -0.5), ("USO".to_string(), 0.5)]
        );
        assert_eq!(exec.metrics(), vec![("zscore".to_string(), 2.0)]);
        assert_eq!(exec.benchmarks(), vec!["XOP".to_string()]);
    }

    #[tokio::test]
    async fn test_recording_execution_rejects_out_of_range() {
        let exec = RecordingExecution::new();
        let err = exec.set_target_percent("BNO", 1.5).await.unwrap_err();
        assert!(matches!(err, ExecutionError::InvalidFraction(_)));
        assert!(exec.orders().is_empty());
    }
}
