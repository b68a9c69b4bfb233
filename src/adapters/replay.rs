//! CSV Replay Host
//!
//! Stands in for the external backtesting platform: a `ReplayFeed` serves
//! trailing daily windows from a CSV price file as the clock advances one
//! trading day per step, and a `PaperExecution` logs the orders the
//! strategy would have placed. The replay driver plays the role of the
//! host scheduler, invoking the rebalancer once per day.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use std::path::Path;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::info;

use crate::application::{DailyRebalancer, OrchestratorError, RebalanceOutcome};
use crate::domain::{PairObservation, SpreadPosition};
use crate::ports::execution::{ExecutionError, ExecutionPort};
use crate::ports::market_data::{InstrumentPair, MarketDataError, MarketDataPort};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Failed to read price file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Non-positive price {price} for {column} on {date}")]
    InvalidPrice {
        column: &'static str,
        price: f64,
        date: NaiveDate,
    },
    #[error("Price file has {got} rows, need at least {needed} for one full window")]
    NotEnoughRows { needed: usize, got: usize },
}

/// One CSV row: daily closing prices for both legs
#[derive(Debug, Deserialize)]
struct PriceRow {
    date: NaiveDate,
    price_a: f64,
    price_b: f64,
}

/// Load and validate daily observations from a CSV file, sorted by date.
pub fn load_observations(path: &Path) -> Result<Vec<PairObservation>, ReplayError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut observations = Vec::new();

    for result in reader.deserialize() {
        let row: PriceRow = result?;
        if row.price_a <= 0.0 || !row.price_a.is_finite() {
            return Err(ReplayError::InvalidPrice {
                column: "price_a",
                price: row.price_a,
                date: row.date,
            });
        }
        if row.price_b <= 0.0 || !row.price_b.is_finite() {
            return Err(ReplayError::InvalidPrice {
                column: "price_b",
                price: row.price_b,
                date: row.date,
            });
        }
        observations.push(PairObservation {
            timestamp: row.date.and_time(NaiveTime::MIN).and_utc(),
            price_a: row.price_a,
            price_b: row.price_b,
        });
    }

    observations.sort_by_key(|o| o.timestamp);
    Ok(observations)
}

/// Market data port backed by a price file, replayed one day at a time.
///
/// The cursor marks the number of days elapsed; `daily_history` serves the
/// trailing window ending at the cursor, exactly what the live host would
/// hand the strategy that morning.
#[derive(Debug)]
pub struct ReplayFeed {
    observations: Vec<PairObservation>,
    cursor: Mutex<usize>,
}

impl ReplayFeed {
    /// Build a feed whose first served window is already full.
    pub fn new(
        observations: Vec<PairObservation>,
        window_length: usize,
    ) -> Result<Self, ReplayError> {
        if observations.len() < window_length {
            return Err(ReplayError::NotEnoughRows {
                needed: window_length,
                got: observations.len(),
            });
        }
        Ok(Self {
            observations,
            cursor: Mutex::new(window_length),
        })
    }

    pub fn from_csv_path(path: &Path, window_length: usize) -> Result<Self, ReplayError> {
        Self::new(load_observations(path)?, window_length)
    }

    /// Advance the clock one trading day. Returns false once the tape is
    /// exhausted.
    pub fn advance(&self) -> bool {
        let mut cursor = self.cursor.lock().unwrap();
        if *cursor < self.observations.len() {
            *cursor += 1;
            true
        } else {
            false
        }
    }

    /// Total trading days on the tape
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

#[async_trait]
impl MarketDataPort for ReplayFeed {
    async fn daily_history(
        &self,
        _pair: &InstrumentPair,
        window_length: usize,
    ) -> Result<Vec<PairObservation>, MarketDataError> {
        let end = *self.cursor.lock().unwrap();
        if end < window_length {
            return Err(MarketDataError::HistoryUnavailable(format!(
                "only {} of {} warmup days elapsed",
                end, window_length
            )));
        }
        Ok(self.observations[end - window_length..end].to_vec())
    }
}

/// Paper execution: logs orders and telemetry instead of trading.
#[derive(Debug, Default, Clone)]
pub struct PaperExecution {
    orders: Arc<Mutex<Vec<(String, f64)>>>,
}

impl PaperExecution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Order tape accumulated so far, in submission order
    pub fn orders(&self) -> Vec<(String, f64)> {
        self.orders.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExecutionPort for PaperExecution {
    async fn set_target_percent(&self, symbol: &str, fraction: f64) -> Result<(), ExecutionError> {
        if !(-1.0..=1.0).contains(&fraction) {
            return Err(ExecutionError::InvalidFraction(fraction));
        }
        info!(symbol = %symbol, fraction = fraction, "PAPER ORDER - target percent");
        self.orders.lock().unwrap().push((symbol.to_string(), fraction));
        Ok(())
    }

    async fn record_metric(&self, name: &str, value: f64) -> Result<(), ExecutionError> {
        info!(metric = %name, value = value, "PAPER METRIC");
        Ok(())
    }

    async fn set_benchmark(&self, symbol: &str) -> Result<(), ExecutionError> {
        info!(benchmark = %symbol, "PAPER BENCHMARK");
        Ok(())
    }
}

/// Totals from one replay run
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaySummary {
    /// Daily invocations performed
    pub days: usize,
    /// Days suppressed by a degenerate window
    pub no_signal_days: usize,
    /// Individual target-percentage orders submitted
    pub orders_submitted: usize,
    /// Position at the end of the tape
    pub final_position: SpreadPosition,
    /// Last computed z-score, if any
    pub last_z_score: Option<f64>,
}

/// Drive the rebalancer over the whole tape, one invocation per day.
pub async fn run_replay<E>(
    feed: &ReplayFeed,
    rebalancer: &mut DailyRebalancer<Arc<ReplayFeed>, E>,
) -> Result<ReplaySummary, OrchestratorError>
where
    E: ExecutionPort,
{
    rebalancer.initialize().await?;

    let mut summary = ReplaySummary {
        days: 0,
        no_signal_days: 0,
        orders_submitted: 0,
        final_position: rebalancer.position(),
        last_z_score: None,
    };

    loop {
        summary.days += 1;
        match rebalancer.rebalance().await? {
            RebalanceOutcome::NoSignal => summary.no_signal_days += 1,
            RebalanceOutcome::Evaluated {
                z_score,
                orders_placed,
                ..
            } => {
                summary.last_z_score = Some(z_score);
                if orders_placed {
                    summary.orders_submitted += 2;
                }
            }
        }
        if !feed.advance() {
            break;
        }
    }

    summary.final_position = rebalancer.position();
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::StrategyConfig;
    use std::io::Write;

    fn csv_file(rows: &[(&str, f64, f64)]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "date,price_a,price_b").unwrap();
        for (date, a, b) in rows {
            writeln!(file, "{},{},{}", date, a, b).unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_observations_sorted() {
        let file = csv_file(&[
            ("2026-01-06", 21.0, 18.0),
            ("2026-01-05", 20.0, 18.0),
            ("2026-01-07", 22.0, 18.0),
        ]);
        let obs = load_observations(file.path()).unwrap();
        assert_eq!(obs.len(), 3);
        assert_eq!(obs[0].price_a, 20.0);
        assert_eq!(obs[2].price_a, 22.0);
    }

    #[test]
    fn test_load_rejects_non_positive_price() {
        let file = csv_file(&[("2026-01-05", 20.0, -1.0)]);
        let err = load_observations(file.path()).unwrap_err();
        assert!(matches!(
            err,
            ReplayError::InvalidPrice { column: "price_b", .. }
        ));
    }

    #[test]
    fn test_feed_requires_full_window() {
        let file = csv_file(&[("2026-01-05", 20.0, 18.0), ("2026-01-06", 21.0, 18.0)]);
        let obs = load_observations(file.path()).unwrap();
        let err = ReplayFeed::new(obs, 5).unwrap_err();
        assert!(matches!(
            err,
            ReplayError::NotEnoughRows { needed: 5, got: 2 }
        ));
    }

    #[tokio::test]
    async fn test_feed_serves_trailing_window() {
        let file = csv_file(&[
            ("2026-01-05", 20.0, 18.0),
            ("2026-01-06", 21.0, 18.0),
            ("2026-01-07", 22.0, 18.0),
        ]);
        let feed = ReplayFeed::from_csv_path(file.path(), 2).unwrap();
        let pair = InstrumentPair::new("BNO", "USO");

        let window = feed.daily_history(&pair, 2).await.unwrap();
        assert_eq!(window[0].price_a, 20.0);
        assert_eq!(window[1].price_a, 21.0);

        assert!(feed.advance());
        let window = feed.daily_history(&pair, 2).await.unwrap();
        assert_eq!(window[1].price_a, 22.0);

        // Tape exhausted
        assert!(!feed.advance());
    }

    #[tokio::test]
    async fn test_paper_execution_records_and_validates() {
        let exec = PaperExecution::new();
        exec.set_target_percent("BNO", -0.5).await.unwrap();
        assert_eq!(exec.orders(), vec![("BNO".to_string(), -0.5)]);

        let err = exec.set_target_percent("BNO", -1.5).await.unwrap_err();
        assert!(matches!(err, ExecutionError::InvalidFraction(_)));
    }

    #[tokio::test]
    async fn test_run_replay_full_cycle() {
        // Ten flat days (std = 0, no signal), a spike that opens the short
        // spread, a day that rides it, then reversion that flattens.
        let mut rows = Vec::new();
        for day in 1..=10 {
            rows.push((day, 2.0));
        }
        rows.push((11, 5.0));
        rows.push((12, 5.0));
        rows.push((13, 2.0));

        let csv_rows: Vec<(String, f64, f64)> = rows
            .iter()
            .map(|&(day, spread)| (format!("2026-01-{:02}", day), 100.0 + spread, 100.0))
            .collect();
        let borrowed: Vec<(&str, f64, f64)> = csv_rows
            .iter()
            .map(|(d, a, b)| (d.as_str(), *a, *b))
            .collect();
        let file = csv_file(&borrowed);

        let config = StrategyConfig::default().with_window(10);
        let feed = Arc::new(ReplayFeed::from_csv_path(file.path(), config.window_length).unwrap());
        let execution = PaperExecution::new();
        let mut rebalancer = DailyRebalancer::new(
            config,
            Arc::clone(&feed),
            execution.clone(),
            InstrumentPair::new("BNO", "USO"),
            Some("XOP".to_string()),
        );

        let summary = run_replay(&feed, &mut rebalancer).await.unwrap();

        assert_eq!(summary.days, 4); // days 10 through 13
        assert_eq!(summary.no_signal_days, 1); // the all-flat window
        assert_eq!(summary.orders_submitted, 4); // entry pair + exit pair
        assert_eq!(summary.final_position, SpreadPosition::Flat);

        assert_eq!(
            execution.orders(),
            vec![
                ("BNO".to_string(), -0.5),
                ("USO".to_string(), 0.5),
                ("BNO".to_string(), 0.0),
                ("USO".to_string(), 0.0),
            ]
        );
    }
}
