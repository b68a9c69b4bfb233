//! Daily Rebalancer
//!
//! One `rebalance()` call per trading day, driven by the host scheduler
//! (or the CSV replay driver): fetch the trailing price window, evaluate
//! the strategy, submit target-percentage orders and record telemetry.
//! The rebalancer never schedules itself.

use thiserror::Error;

use crate::domain::SpreadPosition;
use crate::ports::execution::{ExecutionError, ExecutionPort};
use crate::ports::market_data::{InstrumentPair, MarketDataError, MarketDataPort};
use crate::strategy::{PairsStrategy, StrategyConfig, StrategyError, TradeDecision};

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),
    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),
    #[error("Strategy error: {0}")]
    Strategy(#[from] StrategyError),
}

/// What one daily invocation did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RebalanceOutcome {
    /// Degenerate window: signal suppressed, no order, no metric
    NoSignal,
    /// Signal computed; orders were placed only for non-hold decisions
    Evaluated {
        z_score: f64,
        decision: TradeDecision,
        orders_placed: bool,
    },
}

/// Coordinates the pairs strategy with the host platform ports.
pub struct DailyRebalancer<M, E> {
    strategy: PairsStrategy,
    market: M,
    execution: E,
    pair: InstrumentPair,
    benchmark: Option<String>,
}

impl<M, E> DailyRebalancer<M, E>
where
    M: MarketDataPort,
    E: ExecutionPort,
{
    pub fn new(
        config: StrategyConfig,
        market: M,
        execution: E,
        pair: InstrumentPair,
        benchmark: Option<String>,
    ) -> Self {
        Self {
            strategy: PairsStrategy::new(config),
            market,
            execution,
            pair,
            benchmark,
        }
    }

    pub fn position(&self) -> SpreadPosition {
        self.strategy.position()
    }

    pub fn config(&self) -> &StrategyConfig {
        self.strategy.config()
    }

    /// One-time strategy initialization: select the benchmark with the host.
    pub async fn initialize(&self) -> Result<(), OrchestratorError> {
        if let Some(benchmark) = &self.benchmark {
            self.execution.set_benchmark(benchmark).await?;
            tracing::info!(benchmark = %benchmark, "Benchmark selected");
        }
        tracing::info!(
            pair = %format!("{}/{}", self.pair.symbol_a, self.pair.symbol_b),
            window = self.strategy.config().window_length,
            entry = self.strategy.config().entry_threshold,
            exit = self.strategy.config().exit_threshold,
            "Pairs strategy initialized"
        );
        Ok(())
    }

    /// Execute one scheduled daily check.
    pub async fn rebalance(&mut self) -> Result<RebalanceOutcome, OrchestratorError> {
        let window = self
            .market
            .daily_history(&self.pair, self.strategy.config().window_length)
            .await?;

        let Some(eval) = self.strategy.evaluate(&window)? else {
            tracing::debug!("Degenerate window (zero spread deviation), signal suppressed");
            return Ok(RebalanceOutcome::NoSignal);
        };

        let allocation = self.strategy.config().allocation_fraction;
        let orders_placed = match eval.decision.target_weights(allocation) {
            Some((weight_a, weight_b)) => {
                self.execution
                    .set_target_percent(&self.pair.symbol_a, weight_a)
                    .await?;
                self.execution
                    .set_target_percent(&self.pair.symbol_b, weight_b)
                    .await?;
                tracing::info!(
                    z_score = eval.stats.z_score,
                    confidence = eval.confidence,
                    decision = ?eval.decision,
                    target_a = weight_a,
                    target_b = weight_b,
                    position = %self.strategy.position(),
                    "Rebalanced"
                );
                true
            }
            None => {
                tracing::info!(
                    z_score = eval.stats.z_score,
                    confidence = eval.confidence,
                    position = %self.strategy.position(),
                    "Hold"
                );
                false
            }
        };

        // Telemetry goes out whenever a signal was computable, hold or not
        self.execution
            .record_metric("zscore", eval.stats.z_score)
            .await?;

        Ok(RebalanceOutcome::Evaluated {
            z_score: eval.stats.z_score,
            decision: eval.decision,
            orders_placed,
        })
    }
}
