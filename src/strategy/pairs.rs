//! Pairs Strategy
//!
//! The position state machine driven by the rolling spread z-score.
//! `decide` is a pure function of (position, z-score, params); the
//! `PairsStrategy` wrapper carries the position across daily invocations.

use thiserror::Error;

use crate::domain::{deviation_confidence, PairObservation, SpreadPosition, SpreadStats};
use crate::strategy::params::StrategyConfig;

/// Strategy evaluation errors
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("Insufficient data for calculation: requires {needed} observations, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("Z-score is not a finite number: {0}")]
    NonFiniteSignal(f64),
}

/// Outcome of one daily evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TradeDecision {
    /// Short leg A, long leg B
    EnterShortSpread,
    /// Long leg A, short leg B
    EnterLongSpread,
    /// Close both legs
    ExitToFlat,
    /// No order; ride the current position (or stay flat)
    Hold,
}

impl TradeDecision {
    /// Target portfolio fractions (leg A, leg B) for this decision,
    /// or `None` when no order should be placed.
    pub fn target_weights(&self, allocation_fraction: f64) -> Option<(f64, f64)> {
        match self {
            TradeDecision::EnterShortSpread => Some((-allocation_fraction, allocation_fraction)),
            TradeDecision::EnterLongSpread => Some((allocation_fraction, -allocation_fraction)),
            TradeDecision::ExitToFlat => Some((0.0, 0.0)),
            TradeDecision::Hold => None,
        }
    }

    /// Position after this decision is applied
    pub fn next_position(&self, current: SpreadPosition) -> SpreadPosition {
        match self {
            TradeDecision::EnterShortSpread => SpreadPosition::ShortSpread,
            TradeDecision::EnterLongSpread => SpreadPosition::LongSpread,
            TradeDecision::ExitToFlat => SpreadPosition::Flat,
            TradeDecision::Hold => current,
        }
    }
}

/// One computed signal plus the decision it produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub stats: SpreadStats,
    /// Normal-CDF confidence in the deviation, for telemetry
    pub confidence: f64,
    pub decision: TradeDecision,
}

/// Decide the next action from the current position and z-score.
///
/// Conditions are checked in order [enter-short, enter-long, exit]; config
/// validation guarantees entry > exit so the bands cannot overlap. Entering
/// a side the position already holds is a hold, never a re-order.
pub fn decide(position: SpreadPosition, z_score: f64, params: &StrategyConfig) -> TradeDecision {
    if z_score > params.entry_threshold && position != SpreadPosition::ShortSpread {
        TradeDecision::EnterShortSpread
    } else if z_score < -params.entry_threshold && position != SpreadPosition::LongSpread {
        TradeDecision::EnterLongSpread
    } else if z_score.abs() < params.exit_threshold {
        TradeDecision::ExitToFlat
    } else {
        TradeDecision::Hold
    }
}

/// Stateful pairs strategy: spread statistics plus position carried across
/// daily invocations.
#[derive(Debug, Clone)]
pub struct PairsStrategy {
    config: StrategyConfig,
    position: SpreadPosition,
}

impl PairsStrategy {
    pub fn new(config: StrategyConfig) -> Self {
        Self {
            config,
            position: SpreadPosition::Flat,
        }
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    pub fn position(&self) -> SpreadPosition {
        self.position
    }

    /// Evaluate one daily window of paired prices, oldest first.
    ///
    /// Returns `Ok(None)` when the window is degenerate (zero standard
    /// deviation) - no signal, no order, position unchanged. A window
    /// shorter than the configured length is an error: the host failed to
    /// deliver full history and partial computation is not attempted.
    pub fn evaluate(
        &mut self,
        window: &[PairObservation],
    ) -> Result<Option<Evaluation>, StrategyError> {
        if window.len() < self.config.window_length {
            return Err(StrategyError::InsufficientData {
                needed: self.config.window_length,
                got: window.len(),
            });
        }

        // Statistics always run over the trailing configured window, even if
        // the host hands back extra history
        let window = &window[window.len() - self.config.window_length..];

        let Some(stats) = SpreadStats::from_window(window) else {
            return Ok(None);
        };

        // Malformed prices (NaN/inf) must fail fast, not silently order
        if !stats.z_score.is_finite() {
            return Err(StrategyError::NonFiniteSignal(stats.z_score));
        }

        let decision = decide(self.position, stats.z_score, &self.config);
        self.position = decision.next_position(self.position);

        Ok(Some(Evaluation {
            stats,
            confidence: deviation_confidence(stats.z_score),
            decision,
        }))
    }
}
