use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::domain::PairObservation;

/// The two legs of the trade, in stable order (A first)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentPair {
    /// Leg A symbol (e.g. "BNO")
    pub symbol_a: String,
    /// Leg B symbol (e.g. "USO")
    pub symbol_b: String,
}

impl InstrumentPair {
    pub fn new(symbol_a: impl Into<String>, symbol_b: impl Into<String>) -> Self {
        Self {
            symbol_a: symbol_a.into(),
            symbol_b: symbol_b.into(),
        }
    }
}

/// Market data error type
#[derive(Debug, Error)]
pub enum MarketDataError {
    /// The host failed to supply prices for one of the legs. Fatal for the
    /// invocation: the daily check never computes against half a pair.
    #[error("Missing price data for {symbol}")]
    MissingData { symbol: String },

    #[error("Price history unavailable: {0}")]
    HistoryUnavailable(String),

    #[error("Data parsing error: {0}")]
    ParseError(String),
}

/// Market data port trait.
///
/// Implementations must return both legs aligned on the same timestamps,
/// oldest observation first.
#[async_trait]
pub trait MarketDataPort: Send + Sync {
    /// Trailing `window_length` days of paired closing prices.
    async fn daily_history(
        &self,
        pair: &InstrumentPair,
        window_length: usize,
    ) -> Result<Vec<PairObservation>, MarketDataError>;
}

#[async_trait]
impl<T> MarketDataPort for Arc<T>
where
    T: MarketDataPort + ?Sized,
{
    async fn daily_history(
        &self,
        pair: &InstrumentPair,
        window_length: usize,
    ) -> Result<Vec<PairObservation>, MarketDataError> {
        (**self).daily_history(pair, window_length).await
    }
}
