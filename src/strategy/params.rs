//! Strategy Parameters
//!
//! Configuration for the pairs trade. Defaults reproduce the tuned
//! production values: 50-day window, enter at 1.8 deviations, exit
//! inside 1.0, half the portfolio per leg.

use serde::{Deserialize, Serialize};

/// Main strategy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Number of daily observations in the rolling window
    pub window_length: usize,
    /// Z-score magnitude that opens a position
    pub entry_threshold: f64,
    /// Z-score magnitude below which the position is closed
    pub exit_threshold: f64,
    /// Fraction of portfolio allocated to each leg (long one, short the other)
    pub allocation_fraction: f64,
    /// Minutes after session open the host should schedule the daily check
    pub schedule_offset_minutes: u32,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            window_length: 50,
            entry_threshold: 1.8,
            exit_threshold: 1.0,
            allocation_fraction: 0.5,
            schedule_offset_minutes: 60,
        }
    }
}

impl StrategyConfig {
    /// Create a new config with a custom entry threshold
    pub fn with_entry_threshold(mut self, threshold: f64) -> Self {
        self.entry_threshold = threshold;
        self
    }

    /// Create a new config with a custom exit threshold
    pub fn with_exit_threshold(mut self, threshold: f64) -> Self {
        self.exit_threshold = threshold;
        self
    }

    /// Create a new config with a custom window length
    pub fn with_window(mut self, window: usize) -> Self {
        self.window_length = window;
        self
    }

    /// Create a new config with a custom allocation fraction
    pub fn with_allocation(mut self, fraction: f64) -> Self {
        self.allocation_fraction = fraction;
        self
    }

    /// Validate configuration parameters.
    ///
    /// Entry must sit strictly above exit so the enter and flatten bands
    /// stay disjoint; the dead zone between them is where positions ride.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_length < 2 {
            return Err(ConfigError::InvalidWindow(self.window_length));
        }
        if self.entry_threshold <= 0.0 || !self.entry_threshold.is_finite() {
            return Err(ConfigError::InvalidEntryThreshold(self.entry_threshold));
        }
        if self.exit_threshold <= 0.0 || !self.exit_threshold.is_finite() {
            return Err(ConfigError::InvalidExitThreshold(self.exit_threshold));
        }
        if self.entry_threshold <= self.exit_threshold {
            return Err(ConfigError::ThresholdOrder {
                entry: self.entry_threshold,
                exit: self.exit_threshold,
            });
        }
        if self.allocation_fraction <= 0.0 || self.allocation_fraction > 1.0 {
            return Err(ConfigError::InvalidAllocation(self.allocation_fraction));
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid window length: {0} (minimum 2)")]
    InvalidWindow(usize),
    #[error("Invalid entry threshold: {0} (must be finite and > 0)")]
    InvalidEntryThreshold(f64),
    #[error("Invalid exit threshold: {0} (must be finite and > 0)")]
    InvalidExitThreshold(f64),
    #[error("Entry threshold {entry} must be greater than exit threshold {exit}")]
    ThresholdOrder { entry: f64, exit: f64 },
    #[error("Invalid allocation fraction: {0} (must be 0 < f <= 1)")]
    InvalidAllocation(f64),
}
