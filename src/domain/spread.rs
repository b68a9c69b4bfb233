//! Spread Statistics
//!
//! Rolling z-score of the price spread between the two legs of the pair.
//!
//! Z-Score Formula: z = (current_spread - rolling_mean) / rolling_std
//!
//! The standard deviation is the population form (denominator N), matching
//! the rolling statistics the signal was originally tuned against.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One trading day's aligned prices for both legs of the pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairObservation {
    pub timestamp: DateTime<Utc>,
    /// Price of leg A (e.g. BNO)
    pub price_a: f64,
    /// Price of leg B (e.g. USO)
    pub price_b: f64,
}

impl PairObservation {
    /// Spread between the legs (A - B)
    pub fn spread(&self) -> f64 {
        self.price_a - self.price_b
    }
}

/// Result of the rolling spread calculation over one window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpreadStats {
    /// Current z-score value
    pub z_score: f64,
    /// Rolling mean of the spread
    pub mean: f64,
    /// Rolling (population) standard deviation of the spread
    pub std_dev: f64,
    /// Most recent spread in the window
    pub current_spread: f64,
}

impl SpreadStats {
    /// Below this the window is treated as degenerate (all spreads identical)
    const MIN_STD: f64 = 1e-10;

    /// Compute rolling spread statistics over a window of paired prices,
    /// oldest observation first.
    ///
    /// Returns `None` when no signal can be produced: fewer than two
    /// observations, or a degenerate window whose standard deviation is
    /// zero. Callers must treat `None` as "take no action today".
    pub fn from_window(window: &[PairObservation]) -> Option<Self> {
        if window.len() < 2 {
            return None;
        }

        let spreads: Vec<f64> = window.iter().map(PairObservation::spread).collect();

        let mean = spreads.iter().sum::<f64>() / spreads.len() as f64;
        let variance = spreads
            .iter()
            .map(|&s| {
                let diff = s - mean;
                diff * diff
            })
            .sum::<f64>()
            / spreads.len() as f64;
        let std_dev = variance.sqrt();

        // Avoid division by zero
        if std_dev < Self::MIN_STD {
            return None;
        }

        let current_spread = *spreads.last()?;
        let z_score = (current_spread - mean) / std_dev;

        Some(Self {
            z_score,
            mean,
            std_dev,
            current_spread,
        })
    }

    /// Spread is stretched above the mean past `threshold` deviations
    pub fn is_above(&self, threshold: f64) -> bool {
        self.z_score > threshold
    }

    /// Spread is stretched below the mean past `threshold` deviations
    pub fn is_below(&self, threshold: f64) -> bool {
        self.z_score < -threshold
    }

    /// Spread is inside the band around its mean
    pub fn is_inside(&self, threshold: f64) -> bool {
        self.z_score.abs() < threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;

    fn obs(price_a: f64, price_b: f64) -> PairObservation {
        PairObservation {
            timestamp: Utc.with_ymd_and_hms(2026, 1, 2, 14, 30, 0).unwrap(),
            price_a,
            price_b,
        }
    }

    fn window_from_spreads(spreads: &[f64]) -> Vec<PairObservation> {
        spreads.iter().map(|&s| obs(100.0 + s, 100.0)).collect()
    }

    #[test]
    fn test_spread_is_a_minus_b() {
        assert_relative_eq!(obs(21.5, 18.25).spread(), 3.25);
        assert_relative_eq!(obs(18.25, 21.5).spread(), -3.25);
    }

    #[test]
    fn test_known_zscore() {
        // Nine spreads at 1.0 and one at 3.0 over a 10-day window:
        // mean = 1.2, population variance = (9*0.04 + 3.24)/10 = 0.36
        let window = window_from_spreads(&[1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 3.0]);
        let stats = SpreadStats::from_window(&window).unwrap();

        assert_relative_eq!(stats.mean, 1.2, epsilon = 1e-12);
        assert_relative_eq!(stats.std_dev, 0.6, epsilon = 1e-12);
        assert_relative_eq!(stats.current_spread, 3.0, epsilon = 1e-12);
        assert_relative_eq!(stats.z_score, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_spread_gives_no_signal() {
        // Fifty days of spread pinned at 5.0: std = 0, signal suppressed
        let window = window_from_spreads(&[5.0; 50]);
        assert!(SpreadStats::from_window(&window).is_none());
    }

    #[test]
    fn test_single_observation_gives_no_signal() {
        let window = window_from_spreads(&[2.0]);
        assert!(SpreadStats::from_window(&window).is_none());
        assert!(SpreadStats::from_window(&[]).is_none());
    }

    #[test]
    fn test_population_std_not_sample() {
        // Spreads [0, 2]: population std = 1.0, sample std would be sqrt(2)
        let window = window_from_spreads(&[0.0, 2.0]);
        let stats = SpreadStats::from_window(&window).unwrap();
        assert_relative_eq!(stats.std_dev, 1.0, epsilon = 1e-12);
        assert_relative_eq!(stats.z_score, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_deterministic() {
        let window = window_from_spreads(&[1.0, 1.5, 0.5, 2.0, 1.0, 0.0, 1.5, 2.5, 1.0, 1.8]);
        let a = SpreadStats::from_window(&window).unwrap();
        let b = SpreadStats::from_window(&window).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_threshold_helpers() {
        let stats = SpreadStats {
            z_score: 2.1,
            mean: 1.0,
            std_dev: 0.5,
            current_spread: 2.05,
        };
        assert!(stats.is_above(1.8));
        assert!(!stats.is_below(1.8));
        assert!(!stats.is_inside(1.0));

        let reverted = SpreadStats { z_score: -0.4, ..stats };
        assert!(reverted.is_inside(1.0));
    }
}
