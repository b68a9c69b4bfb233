//! Signal confidence helper.

/// Confidence that the current spread deviation is a genuine stretch rather
/// than noise, from the standard normal CDF of the absolute z-score.
/// Ranges from 0.5 (at the mean) toward 1.0.
pub fn deviation_confidence(z_score: f64) -> f64 {
    use statrs::function::erf::erf;
    // Standard normal CDF: Phi(z) = 0.5 * (1 + erf(z / sqrt(2)))
    0.5 * (1.0 + erf(z_score.abs() / f64::sqrt(2.0)))
}
