//! Input checks for sensed metrics
//!
//! Metrics are never rejected: classification passes them through unchanged.
//! These helpers only decide whether an input is worth a warning.

use crate::types::Metrics;

/// Whether the slice contains NaN or infinite values
pub fn has_invalid_values(arr: &[f64]) -> bool {
    arr.iter().any(|&x| x.is_nan() || x.is_infinite())
}

/// Describe what is wrong with a metrics sample, if anything
pub fn metrics_issue(metrics: &Metrics) -> Option<&'static str> {
    if has_invalid_values(&[metrics.blink_rate, metrics.distance]) {
        Some("non-finite metric")
    } else if metrics.blink_rate < 0.0 || metrics.distance < 0.0 {
        Some("negative metric")
    } else {
        None
    }
}
