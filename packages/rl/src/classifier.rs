//! State classification
//!
//! Maps raw metrics to one of the four discrete health states. Thresholds are
//! inclusive in favour of "good". Comparisons are plain float comparisons, so a
//! NaN metric lands on the "low"/"bad" side.

use crate::types::{State, GOOD_BLINK_THRESHOLD, GOOD_DISTANCE_MAX, GOOD_DISTANCE_MIN};

pub fn is_good_blink_rate(blink_rate: f64) -> bool {
    blink_rate >= GOOD_BLINK_THRESHOLD
}

pub fn is_good_distance(distance: f64) -> bool {
    distance >= GOOD_DISTANCE_MIN && distance <= GOOD_DISTANCE_MAX
}

/// Classify blink rate (blinks/min) and viewing distance (cm)
pub fn classify(blink_rate: f64, distance: f64) -> State {
    State::from_flags(is_good_blink_rate(blink_rate), is_good_distance(distance))
}
