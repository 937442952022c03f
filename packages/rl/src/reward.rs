//! Transition reward
//!
//! - escaping the worst state: +1.0
//! - reaching the best state from a single-deficient state: +0.8
//! - leaving the best state: -0.2
//! - anything else: 0.0

use crate::types::State;

pub const ESCAPE_WORST_REWARD: f64 = 1.0;
pub const REACH_BEST_REWARD: f64 = 0.8;
pub const REGRESSION_PENALTY: f64 = -0.2;

/// Score the transition `prev -> next`
pub fn reward(prev: State, next: State) -> f64 {
    use State::*;

    match (prev, next) {
        (LowBlinkBadDistance, next) if next != LowBlinkBadDistance => ESCAPE_WORST_REWARD,
        (GoodBlinkBadDistance, GoodBlinkGoodDistance) => REACH_BEST_REWARD,
        (LowBlinkGoodDistance, GoodBlinkGoodDistance) => REACH_BEST_REWARD,
        (GoodBlinkGoodDistance, next) if next != GoodBlinkGoodDistance => REGRESSION_PENALTY,
        _ => 0.0,
    }
}
