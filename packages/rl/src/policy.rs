//! Epsilon-greedy action selection
//!
//! One uniform draw `r` per decision: `r < epsilon` explores (uniform over the
//! four actions), otherwise the greedy action of the value table is taken.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::q_table::ValueTable;
use crate::types::{Action, State, ACTION_COUNT};

/// Injectable source of uniform randomness for the policy
pub trait RandomSource {
    /// Uniform draw in [0, 1)
    fn next_unit(&mut self) -> f64;

    /// Uniform index in [0, n), n > 0
    fn next_index(&mut self, n: usize) -> usize;
}

impl RandomSource for ChaCha8Rng {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn next_index(&mut self, n: usize) -> usize {
        self.gen_range(0..n)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }

    fn next_index(&mut self, n: usize) -> usize {
        (**self).next_index(n)
    }
}

/// Pick an action for `state`
pub fn choose_action<R: RandomSource + ?Sized>(
    table: &ValueTable,
    state: State,
    exploration_rate: f64,
    rng: &mut R,
) -> Action {
    if rng.next_unit() < exploration_rate {
        Action::ALL[rng.next_index(ACTION_COUNT).min(ACTION_COUNT - 1)]
    } else {
        table.best_action(state)
    }
}

/// Probability that [`choose_action`] returns `action` in `state`
pub fn action_probability(
    table: &ValueTable,
    state: State,
    action: Action,
    exploration_rate: f64,
) -> f64 {
    let epsilon = exploration_rate.clamp(0.0, 1.0);
    let uniform = epsilon / ACTION_COUNT as f64;
    if table.best_action(state) == action {
        1.0 - epsilon + uniform
    } else {
        uniform
    }
}
