//! Property-Based Tests for the learning core
//!
//! Invariants:
//! - classify is total and honours the inclusive thresholds
//! - the value table stays total (16 finite cells) under any update sequence
//! - a greedy policy (epsilon = 0) always returns a maximal action
//! - reward only ever takes one of the four rule values

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use eye_guardian_rl::{
    choose_action, classify, reward, Action, State, ValueTable, GOOD_BLINK_THRESHOLD,
    GOOD_DISTANCE_MAX, GOOD_DISTANCE_MIN,
};

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_state() -> impl Strategy<Value = State> {
    prop::sample::select(State::ALL.to_vec())
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop::sample::select(Action::ALL.to_vec())
}

fn arb_table() -> impl Strategy<Value = ValueTable> {
    prop::collection::vec(-5.0f64..5.0, 16).prop_map(|values| {
        let mut table = ValueTable::new();
        for (i, value) in values.into_iter().enumerate() {
            table.set(State::ALL[i / 4], Action::ALL[i % 4], value);
        }
        table
    })
}

proptest! {
    #[test]
    fn prop_classify_matches_thresholds(rate in -10.0f64..60.0, distance in -10.0f64..200.0) {
        let state = classify(rate, distance);
        prop_assert_eq!(state.blink_ok(), rate >= GOOD_BLINK_THRESHOLD);
        prop_assert_eq!(
            state.distance_ok(),
            (GOOD_DISTANCE_MIN..=GOOD_DISTANCE_MAX).contains(&distance)
        );
    }

    #[test]
    fn prop_reward_takes_rule_values(prev in arb_state(), next in arb_state()) {
        let r = reward(prev, next);
        prop_assert!([1.0, 0.8, -0.2, 0.0].contains(&r));
        if prev == next {
            prop_assert_eq!(r, 0.0);
        }
    }

    #[test]
    fn prop_updates_keep_table_total(
        steps in prop::collection::vec((arb_state(), arb_action(), -1.0f64..1.0, arb_state()), 1..64),
        alpha in 0.01f64..=1.0,
        gamma in 0.0f64..=1.0,
    ) {
        let mut table = ValueTable::new();
        for (state, action, r, next) in steps {
            let before = table.get(state, action);
            let next_max = table.max_value(next);
            let new_q = table.update(state, action, r, next, alpha, gamma);
            prop_assert!((new_q - (before + alpha * (r + gamma * next_max - before))).abs() < 1e-9);
        }
        prop_assert_eq!(table.cells().count(), 16);
        prop_assert!(table.cells().all(|(_, _, v)| v.is_finite()));

        let restored = ValueTable::from_json(&table.to_json().unwrap()).unwrap();
        for (state, action, value) in table.cells() {
            prop_assert!((restored.get(state, action) - value).abs() <= 1e-12 * value.abs().max(1.0));
        }
    }

    #[test]
    fn prop_greedy_policy_returns_maximal_action(table in arb_table(), state in arb_state(), seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let action = choose_action(&table, state, 0.0, &mut rng);
        prop_assert_eq!(table.get(state, action), table.max_value(state));

        // earliest maximal action wins
        let first_max = Action::ALL
            .into_iter()
            .find(|&a| table.get(state, a) == table.max_value(state))
            .unwrap();
        prop_assert_eq!(action, first_max);
    }
}
