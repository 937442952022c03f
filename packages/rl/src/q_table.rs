//! Value table and Q-learning update
//!
//! The table is a fixed 4x4 array indexed by [`State`] and [`Action`], so every
//! state always carries an estimate for every action. Persisted form is a JSON
//! object keyed by state name, then action name:
//!
//! ```json
//! { "GOOD_BLINK_GOOD_DISTANCE": { "BLINK_REMINDER": 0.0, "...": 0.0 }, "...": {} }
//! ```
//!
//! One-step update:
//! Q(s,a) <- Q(s,a) + alpha * (r + gamma * max_a' Q(s',a') - Q(s,a))

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{StoreError, StoreResult};
use crate::types::{Action, State, ACTION_COUNT, STATE_COUNT};

type RawTable = BTreeMap<State, BTreeMap<Action, f64>>;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawTable", into = "RawTable")]
pub struct ValueTable {
    values: [[f64; ACTION_COUNT]; STATE_COUNT],
}

impl ValueTable {
    /// All-zero table
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, state: State, action: Action) -> f64 {
        self.values[state.to_index()][action.to_index()]
    }

    pub fn set(&mut self, state: State, action: Action, value: f64) {
        self.values[state.to_index()][action.to_index()] = value;
    }

    /// Estimates for `state`, in canonical action order
    pub fn row(&self, state: State) -> [f64; ACTION_COUNT] {
        self.values[state.to_index()]
    }

    /// Largest estimate for `state`; the row is never empty
    pub fn max_value(&self, state: State) -> f64 {
        self.row(state)
            .into_iter()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Greedy action for `state`.
    ///
    /// Linear scan in canonical order where only a strictly greater estimate
    /// replaces the current best, so ties go to the earliest action.
    pub fn best_action(&self, state: State) -> Action {
        let row = self.row(state);
        let mut best = Action::ALL[0];
        let mut best_value = row[0];
        for action in Action::ALL.into_iter().skip(1) {
            let value = row[action.to_index()];
            if value > best_value {
                best = action;
                best_value = value;
            }
        }
        best
    }

    /// Apply the Q-learning update in place and return the new estimate
    pub fn update(
        &mut self,
        state: State,
        action: Action,
        reward: f64,
        next_state: State,
        learning_rate: f64,
        discount_factor: f64,
    ) -> f64 {
        let current_q = self.get(state, action);
        let next_max_q = self.max_value(next_state);
        let new_q =
            current_q + learning_rate * (reward + discount_factor * next_max_q - current_q);
        self.set(state, action, new_q);
        new_q
    }

    pub fn reset(&mut self) {
        self.values = [[0.0; ACTION_COUNT]; STATE_COUNT];
    }

    pub fn is_zero(&self) -> bool {
        self.values.iter().flatten().all(|&v| v == 0.0)
    }

    /// Iterate `(state, action, value)` over all 16 cells
    pub fn cells(&self) -> impl Iterator<Item = (State, Action, f64)> + '_ {
        State::ALL.into_iter().flat_map(move |state| {
            Action::ALL
                .into_iter()
                .map(move |action| (state, action, self.get(state, action)))
        })
    }

    pub fn to_json(&self) -> StoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a persisted blob.
    ///
    /// Invalid JSON is [`StoreError::Serialization`]; valid JSON of the wrong
    /// shape (unknown key, missing cell, non-numeric value) is
    /// [`StoreError::MalformedTable`].
    pub fn from_json(blob: &str) -> StoreResult<Self> {
        let value: serde_json::Value = serde_json::from_str(blob)?;
        let raw: RawTable = serde_json::from_value(value)
            .map_err(|e| StoreError::MalformedTable(e.to_string()))?;
        Self::try_from(raw)
    }
}

impl TryFrom<RawTable> for ValueTable {
    type Error = StoreError;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        let mut table = ValueTable::new();
        for state in State::ALL {
            let row = raw
                .get(&state)
                .ok_or_else(|| StoreError::MalformedTable(format!("missing state {state}")))?;
            for action in Action::ALL {
                let value = row.get(&action).ok_or_else(|| {
                    StoreError::MalformedTable(format!("missing action {action} for {state}"))
                })?;
                table.set(state, action, *value);
            }
        }
        Ok(table)
    }
}

impl From<ValueTable> for RawTable {
    fn from(table: ValueTable) -> Self {
        let mut raw = RawTable::new();
        for (state, action, value) in table.cells() {
            raw.entry(state).or_default().insert(action, value);
        }
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_new_table_is_all_zero() {
        let table = ValueTable::new();
        assert_eq!(table.cells().count(), 16);
        for (_, _, value) in table.cells() {
            assert_eq!(value, 0.0);
        }
        assert!(table.is_zero());
    }

    #[test]
    fn test_single_update_from_zero() {
        let mut table = ValueTable::new();
        let new_q = table.update(
            State::LowBlinkBadDistance,
            Action::BlinkReminder,
            1.0,
            State::GoodBlinkGoodDistance,
            0.1,
            0.9,
        );
        assert!((new_q - 0.1).abs() < EPS);
        assert!((table.get(State::LowBlinkBadDistance, Action::BlinkReminder) - 0.1).abs() < EPS);
        assert_eq!(table.get(State::LowBlinkBadDistance, Action::NoAction), 0.0);
    }

    #[test]
    fn test_update_bootstraps_from_next_state_max() {
        let mut table = ValueTable::new();
        table.set(State::GoodBlinkGoodDistance, Action::NoAction, 2.0);
        table.set(State::GoodBlinkGoodDistance, Action::BlinkReminder, -1.0);
        table.set(State::LowBlinkGoodDistance, Action::BlinkReminder, 0.5);

        // 0.5 + 0.5 * (0.8 + 0.9 * 2.0 - 0.5) = 1.55
        let new_q = table.update(
            State::LowBlinkGoodDistance,
            Action::BlinkReminder,
            0.8,
            State::GoodBlinkGoodDistance,
            0.5,
            0.9,
        );
        assert!((new_q - 1.55).abs() < EPS);
    }

    #[test]
    fn test_max_value_with_all_negative_row() {
        let mut table = ValueTable::new();
        for action in Action::ALL {
            table.set(State::GoodBlinkBadDistance, action, -3.0);
        }
        table.set(State::GoodBlinkBadDistance, Action::CombinedReminder, -0.5);
        assert_eq!(table.max_value(State::GoodBlinkBadDistance), -0.5);
    }

    #[test]
    fn test_best_action_tie_break_is_first_in_order() {
        let mut table = ValueTable::new();
        assert_eq!(table.best_action(State::LowBlinkBadDistance), Action::BlinkReminder);

        table.set(State::LowBlinkBadDistance, Action::DistanceReminder, 0.4);
        table.set(State::LowBlinkBadDistance, Action::NoAction, 0.4);
        assert_eq!(table.best_action(State::LowBlinkBadDistance), Action::DistanceReminder);

        table.set(State::LowBlinkBadDistance, Action::NoAction, 0.41);
        assert_eq!(table.best_action(State::LowBlinkBadDistance), Action::NoAction);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut table = ValueTable::new();
        table.set(State::GoodBlinkGoodDistance, Action::NoAction, 3.0);
        table.reset();
        let once = table;
        table.reset();
        assert_eq!(table, once);
        assert!(table.is_zero());
    }

    #[test]
    fn test_json_shape_and_roundtrip() {
        let mut table = ValueTable::new();
        table.set(State::LowBlinkBadDistance, Action::CombinedReminder, 0.25);

        let json = table.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 4);
        assert_eq!(value["LOW_BLINK_BAD_DISTANCE"]["COMBINED_REMINDER"], 0.25);
        assert_eq!(value["GOOD_BLINK_GOOD_DISTANCE"]["NO_ACTION"], 0.0);

        assert_eq!(ValueTable::from_json(&json).unwrap(), table);
    }

    #[test]
    fn test_from_json_accepts_integer_zeros() {
        let blob = r#"{
            "GOOD_BLINK_GOOD_DISTANCE": {"BLINK_REMINDER": 0, "DISTANCE_REMINDER": 0, "COMBINED_REMINDER": 0, "NO_ACTION": 1},
            "GOOD_BLINK_BAD_DISTANCE": {"BLINK_REMINDER": 0, "DISTANCE_REMINDER": 0, "COMBINED_REMINDER": 0, "NO_ACTION": 0},
            "LOW_BLINK_GOOD_DISTANCE": {"BLINK_REMINDER": 0, "DISTANCE_REMINDER": 0, "COMBINED_REMINDER": 0, "NO_ACTION": 0},
            "LOW_BLINK_BAD_DISTANCE": {"BLINK_REMINDER": 0, "DISTANCE_REMINDER": 0, "COMBINED_REMINDER": 0, "NO_ACTION": 0}
        }"#;
        let table = ValueTable::from_json(blob).unwrap();
        assert_eq!(table.get(State::GoodBlinkGoodDistance, Action::NoAction), 1.0);
    }

    #[test]
    fn test_from_json_invalid_json() {
        let err = ValueTable::from_json("{not json").unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[test]
    fn test_from_json_missing_cell() {
        let mut raw: RawTable = ValueTable::new().into();
        raw.get_mut(&State::GoodBlinkBadDistance)
            .unwrap()
            .remove(&Action::DistanceReminder);
        let blob = serde_json::to_string(&raw).unwrap();

        let err = ValueTable::from_json(&blob).unwrap_err();
        assert!(matches!(err, StoreError::MalformedTable(_)));
    }

    #[test]
    fn test_from_json_missing_state_or_wrong_type() {
        let err = ValueTable::from_json("{}").unwrap_err();
        assert!(matches!(err, StoreError::MalformedTable(_)));

        let err = ValueTable::from_json("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, StoreError::MalformedTable(_)));

        let err = ValueTable::from_json(r#"{"SOMETHING_ELSE": {}}"#).unwrap_err();
        assert!(matches!(err, StoreError::MalformedTable(_)));
    }
}
