//! Common Types and Constants
//!
//! Shared data structures used across the learning modules.

use serde::{Deserialize, Serialize};

// ==================== Constants ====================

/// Minimum blink rate (blinks per minute) that counts as healthy
pub const GOOD_BLINK_THRESHOLD: f64 = 12.0;

/// Closest healthy viewing distance (cm)
pub const GOOD_DISTANCE_MIN: f64 = 50.0;

/// Farthest healthy viewing distance (cm)
pub const GOOD_DISTANCE_MAX: f64 = 80.0;

/// Number of discrete health states
pub const STATE_COUNT: usize = 4;

/// Number of reminder actions
pub const ACTION_COUNT: usize = 4;

// ==================== State ====================

/// Discretized health condition: blink-rate adequacy x distance adequacy.
///
/// Serialized names match the persisted table keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum State {
    GoodBlinkGoodDistance,
    GoodBlinkBadDistance,
    LowBlinkGoodDistance,
    LowBlinkBadDistance,
}

impl State {
    /// All states in declaration order
    pub const ALL: [State; STATE_COUNT] = [
        State::GoodBlinkGoodDistance,
        State::GoodBlinkBadDistance,
        State::LowBlinkGoodDistance,
        State::LowBlinkBadDistance,
    ];

    pub fn from_flags(blink_ok: bool, distance_ok: bool) -> Self {
        match (blink_ok, distance_ok) {
            (true, true) => State::GoodBlinkGoodDistance,
            (true, false) => State::GoodBlinkBadDistance,
            (false, true) => State::LowBlinkGoodDistance,
            (false, false) => State::LowBlinkBadDistance,
        }
    }

    pub fn blink_ok(self) -> bool {
        matches!(self, State::GoodBlinkGoodDistance | State::GoodBlinkBadDistance)
    }

    pub fn distance_ok(self) -> bool {
        matches!(self, State::GoodBlinkGoodDistance | State::LowBlinkGoodDistance)
    }

    pub fn to_index(self) -> usize {
        match self {
            State::GoodBlinkGoodDistance => 0,
            State::GoodBlinkBadDistance => 1,
            State::LowBlinkGoodDistance => 2,
            State::LowBlinkBadDistance => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            State::GoodBlinkGoodDistance => "GOOD_BLINK_GOOD_DISTANCE",
            State::GoodBlinkBadDistance => "GOOD_BLINK_BAD_DISTANCE",
            State::LowBlinkGoodDistance => "LOW_BLINK_GOOD_DISTANCE",
            State::LowBlinkBadDistance => "LOW_BLINK_BAD_DISTANCE",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        State::ALL.into_iter().find(|state| state.as_str() == s)
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==================== Action ====================

/// Reminder the agent may present to the user (or no-op).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    BlinkReminder,
    DistanceReminder,
    CombinedReminder,
    NoAction,
}

impl Action {
    /// All actions in canonical order; greedy tie-breaks follow this order
    pub const ALL: [Action; ACTION_COUNT] = [
        Action::BlinkReminder,
        Action::DistanceReminder,
        Action::CombinedReminder,
        Action::NoAction,
    ];

    pub fn to_index(self) -> usize {
        match self {
            Action::BlinkReminder => 0,
            Action::DistanceReminder => 1,
            Action::CombinedReminder => 2,
            Action::NoAction => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::BlinkReminder => "BLINK_REMINDER",
            Action::DistanceReminder => "DISTANCE_REMINDER",
            Action::CombinedReminder => "COMBINED_REMINDER",
            Action::NoAction => "NO_ACTION",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Action::ALL.into_iter().find(|action| action.as_str() == s)
    }

    /// Text shown to the user when the action fires; `None` for [`Action::NoAction`]
    pub fn reminder_message(self) -> Option<&'static str> {
        match self {
            Action::BlinkReminder => Some("Remember to blink regularly!"),
            Action::DistanceReminder => Some("Please maintain a safe distance from the screen"),
            Action::CombinedReminder => {
                Some("Take a break: blink regularly and adjust your distance")
            }
            Action::NoAction => None,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==================== Agent I/O ====================

/// One sampling tick of sensed metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// Blinks per minute
    pub blink_rate: f64,
    /// Viewing distance in cm
    pub distance: f64,
}

/// Outcome of one agent tick.
///
/// `action` is the action credited with `reward` (chosen on the previous tick),
/// not the one chosen for the next tick. Read [`AgentMemory::last_action`] for that.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickResult {
    pub previous_state: Option<State>,
    pub new_state: State,
    pub action: Action,
    pub reward: f64,
}

/// What the agent remembers between ticks
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentMemory {
    last_state: Option<State>,
    last_action: Option<Action>,
    /// Informational only
    last_reward: f64,
}

impl AgentMemory {
    pub fn last_state(&self) -> Option<State> {
        self.last_state
    }

    pub fn last_action(&self) -> Option<Action> {
        self.last_action
    }

    pub fn last_reward(&self) -> f64 {
        self.last_reward
    }

    /// Previous (state, action) pair, present once the first tick has run
    pub fn previous(&self) -> Option<(State, Action)> {
        self.last_state.zip(self.last_action)
    }

    pub(crate) fn record(&mut self, state: State, action: Action, reward: f64) {
        self.last_state = Some(state);
        self.last_action = Some(action);
        self.last_reward = reward;
    }
}
