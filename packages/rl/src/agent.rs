//! Agent loop
//!
//! Each tick classifies fresh metrics, credits the previous action with the
//! transition reward, updates the value table, picks the next action and hands
//! it to the caller's action handler.
//!
//! Loop states:
//! - Uninitialized: no previous (state, action); the first tick only chooses
//! - Running: every later tick learns from the previous (state, action)
//!
//! The returned [`TickResult::action`] is the action being credited, i.e. the
//! one chosen on the previous tick. The action chosen during the tick is in
//! [`Agent::memory`] afterwards.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::classifier::classify;
use crate::config::AgentConfig;
use crate::error::StoreResult;
use crate::policy::{choose_action, RandomSource};
use crate::q_table::ValueTable;
use crate::reward::reward;
use crate::sanitize::metrics_issue;
use crate::store::KeyValueStore;
use crate::types::{Action, AgentMemory, Metrics, State, TickResult};

/// Dashboard view of the agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentSnapshot {
    pub current_state: Option<State>,
    pub last_action: Option<Action>,
    pub last_reward: f64,
    pub q_table: ValueTable,
}

pub struct Agent<S: KeyValueStore, R: RandomSource = ChaCha8Rng> {
    learning_rate: f64,
    discount_factor: f64,
    /// Probability of a random action; adjustable directly
    pub exploration_rate: f64,
    storage_key: String,
    table: ValueTable,
    memory: AgentMemory,
    store: S,
    rng: R,
    store_failures: u64,
}

impl<S: KeyValueStore> Agent<S, ChaCha8Rng> {
    /// Create an agent with a ChaCha8 policy rng.
    ///
    /// Seeded from `config.seed`, or from the system clock when absent. Hosts
    /// without a clock (wasm) must pass a seed.
    pub fn new(config: AgentConfig, store: S) -> Self {
        let seed = config.seed.unwrap_or_else(clock_seed);
        Self::with_rng(config, store, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<S: KeyValueStore, R: RandomSource> Agent<S, R> {
    /// Create an agent with an explicit random source.
    ///
    /// Loads the persisted table under `config.storage_key`; a missing,
    /// unreadable or malformed blob leaves the all-zero table in place.
    pub fn with_rng(config: AgentConfig, store: S, rng: R) -> Self {
        let config = config.validated();
        let table = load_table(&store, &config.storage_key);

        Self {
            learning_rate: config.learning_rate,
            discount_factor: config.discount_factor,
            exploration_rate: config.exploration_rate,
            storage_key: config.storage_key,
            table,
            memory: AgentMemory::default(),
            store,
            rng,
            store_failures: 0,
        }
    }

    /// Run one sampling tick and pass the newly chosen action to `on_action`
    pub fn tick<F>(&mut self, blink_rate: f64, distance: f64, mut on_action: F) -> TickResult
    where
        F: FnMut(Action),
    {
        let metrics = Metrics {
            blink_rate,
            distance,
        };
        if let Some(issue) = metrics_issue(&metrics) {
            warn!(blink_rate, distance, issue, "Unexpected metric input");
        }

        let new_state = classify(blink_rate, distance);

        let Some((previous_state, previous_action)) = self.memory.previous() else {
            let action = self.choose_action(new_state);
            self.memory.record(new_state, action, 0.0);
            debug!(state = %new_state, action = %action, "First tick");
            on_action(action);
            return TickResult {
                previous_state: None,
                new_state,
                action,
                reward: 0.0,
            };
        };

        let reward = reward(previous_state, new_state);
        self.learn(previous_state, previous_action, reward, new_state);

        let next_action = self.choose_action(new_state);
        self.memory.record(new_state, next_action, reward);
        debug!(
            from = %previous_state,
            to = %new_state,
            credited = %previous_action,
            reward,
            next = %next_action,
            "Tick"
        );

        on_action(next_action);

        TickResult {
            previous_state: Some(previous_state),
            new_state,
            action: previous_action,
            reward,
        }
    }

    /// [`Agent::tick`] for a metrics sample
    pub fn process_metrics<F>(&mut self, metrics: Metrics, on_action: F) -> TickResult
    where
        F: FnMut(Action),
    {
        self.tick(metrics.blink_rate, metrics.distance, on_action)
    }

    /// Apply one learning update and persist the table.
    ///
    /// A failed save is logged and counted; the in-memory update stands.
    pub fn learn(&mut self, state: State, action: Action, reward: f64, next_state: State) -> f64 {
        let new_q = self.table.update(
            state,
            action,
            reward,
            next_state,
            self.learning_rate,
            self.discount_factor,
        );
        if let Err(err) = self.persist() {
            self.store_failures += 1;
            warn!(
                error = %err,
                key = %self.storage_key,
                failures = self.store_failures,
                "Failed to persist value table"
            );
        }
        new_q
    }

    /// Epsilon-greedy choice for `state`
    pub fn choose_action(&mut self, state: State) -> Action {
        choose_action(&self.table, state, self.exploration_rate, &mut self.rng)
    }

    /// Zero every cell and persist immediately
    pub fn reset_table(&mut self) -> StoreResult<()> {
        self.table.reset();
        info!(key = %self.storage_key, "Value table reset");
        self.persist()
    }

    pub fn table(&self) -> &ValueTable {
        &self.table
    }

    pub fn memory(&self) -> &AgentMemory {
        &self.memory
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Saves that failed since construction
    pub fn store_failures(&self) -> u64 {
        self.store_failures
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            current_state: self.memory.last_state(),
            last_action: self.memory.last_action(),
            last_reward: self.memory.last_reward(),
            q_table: self.table,
        }
    }

    fn persist(&mut self) -> StoreResult<()> {
        let blob = self.table.to_json()?;
        self.store.save(&self.storage_key, &blob)
    }
}

fn load_table<S: KeyValueStore>(store: &S, key: &str) -> ValueTable {
    match store.load(key) {
        Ok(Some(blob)) => match ValueTable::from_json(&blob) {
            Ok(table) => {
                debug!(key, "Loaded persisted value table");
                table
            }
            Err(err) => {
                warn!(error = %err, key, "Discarding persisted value table");
                ValueTable::new()
            }
        },
        Ok(None) => ValueTable::new(),
        Err(err) => {
            warn!(error = %err, key, "Value table store unavailable, starting from zero");
            ValueTable::new()
        }
    }
}

fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42)
}
