//! # eye-guardian-rl - adaptive reminder engine
//!
//! Pure Rust core of the eye-health assistant: a small tabular Q-learning loop
//! that watches blink rate and viewing distance and decides which reminder to
//! show.
//!
//! ## Modules
//!
//! - [`classifier`] - metrics to one of four discrete health states
//! - [`reward`] - transition reward
//! - [`q_table`] - 4x4 value table, Q-learning update, JSON persistence format
//! - [`policy`] - epsilon-greedy action selection over an injectable random source
//! - [`agent`] - the tick loop tying everything together
//! - [`store`] - key-value store seam for persistence
//! - [`metrics`] - distance estimate and blink-rate window for the sensing side
//!
//! ## Example
//!
//! ```rust
//! use eye_guardian_rl::{Agent, AgentConfig, MemoryStore, State};
//!
//! let mut agent = Agent::new(AgentConfig::default().with_seed(7), MemoryStore::new());
//!
//! let first = agent.tick(8.0, 40.0, |action| {
//!     if let Some(message) = action.reminder_message() {
//!         println!("{message}");
//!     }
//! });
//! assert_eq!(first.new_state, State::LowBlinkBadDistance);
//! assert!(first.previous_state.is_none());
//!
//! let second = agent.tick(15.0, 55.0, |_| {});
//! assert_eq!(second.reward, 1.0);
//! ```

pub mod agent;
pub mod classifier;
pub mod config;
pub mod error;
pub mod metrics;
pub mod policy;
pub mod q_table;
pub mod reward;
pub mod sanitize;
pub mod store;
pub mod types;

pub use agent::{Agent, AgentSnapshot};
pub use classifier::classify;
pub use config::AgentConfig;
pub use error::{StoreError, StoreResult};
pub use metrics::{clamp_display_distance, estimate_distance_cm, BlinkRateWindow};
pub use policy::{action_probability, choose_action, RandomSource};
pub use q_table::ValueTable;
pub use reward::reward;
pub use store::{KeyValueStore, MemoryStore};
pub use types::*;
