use serde::{Deserialize, Serialize};

/// Key the value table is persisted under
pub const DEFAULT_STORAGE_KEY: &str = "eyeGuardianQTable";

pub const DEFAULT_LEARNING_RATE: f64 = 0.1;
pub const DEFAULT_DISCOUNT_FACTOR: f64 = 0.9;
pub const DEFAULT_EXPLORATION_RATE: f64 = 0.1;

fn default_learning_rate() -> f64 {
    DEFAULT_LEARNING_RATE
}

fn default_discount_factor() -> f64 {
    DEFAULT_DISCOUNT_FACTOR
}

fn default_exploration_rate() -> f64 {
    DEFAULT_EXPLORATION_RATE
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

/// Agent construction options.
///
/// Field names follow the browser options object (`learningRate`, `discountFactor`, ...),
/// any missing field takes its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentConfig {
    /// alpha, in (0, 1]
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    /// gamma, in [0, 1]
    #[serde(default = "default_discount_factor")]
    pub discount_factor: f64,
    /// epsilon, in [0, 1]
    #[serde(default = "default_exploration_rate")]
    pub exploration_rate: f64,
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Seed for the policy rng; `None` derives one from the clock
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            discount_factor: DEFAULT_DISCOUNT_FACTOR,
            exploration_rate: DEFAULT_EXPLORATION_RATE,
            storage_key: default_storage_key(),
            seed: None,
        }
    }
}

impl AgentConfig {
    pub fn new(learning_rate: f64, discount_factor: f64) -> Self {
        Self {
            learning_rate,
            discount_factor,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_exploration_rate(mut self, exploration_rate: f64) -> Self {
        self.exploration_rate = exploration_rate;
        self
    }

    /// Clamp every rate into its legal range
    pub fn validated(mut self) -> Self {
        self.learning_rate = if self.learning_rate.is_finite() && self.learning_rate > 0.0 {
            self.learning_rate.min(1.0)
        } else {
            DEFAULT_LEARNING_RATE
        };
        self.discount_factor = clamp_unit(self.discount_factor, DEFAULT_DISCOUNT_FACTOR);
        self.exploration_rate = clamp_unit(self.exploration_rate, DEFAULT_EXPLORATION_RATE);
        if self.storage_key.is_empty() {
            self.storage_key = default_storage_key();
        }
        self
    }
}

fn clamp_unit(value: f64, fallback: f64) -> f64 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(0.0, 1.0)
    }
}
