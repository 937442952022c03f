use eye_guardian_rl::{Action, Agent, AgentConfig};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::storage::{JsStorage, LocalStore};

#[wasm_bindgen]
pub struct EyeGuardianAgent {
    inner: Agent<LocalStore>,
}

#[wasm_bindgen]
impl EyeGuardianAgent {
    /// `options`: `{ learningRate, discountFactor, explorationRate, storageKey, seed }`,
    /// every field optional. `storage` defaults to `window.localStorage`.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue, storage: Option<JsStorage>) -> Result<EyeGuardianAgent, JsValue> {
        let mut config: AgentConfig = if options.is_undefined() || options.is_null() {
            AgentConfig::default()
        } else {
            serde_wasm_bindgen::from_value(options)?
        };
        if config.seed.is_none() {
            config.seed = Some(combine_seed(js_sys::Math::random(), js_sys::Math::random()));
        }

        Ok(Self {
            inner: Agent::new(config, LocalStore::new(storage)),
        })
    }

    /// Run one tick. `callback` receives the next action name; the returned
    /// object is `{ previousState, newState, action, reward }` where `action`
    /// is the action credited with `reward`.
    #[wasm_bindgen(js_name = processMetrics)]
    pub fn process_metrics(
        &mut self,
        blink_rate: f64,
        distance: f64,
        callback: Option<js_sys::Function>,
    ) -> Result<JsValue, JsValue> {
        let mut callback_error = None;
        let result = self.inner.tick(blink_rate, distance, |action| {
            if let Some(callback) = &callback {
                if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_str(action.as_str())) {
                    callback_error = Some(err);
                }
            }
        });
        if let Some(err) = callback_error {
            return Err(err);
        }
        to_js(&result)
    }

    #[wasm_bindgen(js_name = resetQTable)]
    pub fn reset_q_table(&mut self) -> Result<(), JsValue> {
        self.inner
            .reset_table()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = qTable)]
    pub fn q_table(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.table())
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.snapshot())
    }

    /// Action chosen on the latest tick
    #[wasm_bindgen(getter, js_name = lastAction)]
    pub fn last_action(&self) -> Option<String> {
        self.inner
            .memory()
            .last_action()
            .map(|a| a.as_str().to_string())
    }

    #[wasm_bindgen(getter, js_name = explorationRate)]
    pub fn exploration_rate(&self) -> f64 {
        self.inner.exploration_rate
    }

    #[wasm_bindgen(setter, js_name = explorationRate)]
    pub fn set_exploration_rate(&mut self, rate: f64) {
        self.inner.exploration_rate = rate;
    }

    #[wasm_bindgen(getter, js_name = storeFailures)]
    pub fn store_failures(&self) -> f64 {
        self.inner.store_failures() as f64
    }
}

#[wasm_bindgen(js_name = reminderMessage)]
pub fn reminder_message(action: &str) -> Option<String> {
    Action::from_str(action)
        .and_then(Action::reminder_message)
        .map(str::to_string)
}

/// Serialize with `null` for absent values and plain objects for maps
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(JsValue::from)
}

fn combine_seed(hi: f64, lo: f64) -> u64 {
    let scale = u32::MAX as f64;
    (((hi * scale) as u64) << 32) | ((lo * scale) as u64)
}
