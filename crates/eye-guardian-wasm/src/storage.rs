use eye_guardian_rl::{KeyValueStore, StoreError, StoreResult};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen]
extern "C" {
    /// Any object with `getItem`/`setItem`, normally `window.localStorage`
    pub type JsStorage;

    #[wasm_bindgen(method, catch, js_name = getItem)]
    fn get_item(this: &JsStorage, key: &str) -> Result<Option<String>, JsValue>;

    #[wasm_bindgen(method, catch, js_name = setItem)]
    fn set_item(this: &JsStorage, key: &str, value: &str) -> Result<(), JsValue>;
}

/// `localStorage`-backed value table store
pub struct LocalStore {
    storage: Option<JsStorage>,
}

impl LocalStore {
    pub fn new(storage: Option<JsStorage>) -> Self {
        Self {
            storage: storage.or_else(global_local_storage),
        }
    }

    fn storage(&self) -> StoreResult<&JsStorage> {
        self.storage
            .as_ref()
            .ok_or_else(|| StoreError::Unavailable("localStorage is not available".to_string()))
    }
}

impl KeyValueStore for LocalStore {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|e| StoreError::Unavailable(describe(&e)))
    }

    fn save(&mut self, key: &str, blob: &str) -> StoreResult<()> {
        self.storage()?
            .set_item(key, blob)
            .map_err(|e| StoreError::Unavailable(describe(&e)))
    }
}

/// `globalThis.localStorage`; reading it throws in sandboxed frames
fn global_local_storage() -> Option<JsStorage> {
    let value = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("localStorage")).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    Some(value.unchecked_into::<JsStorage>())
}

fn describe(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            err.dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{err:?}"))
}
