mod agent;
mod blink;
mod storage;

pub use agent::*;
pub use blink::*;
pub use storage::*;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
