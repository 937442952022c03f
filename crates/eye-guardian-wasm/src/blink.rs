use eye_guardian_rl::metrics::{clamp_display_distance, estimate_distance_cm, BlinkRateWindow};
use wasm_bindgen::prelude::*;

/// Blinks per minute over a sliding window, fed with blink timestamps (ms)
#[wasm_bindgen]
pub struct BlinkRateTracker {
    window: BlinkRateWindow,
}

#[wasm_bindgen]
impl BlinkRateTracker {
    #[wasm_bindgen(constructor)]
    pub fn new(window_ms: Option<f64>) -> Self {
        Self {
            window: window_ms.map(BlinkRateWindow::new).unwrap_or_default(),
        }
    }

    #[wasm_bindgen(js_name = recordBlink)]
    pub fn record_blink(&mut self, timestamp: f64) {
        self.window.record_blink(timestamp);
    }

    #[wasm_bindgen(js_name = blinkRate)]
    pub fn blink_rate(&mut self, now: f64) -> f64 {
        self.window.blink_rate(now)
    }

    #[wasm_bindgen(getter, js_name = blinkCount)]
    pub fn blink_count(&self) -> u32 {
        self.window.blink_count() as u32
    }

    pub fn reset(&mut self) {
        self.window.reset();
    }
}

/// Viewing distance (cm) from the detected face box, `undefined` for an empty box
#[wasm_bindgen(js_name = estimateDistance)]
pub fn estimate_distance(face_width: f64, face_height: f64) -> Option<f64> {
    estimate_distance_cm(face_width, face_height)
}

#[wasm_bindgen(js_name = displayDistance)]
pub fn display_distance(distance: f64) -> f64 {
    clamp_display_distance(distance)
}
