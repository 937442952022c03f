//! Metric helpers for the sensing side
//!
//! Face detection stays with the host; these turn its outputs (a face box,
//! blink timestamps) into the per-tick [`Metrics`](crate::types::Metrics).

/// Calibration factor between face-box diagonal and distance
pub const FACE_SIZE_CALIBRATION: f64 = 0.85;

/// Reference face diagonal (px) at unit distance
pub const FACE_SIZE_REFERENCE: f64 = 900.0;

pub const DISPLAY_DISTANCE_MIN: f64 = 30.0;
pub const DISPLAY_DISTANCE_MAX: f64 = 80.0;

/// Sliding window used for blink rate (ms)
pub const BLINK_WINDOW_MS: f64 = 60_000.0;

/// Estimate viewing distance (cm) from the detected face box.
///
/// Distance is inversely proportional to the box diagonal. `None` for an
/// empty or non-finite box.
pub fn estimate_distance_cm(face_width: f64, face_height: f64) -> Option<f64> {
    let diagonal = face_width.hypot(face_height);
    if !diagonal.is_finite() || diagonal <= 0.0 {
        return None;
    }
    Some(FACE_SIZE_CALIBRATION * (FACE_SIZE_REFERENCE / diagonal))
}

/// Clamp a distance reading into the displayable range
pub fn clamp_display_distance(distance: f64) -> f64 {
    distance.clamp(DISPLAY_DISTANCE_MIN, DISPLAY_DISTANCE_MAX)
}

/// Blink timestamps over the last minute.
#[derive(Debug, Clone)]
pub struct BlinkRateWindow {
    timestamps: Vec<f64>,
    window_ms: f64,
}

impl Default for BlinkRateWindow {
    fn default() -> Self {
        Self::new(BLINK_WINDOW_MS)
    }
}

impl BlinkRateWindow {
    pub fn new(window_ms: f64) -> Self {
        Self {
            timestamps: Vec::with_capacity(64),
            window_ms: if window_ms > 0.0 { window_ms } else { BLINK_WINDOW_MS },
        }
    }

    /// Record a blink at `timestamp` (ms)
    pub fn record_blink(&mut self, timestamp: f64) {
        self.timestamps.push(timestamp);
        self.prune(timestamp);
    }

    /// Blinks per minute over the window ending at `now` (ms)
    pub fn blink_rate(&mut self, now: f64) -> f64 {
        self.prune(now);
        self.timestamps.len() as f64 * (60_000.0 / self.window_ms)
    }

    pub fn blink_count(&self) -> usize {
        self.timestamps.len()
    }

    pub fn reset(&mut self) {
        self.timestamps.clear();
    }

    fn prune(&mut self, now: f64) {
        let cutoff = now - self.window_ms;
        self.timestamps.retain(|&t| t >= cutoff);
    }
}
