//! Monotonic measurement windows.
//!
//! Window boundaries come from `Instant` so wall-clock adjustments can
//! never stretch or shrink a measurement.

use std::time::{Duration, Instant};

/// A measurement window: a start instant plus a fixed target length.
///
/// Continuous mode restarts the same window every expiry; bounded mode uses
/// a single window covering the whole run.
#[derive(Debug, Clone, Copy)]
pub struct Window {
    started: Instant,
    target: Duration,
}

impl Window {
    /// Opens a window starting now.
    pub fn new(target: Duration) -> Self {
        Self {
            started: Instant::now(),
            target,
        }
    }

    /// True once the target length has elapsed.
    pub fn is_expired(&self) -> bool {
        self.started.elapsed() >= self.target
    }

    /// Restarts the window with start = now.
    pub fn restart(&mut self) {
        self.started = Instant::now();
    }

    /// The window's fixed length in seconds, used as the denominator for
    /// frequency derivation (the target, not the measured elapsed time).
    pub fn target_seconds(&self) -> f64 {
        self.target.as_secs_f64()
    }
}
