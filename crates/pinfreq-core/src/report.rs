//! Frequency derivation and table rows.
//!
//! Frequencies are derived, never stored: a window's flip count divided by
//! the window length, scaled to kHz. Note this is a *transition* rate — a
//! square wave has two flips per period, and the reported figure is not
//! halved to compensate.

use std::fmt;

use crate::sampler::Sampler;

/// Activity threshold in kHz (0.1 Hz). Strictly above is `Active`.
pub const ACTIVE_THRESHOLD_KHZ: f64 = 0.0001;

/// Whether a line saw a meaningful transition rate in the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Active,
    Inactive,
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Activity::Active => write!(f, "ACTIVE"),
            Activity::Inactive => write!(f, "inactive"),
        }
    }
}

/// Converts a window's flip count to kHz.
///
/// Zero flips short-circuit to exactly `0.0` so a degenerate window length
/// can never surface as a division artifact; `window_seconds` is otherwise
/// a fixed positive constant chosen at startup.
pub fn compute_khz(flips: u64, window_seconds: f64) -> f64 {
    if flips == 0 {
        return 0.0;
    }
    (flips as f64 / window_seconds) / 1000.0
}

/// Classifies a derived frequency. `Active` iff strictly above
/// [`ACTIVE_THRESHOLD_KHZ`].
pub fn classify(khz: f64) -> Activity {
    if khz > ACTIVE_THRESHOLD_KHZ {
        Activity::Active
    } else {
        Activity::Inactive
    }
}

/// One table row: a line's offset, derived frequency, and classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineReport {
    pub offset: u32,
    pub khz: f64,
    pub activity: Activity,
}

impl LineReport {
    /// Formats the row as `<offset> | <khz> | <status>` with the kHz value
    /// right-aligned to three decimal places.
    pub fn row(&self) -> String {
        format!("{:3} | {:14.3} | {}", self.offset, self.khz, self.activity)
    }
}

/// Derives a report row for every line from the sampler's current counters.
pub fn build_report(sampler: &Sampler, window_seconds: f64) -> Vec<LineReport> {
    (0..sampler.line_count())
        .map(|index| {
            let khz = compute_khz(sampler.flips(index), window_seconds);
            LineReport {
                offset: index as u32,
                khz,
                activity: classify(khz),
            }
        })
        .collect()
}
