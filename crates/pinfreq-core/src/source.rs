//! Line source abstraction and the GPIO character-device backend.
//!
//! The sampler only needs two things from the hardware: how many lines it
//! owns and a synchronous boolean read per line. `LineSource` captures that
//! seam so the hot loop can be exercised in tests without a GPIO chip.

use std::path::Path;

use anyhow::{Context, Result};
use gpiocdev::Request;
use gpiocdev::line::Value;
use tracing::debug;

/// Synchronous access to a fixed bank of digital input lines.
///
/// Implementations own the underlying line grant for the process lifetime
/// and release it on drop. A failed read is fatal to the caller; there is
/// no retry policy.
pub trait LineSource {
    /// Number of lines held by this source. Lines are addressed by offset
    /// `0..line_count()`.
    fn line_count(&self) -> usize;

    /// Reads the current logic level of the line at `offset`.
    fn read_level(&self, offset: u32) -> Result<bool>;
}

/// Input lines requested from a GPIO character device (`/dev/gpiochipN`).
///
/// Lines are requested once at construction and released when the value is
/// dropped, including on error and interrupt exit paths.
#[derive(Debug)]
pub struct GpioSource {
    request: Request,
    line_count: usize,
}

impl GpioSource {
    /// Consumer label shown in `gpioinfo` while the lines are held.
    pub const CONSUMER: &'static str = "pinfreq";

    /// Requests `line_count` input lines (offsets `0..line_count`) from the
    /// chip at `chip_path`.
    ///
    /// # Errors
    /// Returns an error if the line count does not fit the u32 offset
    /// space, if the chip cannot be opened, or if the line request is
    /// refused (missing device, permissions, lines already claimed).
    pub fn open(chip_path: &Path, line_count: usize) -> Result<Self> {
        let last_offset = u32::try_from(line_count)
            .with_context(|| format!("line count {line_count} exceeds the offset range"))?;
        let offsets: Vec<u32> = (0..last_offset).collect();

        let request = Request::builder()
            .on_chip(chip_path)
            .with_consumer(Self::CONSUMER)
            .with_lines(&offsets)
            .as_input()
            .request()
            .with_context(|| {
                format!(
                    "request {line_count} input lines on {} (may need permissions for the gpio group or root)",
                    chip_path.display()
                )
            })?;

        debug!(chip = %chip_path.display(), line_count, "requested GPIO input lines");

        Ok(Self {
            request,
            line_count,
        })
    }
}

impl LineSource for GpioSource {
    fn line_count(&self) -> usize {
        self.line_count
    }

    fn read_level(&self, offset: u32) -> Result<bool> {
        let value = self
            .request
            .value(offset)
            .with_context(|| format!("read line {offset}"))?;
        Ok(value == Value::Active)
    }
}
