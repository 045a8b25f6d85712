//! Terminal lifecycle management.
//!
//! Continuous mode owns the terminal: raw mode for keypress detection plus
//! in-place redraws. Raw mode is guaranteed to be restored on:
//! - Normal exit (via Drop)
//! - Ctrl+C signal (interrupt restore hook)
//! - Panic

use std::panic;

use anyhow::{Context, Result};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

/// Scoped raw-mode acquisition.
///
/// Raw mode is entered on construction and left when the guard drops, so
/// every return path out of the monitor loop restores the terminal.
pub struct RawModeGuard;

impl RawModeGuard {
    /// Enables raw mode and registers the restore paths that bypass Drop
    /// (panic, second Ctrl+C).
    ///
    /// # Errors
    /// Returns an error if raw mode cannot be enabled (e.g. stdin is not a
    /// TTY).
    pub fn acquire() -> Result<Self> {
        install_panic_hook();
        pinfreq_core::interrupt::set_restore_hook(|| {
            let _ = disable_raw_mode();
        });
        enable_raw_mode().context("Failed to enable raw mode")?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

/// Restores terminal state.
///
/// This function is idempotent and safe to call multiple times.
///
/// # Errors
/// Returns an error if the operation fails.
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal first so the panic message is readable
        let _ = restore_terminal();
        // Then call the original panic hook
        original_hook(panic_info);
    }));
}
