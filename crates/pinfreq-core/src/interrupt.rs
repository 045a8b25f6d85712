use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);
static RESTORE_HOOK: OnceLock<Box<dyn Fn() + Send + Sync>> = OnceLock::new();

/// Raised when a bounded run is cut short before its report.
#[derive(Debug)]
pub struct InterruptedError;

impl std::fmt::Display for InterruptedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Interrupted")
    }
}

impl std::error::Error for InterruptedError {}

/// Initializes the Ctrl+C handler.
///
/// The handler sets an interrupt flag only; it does not print anything.
/// The monitor loop observes the flag between poll passes and runs the
/// orderly shutdown path itself.
///
/// Also registers SIGTERM and SIGHUP handlers: like Ctrl+C, these request
/// a clean exit from the sampling loop.
///
/// # Panics
/// Panics if registering the Ctrl+C handler fails.
pub fn init() {
    ctrlc::set_handler(move || {
        trigger_ctrl_c();
    })
    .expect("Error setting Ctrl+C handler");

    // Register SIGTERM and SIGHUP to set the same flag.
    // These are catchable signals (unlike SIGKILL) that should cause a clean exit.
    #[cfg(unix)]
    {
        use signal_hook::consts::{SIGHUP, SIGTERM};

        // SAFETY: These closures only set an AtomicBool, which is async-signal-safe.
        unsafe {
            signal_hook::low_level::register(SIGTERM, || {
                INTERRUPTED.store(true, Ordering::SeqCst);
            })
            .expect("Error registering SIGTERM handler");
            signal_hook::low_level::register(SIGHUP, || {
                INTERRUPTED.store(true, Ordering::SeqCst);
            })
            .expect("Error registering SIGHUP handler");
        }
    }
}

/// Triggers an interrupt via Ctrl+C, force-exiting on a second Ctrl+C.
pub fn trigger_ctrl_c() {
    if INTERRUPTED.swap(true, Ordering::SeqCst) {
        // Second interrupt - force exit.
        // Restore terminal first since process::exit() bypasses Drop handlers.
        if let Some(hook) = RESTORE_HOOK.get() {
            hook();
        }
        std::process::exit(130);
    }
}

/// Checks if an interrupt has been requested.
pub fn is_interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Registers a restore hook called on the second Ctrl+C before exit.
///
/// Used by the CLI to restore terminal state.
pub fn set_restore_hook<F>(hook: F)
where
    F: Fn() + Send + Sync + 'static,
{
    let _ = RESTORE_HOOK.set(Box::new(hook));
}
