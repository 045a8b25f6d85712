//! CLI entry and dispatch.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use pinfreq_core::interrupt;
use pinfreq_core::source::GpioSource;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::monitor;

/// Number of lines sampled when `--lines` is not given (a full Raspberry Pi
/// header bank).
const DEFAULT_LINE_COUNT: usize = 28;

#[derive(Parser)]
#[command(name = "pinfreq")]
#[command(version = "0.1")]
#[command(about = "GPIO line toggle-frequency monitor")]
#[command(
    long_about = "Samples a bank of GPIO input lines in a tight loop, counts logic-level \
                  transitions, and reports an estimated toggle frequency per line.\n\n\
                  Without a duration the table refreshes in place every 100 ms until a key \
                  is pressed; with a duration the tool measures once over the whole run and \
                  prints a single report."
)]
struct Cli {
    /// Run duration in milliseconds; omit to run continuously
    #[arg(value_name = "DURATION_MS", allow_hyphen_values = true)]
    duration_ms: Option<String>,

    /// GPIO character device to sample
    #[arg(long, default_value = "/dev/gpiochip0", value_name = "PATH")]
    chip: PathBuf,

    /// Number of input lines to request, offsets 0..N
    #[arg(long, default_value_t = DEFAULT_LINE_COUNT, value_name = "N")]
    lines: usize,
}

/// The operating mode, fixed for the process lifetime.
#[derive(Debug)]
enum Mode {
    /// Refresh the table every interval until interrupted.
    Continuous,
    /// Accumulate over one window, print once, exit.
    Bounded(Duration),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Configuration validation happens before any hardware is touched.
    let mode = parse_mode(cli.duration_ms.as_deref())?;
    if cli.lines == 0 {
        bail!("Invalid line count: 0. Must request at least one line.");
    }

    interrupt::init();

    let source = GpioSource::open(&cli.chip, cli.lines)
        .with_context(|| format!("open GPIO chip {}", cli.chip.display()))?;

    match mode {
        Mode::Continuous => {
            debug!("starting continuous monitor");
            monitor::continuous(&source)
        }
        Mode::Bounded(duration) => {
            debug!(?duration, "starting bounded measurement");
            monitor::bounded(&source, duration)
        }
    }
}

fn parse_mode(duration_ms: Option<&str>) -> Result<Mode> {
    let Some(raw) = duration_ms else {
        return Ok(Mode::Continuous);
    };
    let parsed = raw.parse::<i64>().unwrap_or(0);
    if parsed <= 0 {
        bail!("Invalid duration: {raw}. Must be a positive number of milliseconds.");
    }
    Ok(Mode::Bounded(Duration::from_millis(parsed as u64)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mode_absent_is_continuous() {
        assert!(matches!(parse_mode(None), Ok(Mode::Continuous)));
    }

    #[test]
    fn test_parse_mode_positive_duration() {
        match parse_mode(Some("1000")) {
            Ok(Mode::Bounded(d)) => assert_eq!(d, Duration::from_millis(1000)),
            _ => panic!("expected bounded mode"),
        }
    }

    #[test]
    fn test_parse_mode_rejects_zero_and_negative() {
        assert!(parse_mode(Some("0")).is_err());
        assert!(parse_mode(Some("-5")).is_err());
    }

    #[test]
    fn test_parse_mode_rejects_non_numeric() {
        let err = parse_mode(Some("soon")).unwrap_err();
        assert!(err.to_string().contains("Invalid duration: soon"));
    }
}
