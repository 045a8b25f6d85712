//! The sampling loops for both operating modes.
//!
//! Both loops busy-spin on purpose: the derived frequency is only as good
//! as the achievable poll rate, so there is no sleeping or blocking inside
//! the hot loop. Termination conditions are checked once per iteration,
//! between complete poll passes, so the final pass before exit is always
//! fully counted.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{execute, queue};
use pinfreq_core::interrupt::{self, InterruptedError};
use pinfreq_core::report::{self, LineReport};
use pinfreq_core::sampler::Sampler;
use pinfreq_core::source::LineSource;
use pinfreq_core::window::Window;
use tracing::debug;

use crate::terminal::RawModeGuard;

/// Refresh interval for the continuous table.
const UPDATE_INTERVAL: Duration = Duration::from_millis(100);

/// 0-based terminal row of the first data row, just below the header block.
const FIRST_DATA_ROW: u16 = 5;

const TABLE_HEADING: &str = "Pin | Frequency (kHz) | Status";
const TABLE_RULE: &str = "----|-----------------|--------";

/// Runs the live-refreshing monitor until a keypress or interrupt.
///
/// The terminal is put into raw mode for keypress detection; the guard
/// restores it on every exit path, including read failures. A clean stop
/// clears the table and prints a farewell once the terminal is back in
/// canonical mode; errors leave the screen alone so the chain stays
/// readable.
pub fn continuous(source: &impl LineSource) -> Result<()> {
    let guard = RawModeGuard::acquire()?;
    let result = refresh_loop(source);
    drop(guard);

    if result.is_ok() {
        farewell(&mut io::stdout())?;
    }
    result
}

/// The raw-mode part of continuous mode: header, hot loop, in-place redraws.
fn refresh_loop(source: &impl LineSource) -> Result<()> {
    let mut out = io::stdout();
    execute!(out, Clear(ClearType::All), MoveTo(0, 0)).context("clear screen")?;
    write!(out, "GPIO Frequency Monitor - Real Time\r\n")?;
    write!(out, "Press Ctrl+C or any key to exit\r\n")?;
    write!(out, "===================================\r\n")?;
    write!(out, "{TABLE_HEADING}\r\n")?;
    write!(out, "{TABLE_RULE}\r\n")?;
    out.flush().context("write header")?;

    let mut sampler = Sampler::new(source.line_count());
    let mut window = Window::new(UPDATE_INTERVAL);

    loop {
        if interrupt::is_interrupted() || key_pressed()? {
            debug!("continuous monitor stopping");
            return Ok(());
        }

        sampler.poll_once(source)?;

        if window.is_expired() {
            let rows = report::build_report(&sampler, window.target_seconds());
            redraw(&mut out, &rows)?;
            sampler.reset_flips();
            window.restart();
        }
    }
}

/// Runs one fixed-length measurement and prints a single report.
///
/// Flip counts accumulate over the entire run with no intermediate reset;
/// an interrupt before the window closes invalidates the run.
pub fn bounded(source: &impl LineSource, duration: Duration) -> Result<()> {
    println!(
        "GPIO Frequency Monitor - Measuring for {} ms",
        duration.as_millis()
    );
    println!("============================================");
    println!("{TABLE_HEADING}");
    println!("{TABLE_RULE}");

    let mut sampler = Sampler::new(source.line_count());
    let window = Window::new(duration);

    loop {
        if interrupt::is_interrupted() {
            return Err(InterruptedError.into());
        }
        if window.is_expired() {
            break;
        }
        sampler.poll_once(source)?;
    }

    let rows = report::build_report(&sampler, window.target_seconds());
    println!();
    for row in &rows {
        println!("{}", row.row());
    }
    debug!("bounded measurement complete");
    Ok(())
}

/// Clears the table and leaves a farewell on a clean continuous-mode stop.
/// Runs after raw mode is restored, so plain newlines are fine.
fn farewell(out: &mut impl Write) -> Result<()> {
    execute!(out, Clear(ClearType::All), MoveTo(0, 0)).context("clear screen")?;
    writeln!(out, "Exiting...")?;
    out.flush().context("write farewell")?;
    Ok(())
}

/// Non-blocking check for any key press on stdin (requires raw mode).
fn key_pressed() -> Result<bool> {
    if event::poll(Duration::ZERO).context("poll terminal events")?
        && let Event::Key(key) = event::read().context("read terminal event")?
    {
        return Ok(key.kind == KeyEventKind::Press);
    }
    Ok(false)
}

/// Overwrites the data rows in place: reposition to the first data row,
/// clear each stale line, write the fresh row, then a status line.
fn redraw(out: &mut impl Write, rows: &[LineReport]) -> Result<()> {
    queue!(out, MoveTo(0, FIRST_DATA_ROW)).context("reposition cursor")?;
    for row in rows {
        queue!(out, Clear(ClearType::UntilNewLine))?;
        write!(out, "{}\r\n", row.row())?;
    }
    queue!(out, Clear(ClearType::UntilNewLine))?;
    write!(
        out,
        "[Updating every {}ms, sampling continuously] - Press Ctrl+C to exit\r\n",
        UPDATE_INTERVAL.as_millis()
    )?;
    out.flush().context("write table")?;
    Ok(())
}
