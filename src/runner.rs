//! Real-time playback loop.
//!
//! The only place that touches wall-clock time: it pumps the typewriter,
//! repaints the terminal surface when it changed and sleeps until the next
//! deadline. Ctrl-C only flips a flag the loop polls.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::execute;
use crossterm::terminal::{self, Clear, ClearType};

use crate::player::{PlaybackOptions, Typewriter};
use crate::scheduler::Clock;
use crate::surface::TerminalSurface;

/// Longest sleep between wake-ups, so interrupts and resizes are noticed.
const MAX_SLEEP: Duration = Duration::from_millis(50);

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// A non-looping session typed its last fragment.
    Finished,
    /// Ctrl-C stopped the session.
    Interrupted,
}

/// Shows the cursor again however the loop exits.
struct CursorGuard;

impl CursorGuard {
    fn hide() -> io::Result<Self> {
        execute!(io::stdout(), Hide, Clear(ClearType::All))?;
        Ok(Self)
    }
}

impl Drop for CursorGuard {
    fn drop(&mut self) {
        let rows = terminal::size().map(|(_, rows)| rows).unwrap_or(24);
        let _ = execute!(io::stdout(), MoveTo(0, rows.saturating_sub(1)), Show);
        let _ = writeln!(io::stdout());
    }
}

/// Play on the current terminal until the session finishes or Ctrl-C.
#[cfg(not(tarpaulin_include))]
pub fn run_in_terminal<C: Clock>(
    writer: &mut Typewriter<TerminalSurface, C>,
    options: PlaybackOptions,
) -> Result<RunOutcome> {
    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupted);
    ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))
        .context("Failed to install Ctrl-C handler")?;

    let _guard = CursorGuard::hide().context("Failed to prepare terminal")?;
    let mut stdout = io::stdout();
    drive(writer, options, &mut stdout, &interrupted, || {
        terminal::size().ok()
    })
}

/// The playback loop, independent of the real terminal.
///
/// `size` reports the current terminal size, if known; a change triggers a
/// full repaint.
pub fn drive<C, W, F>(
    writer: &mut Typewriter<TerminalSurface, C>,
    options: PlaybackOptions,
    out: &mut W,
    interrupted: &AtomicBool,
    mut size: F,
) -> Result<RunOutcome>
where
    C: Clock,
    W: Write,
    F: FnMut() -> Option<(u16, u16)>,
{
    writer.play(options)?;

    loop {
        if interrupted.load(Ordering::SeqCst) {
            writer.stop();
            writer
                .surface_mut()
                .render(out)
                .context("Failed to draw frame")?;
            tracing::info!("playback interrupted");
            return Ok(RunOutcome::Interrupted);
        }

        if let Some((cols, rows)) = size() {
            let surface = writer.surface_mut();
            if surface.size() != (cols, rows) {
                surface.resize(cols, rows);
            }
        }

        writer.pump();
        if writer.surface().needs_render() {
            writer
                .surface_mut()
                .render(out)
                .context("Failed to draw frame")?;
        }

        if writer.is_finished() {
            return Ok(RunOutcome::Finished);
        }

        let now = writer.clock().now();
        let wait = writer
            .next_deadline()
            .map_or(MAX_SLEEP, |deadline| deadline.saturating_sub(now))
            .min(MAX_SLEEP);
        if !wait.is_zero() {
            thread::sleep(wait);
        }
    }
}
