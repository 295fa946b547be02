//! Shared helpers for integration tests

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use tempfile::TempDir;
use typewrite::{ManualClock, RecordingSurface, Timing, Typewriter};

pub type TestWriter = Typewriter<RecordingSurface<ManualClock>, ManualClock>;

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// A typewriter recording onto a virtual clock, plus a handle to that clock.
pub fn recording_writer(typing_ms: u64, backspace_ms: u64) -> (TestWriter, ManualClock) {
    let clock = ManualClock::new();
    let writer = Typewriter::with_timing(
        RecordingSurface::new(clock.clone()),
        clock.clone(),
        Timing::new(ms(typing_ms), ms(backspace_ms)),
    );
    (writer, clock)
}

/// Move the clock through every deadline up to `until`, pumping at each.
pub fn run_until(writer: &mut TestWriter, clock: &ManualClock, until: Duration) {
    writer.pump();
    while let Some(deadline) = writer.next_deadline() {
        if deadline > until {
            break;
        }
        clock.set(deadline);
        writer.pump();
    }
    clock.set(until);
    writer.pump();
}

/// Get the demos directory path.
pub fn demos_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos")
}

/// Write `content` as a script in a fresh temp dir.
///
/// Returns the temp dir (keep it alive) and the script path.
pub fn temp_script(content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("script.toml");
    fs::write(&path, content).unwrap();
    (dir, path)
}
