//! Player state management
//!
//! Contains the inspectable `PlayerState` the scheduler mutates, plus the
//! value types that configure a playback session.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::scheduler::SessionId;
use crate::surface::{LayoutMode, LineHandle};

/// Where the player is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Nothing has been played yet.
    #[default]
    Idle,
    /// Glyphs of the current fragment are being appended.
    Typing,
    /// Typing finished; waiting one beat before backspacing.
    Dwelling,
    /// Glyphs of the current fragment are being removed.
    Backspacing,
    /// Waiting for (or performing) the move to the next fragment.
    Advancing,
    /// The session ended or was stopped; nothing is scheduled.
    Stopped,
}

/// Options for one `play` invocation, reused unchanged by every step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaybackOptions {
    /// Loop back to the first fragment after the last one.
    pub continuous: bool,
    /// Erase each fragment after typing it.
    pub backspace: bool,
    /// Give each fragment its own line instead of sharing one.
    pub new_line: bool,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            continuous: false,
            backspace: false,
            new_line: true,
        }
    }
}

/// Typing and backspacing speeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    typing_speed: Duration,
    backspace_speed: Duration,
}

impl Timing {
    /// Typing speed floor. A zero speed would let a looping session
    /// schedule its next step at the instant it is already processing.
    pub const MIN_TYPING_SPEED: Duration = Duration::from_millis(1);
    pub const DEFAULT_TYPING_SPEED: Duration = Duration::from_millis(250);
    pub const DEFAULT_BACKSPACE_SPEED: Duration = Duration::from_millis(125);

    pub fn new(typing_speed: Duration, backspace_speed: Duration) -> Self {
        Self {
            typing_speed: typing_speed.max(Self::MIN_TYPING_SPEED),
            backspace_speed,
        }
    }

    /// Delay between appended glyphs, and the dwell/advance beat.
    pub fn typing_speed(&self) -> Duration {
        self.typing_speed
    }

    /// Delay between removed glyphs.
    pub fn backspace_speed(&self) -> Duration {
        self.backspace_speed
    }

    pub fn set_typing_speed(&mut self, speed: Duration) {
        self.typing_speed = speed.max(Self::MIN_TYPING_SPEED);
    }

    pub fn set_backspace_speed(&mut self, speed: Duration) {
        self.backspace_speed = speed;
    }

    /// Time spent typing `len` glyphs.
    pub fn typing_duration(&self, len: usize) -> Duration {
        times(self.typing_speed, len)
    }

    /// Time from the start of a fragment's step to its advance.
    ///
    /// `typing·len + typing` without backspacing,
    /// `typing·len + backspace·len + typing` with it.
    pub fn fragment_duration(&self, len: usize, backspace: bool) -> Duration {
        let erase = if backspace {
            times(self.backspace_speed, len)
        } else {
            Duration::ZERO
        };
        self.typing_duration(len)
            .saturating_add(erase)
            .saturating_add(self.typing_speed)
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TYPING_SPEED, Self::DEFAULT_BACKSPACE_SPEED)
    }
}

/// `speed * n`, saturating.
pub(crate) fn times(speed: Duration, n: usize) -> Duration {
    speed.saturating_mul(u32::try_from(n).unwrap_or(u32::MAX))
}

/// `d` in whole milliseconds, saturating at `u64::MAX`.
pub(crate) fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Where the step of the current fragment began on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepStart {
    pub line: LineHandle,
    /// Glyphs on `line` before the fragment typed anything.
    pub glyphs: usize,
}

/// Central playback state.
///
/// Mutated only by the player's own scheduling steps; exposed read-only so
/// callers and tests can assert on transitions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlayerState {
    /// Fragment being played, `0..=queue.len()`.
    pub current_index: usize,
    pub phase: Phase,
    /// Token of the active session; actions of older sessions are ignored.
    pub session: SessionId,
    /// Layout fixed by the first play, never changed afterwards.
    pub layout: Option<LayoutMode>,
    /// Options of the active session.
    pub options: Option<PlaybackOptions>,
    /// How many times playback wrapped back to the first fragment.
    pub cycles: usize,
    /// Fragments fully played (typed, erased if requested, advanced past).
    pub fragments_completed: usize,
    /// Set while the current fragment's step is in progress.
    pub step_start: Option<StepStart>,
}

impl PlayerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while actions of the current session may still fire.
    pub fn is_active(&self) -> bool {
        !matches!(self.phase, Phase::Idle | Phase::Stopped)
    }
}
