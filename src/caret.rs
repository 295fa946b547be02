//! Caret controller.
//!
//! The caret is a single logical cursor owned by the player. It sits at the
//! end of the active line, is as tall as the active font size, and blinks
//! unless glyphs are being typed. Surfaces only ever see a [`CaretState`]
//! snapshot and draw it where it says.

use std::time::Duration;

use crate::style::FontSize;
use crate::surface::LineHandle;

/// What a surface needs to draw the caret.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaretState {
    /// Line the caret trails; `None` before anything was typed.
    pub line: Option<LineHandle>,
    pub height: FontSize,
    pub visible: bool,
    /// Paused carets are solid and do not blink.
    pub paused: bool,
}

/// Blink and placement state for the caret.
#[derive(Debug, Clone)]
pub struct CaretController {
    state: CaretState,
    /// Time between visibility toggles (half the blink period).
    step: Duration,
    last_toggle: Duration,
}

impl CaretController {
    /// Full on/off cycle, two visibility steps per period.
    pub const DEFAULT_BLINK_PERIOD: Duration = Duration::from_millis(1000);

    pub fn new(blink_period: Duration) -> Self {
        Self {
            state: CaretState {
                line: None,
                height: FontSize::DEFAULT,
                visible: true,
                paused: false,
            },
            step: blink_period / 2,
            last_toggle: Duration::ZERO,
        }
    }

    pub fn state(&self) -> &CaretState {
        &self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state.paused
    }

    /// Stop blinking and show the caret solid.
    pub fn pause(&mut self) {
        self.state.paused = true;
        self.state.visible = true;
    }

    /// Restart blinking from a visible caret at `now`.
    pub fn resume(&mut self, now: Duration) {
        self.state.paused = false;
        self.state.visible = true;
        self.last_toggle = now;
    }

    /// Change the blink period. Takes effect from the next toggle.
    pub fn set_blink_period(&mut self, period: Duration) {
        self.step = period / 2;
    }

    pub fn set_height(&mut self, height: FontSize) {
        self.state.height = height;
    }

    /// Move the caret to the end of `line`.
    pub fn move_to(&mut self, line: LineHandle) {
        self.state.line = Some(line);
    }

    /// Advance the blink animation to `now`. Returns true when visibility
    /// changed.
    pub fn tick(&mut self, now: Duration) -> bool {
        if self.state.paused
            || self.step.is_zero()
            || now < self.last_toggle.saturating_add(self.step)
        {
            return false;
        }
        let steps = (now - self.last_toggle).as_nanos() / self.step.as_nanos();
        // steps >= 1 here; at most u32::MAX steps are accounted for at once
        let whole = u32::try_from(steps).unwrap_or(u32::MAX);
        self.last_toggle = self
            .last_toggle
            .saturating_add(self.step.saturating_mul(whole));
        if steps % 2 == 1 {
            self.state.visible = !self.state.visible;
            true
        } else {
            false
        }
    }

    /// When the next blink toggle is due, if the caret is blinking.
    pub fn next_toggle(&self) -> Option<Duration> {
        if self.state.paused || self.step.is_zero() {
            None
        } else {
            Some(self.last_toggle.saturating_add(self.step))
        }
    }
}

impl Default for CaretController {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BLINK_PERIOD)
    }
}
