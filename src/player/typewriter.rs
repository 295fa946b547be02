//! The playback scheduler.
//!
//! `Typewriter` owns the queue, the global style, the caret and a surface.
//! `play` enters a *step* for the current fragment: it resolves the style,
//! opens the line, and places every action of that fragment on the timeline
//! at an absolute offset from the step's start time `t0`:
//!
//! ```text
//! append k        t0 + k·typing                     (k = 0..len)
//! typing done     t0 + len·typing                   caret resumes
//! dwell done      t0 + len·typing + typing          (backspace only)
//! remove k        t0 + len·typing + typing + k·bs   (backspace only)
//! advance         t0 + len·typing + [len·bs] + typing
//! ```
//!
//! The advance increments the index and enters the next step with the
//! advance's own timestamp as its `t0`. Whether to stop or wrap is decided
//! only when a step is entered, so every step reads a valid fragment.

use std::time::Duration;

use tracing::{debug, error, info, warn};

use super::state::{millis, times, Phase, PlaybackOptions, PlayerState, StepStart, Timing};
use crate::caret::CaretController;
use crate::error::{Result, TypewriterError};
use crate::queue::ExpressionQueue;
use crate::scheduler::{Clock, SystemClock, Timeline};
use crate::style::{resolve, validate_font_family, Color, FontSize, StyleRecord};
use crate::surface::{Align, Justify, LayoutMode, LineHandle, RenderSurface, TerminalSurface};

/// One scheduled unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    Append {
        index: usize,
        offset: usize,
        line: LineHandle,
    },
    TypingDone {
        index: usize,
    },
    DwellDone {
        index: usize,
    },
    Remove {
        index: usize,
        line: LineHandle,
    },
    Advance {
        index: usize,
    },
}

impl Action {
    fn fragment_index(&self) -> usize {
        match *self {
            Self::Append { index, .. }
            | Self::TypingDone { index }
            | Self::DwellDone { index }
            | Self::Remove { index, .. }
            | Self::Advance { index } => index,
        }
    }
}

/// A typewriter animation bound to a surface and a clock.
#[derive(Debug)]
pub struct Typewriter<S: RenderSurface, C: Clock> {
    queue: ExpressionQueue,
    global: StyleRecord,
    timing: Timing,
    caret: CaretController,
    surface: S,
    clock: C,
    timeline: Timeline<Action>,
    state: PlayerState,
}

impl Typewriter<TerminalSurface, SystemClock> {
    /// A typewriter painting to the current terminal in real time.
    pub fn for_terminal() -> Self {
        Self::new(TerminalSurface::for_stdout(), SystemClock::new())
    }
}

impl<S: RenderSurface, C: Clock> Typewriter<S, C> {
    pub fn new(surface: S, clock: C) -> Self {
        Self::with_timing(surface, clock, Timing::default())
    }

    pub fn with_timing(surface: S, clock: C, timing: Timing) -> Self {
        Self {
            queue: ExpressionQueue::new(),
            global: StyleRecord::global_default(),
            timing,
            caret: CaretController::default(),
            surface,
            clock,
            timeline: Timeline::new(),
            state: PlayerState::new(),
        }
    }

    // === Queue and style ===

    /// Enqueue a fragment. Its style override is validated now, not when it
    /// is rendered.
    pub fn add_text(&mut self, text: impl Into<String>, style: Option<StyleRecord>) -> Result<()> {
        self.queue.push(text, style)
    }

    /// Copy every field set in `style` into the global default.
    pub fn set_font(&mut self, style: StyleRecord) -> Result<()> {
        style.validate()?;
        self.global.merge(&style);
        Ok(())
    }

    pub fn set_font_size(&mut self, size: &str) -> Result<()> {
        let size: FontSize = size.parse()?;
        self.global.font_size = Some(size);
        Ok(())
    }

    pub fn set_font_family(&mut self, family: &str) -> Result<()> {
        validate_font_family(family)?;
        self.global.font_family = Some(family.to_string());
        Ok(())
    }

    pub fn set_color(&mut self, color: &str) -> Result<()> {
        let color: Color = color.parse()?;
        self.global.color = Some(color);
        Ok(())
    }

    pub fn bold(&mut self) -> &mut Self {
        self.global.bold = Some(true);
        self
    }

    pub fn italic(&mut self) -> &mut Self {
        self.global.italic = Some(true);
        self
    }

    pub fn underline(&mut self) -> &mut Self {
        self.global.underline = Some(true);
        self
    }

    pub fn strikethrough(&mut self) -> &mut Self {
        self.global.strikethrough = Some(true);
        self
    }

    /// Place the block of lines on the surface.
    pub fn position(&mut self, align: Align, justify: Justify) {
        self.surface.set_position(align, justify);
    }

    // === Timing ===

    /// Applies to steps entered after the call.
    pub fn set_typing_speed(&mut self, speed: Duration) {
        self.timing.set_typing_speed(speed);
    }

    /// Applies to steps entered after the call.
    pub fn set_backspace_speed(&mut self, speed: Duration) {
        self.timing.set_backspace_speed(speed);
    }

    pub fn set_blink_period(&mut self, period: Duration) {
        self.caret.set_blink_period(period);
    }

    /// Time for one pass over the whole queue with `options`.
    pub fn cycle_duration(&self, options: &PlaybackOptions) -> Duration {
        self.queue
            .iter()
            .map(|fragment| {
                self.timing
                    .fragment_duration(fragment.len(), options.backspace)
            })
            .fold(Duration::ZERO, Duration::saturating_add)
    }

    // === Accessors ===

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn queue(&self) -> &ExpressionQueue {
        &self.queue
    }

    pub fn global_style(&self) -> &StyleRecord {
        &self.global
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    pub fn caret(&self) -> &CaretController {
        &self.caret
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Number of actions waiting on the timeline.
    pub fn pending_actions(&self) -> usize {
        self.timeline.len()
    }

    /// Earliest time anything is due: a scheduled action or a caret blink.
    pub fn next_deadline(&self) -> Option<Duration> {
        let blink = self.caret_placed().then(|| self.caret.next_toggle()).flatten();
        match (self.timeline.next_deadline(), blink) {
            (Some(action), Some(blink)) => Some(action.min(blink)),
            (action, blink) => action.or(blink),
        }
    }

    /// True once a session has ended and nothing is left to fire.
    pub fn is_finished(&self) -> bool {
        self.state.phase == Phase::Stopped && self.timeline.is_empty()
    }

    // === Playback ===

    /// Start a playback session from the current index.
    ///
    /// Fails with `EmptyQueue` (and schedules nothing) when no fragments were
    /// added. Any actions still pending from a previous session are revoked,
    /// and a fragment it left half typed is cleared before being typed again.
    pub fn play(&mut self, options: PlaybackOptions) -> Result<()> {
        if self.queue.is_empty() {
            warn!("play called with an empty queue; nothing scheduled");
            return Err(TypewriterError::EmptyQueue);
        }

        let revoked = self.timeline.cancel(self.state.session);
        if revoked > 0 {
            debug!(revoked, "revoked actions of the previous session");
        }
        self.rewind_step();
        self.state.session = self.state.session.next();
        self.state.options = Some(options);
        info!(
            session = self.state.session.get(),
            from = self.state.current_index,
            fragments = self.queue.len(),
            continuous = options.continuous,
            backspace = options.backspace,
            new_line = options.new_line,
            "playback session started"
        );

        let t0 = self.clock.now();
        if let Err(err) = self.step(t0) {
            let index = self.state.current_index;
            self.abort(&err, index);
            return Err(err);
        }
        Ok(())
    }

    /// Fire every action due by now, then advance the caret blink.
    ///
    /// Returns the number of actions fired. A failing action is logged and
    /// stops the session; it is never returned to the caller.
    pub fn pump(&mut self) -> usize {
        let now = self.clock.now();
        let mut fired = 0;

        while let Some(entry) = self.timeline.pop_due(now) {
            if entry.session != self.state.session {
                continue;
            }
            fired += 1;
            let index = entry.action.fragment_index();
            if let Err(err) = self.execute(entry.action, entry.at) {
                self.abort(&err, index);
                break;
            }
        }

        if self.caret_placed() && self.caret.tick(now) {
            self.surface.place_caret(self.caret.state());
        }
        fired
    }

    /// Revoke everything the current session scheduled and stop.
    ///
    /// Returns the number of actions revoked.
    pub fn stop(&mut self) -> usize {
        let revoked = self.halt();
        info!(
            session = self.state.session.get(),
            revoked, "playback stopped"
        );
        revoked
    }

    /// Stop and hand the surface back.
    pub fn destroy(mut self) -> S {
        self.stop();
        self.surface
    }

    fn halt(&mut self) -> usize {
        let revoked = self.timeline.cancel(self.state.session);
        self.state.phase = Phase::Stopped;
        self.caret.resume(self.clock.now());
        if self.caret_placed() {
            self.surface.place_caret(self.caret.state());
        }
        revoked
    }

    /// Put the current fragment's line back to how its step found it.
    fn rewind_step(&mut self) {
        let Some(start) = self.state.step_start.take() else {
            return;
        };
        let mut cleared = 0;
        while self.surface.glyph_count(start.line) > start.glyphs {
            if !self.surface.remove_last_glyph(start.line) {
                break;
            }
            cleared += 1;
        }
        if cleared > 0 {
            debug!(
                fragment = self.state.current_index,
                cleared, "cleared interrupted fragment"
            );
        }
    }

    /// The caret only exists on the surface once a line was opened.
    fn caret_placed(&self) -> bool {
        self.caret.state().line.is_some()
    }

    fn abort(&mut self, err: &TypewriterError, index: usize) {
        error!(
            fragment = index,
            phase = ?self.state.phase,
            error = %err,
            "scheduled action failed; stopping session"
        );
        self.halt();
    }

    fn options(&self) -> PlaybackOptions {
        self.state.options.unwrap_or_default()
    }

    /// Enter the step for `current_index` at time `t0`.
    fn step(&mut self, t0: Duration) -> Result<()> {
        let options = self.options();

        if self.state.current_index >= self.queue.len() {
            if !options.continuous {
                self.state.phase = Phase::Stopped;
                self.caret.resume(t0);
                self.surface.place_caret(self.caret.state());
                info!(
                    fragments = self.state.fragments_completed,
                    "playback finished"
                );
                return Ok(());
            }
            self.state.current_index = 0;
            self.state.cycles += 1;
            debug!(cycles = self.state.cycles, "wrapped to first fragment");
        }

        if self.state.current_index == 0 && self.state.layout.is_none() {
            let layout = LayoutMode::from_new_line(options.new_line);
            self.state.layout = Some(layout);
            self.surface.set_layout(layout);
            debug!(?layout, "layout fixed");
        }

        let index = self.state.current_index;
        let fragment = self.queue.at(index)?;
        let len = fragment.len();
        let style = resolve(&self.global, fragment.style());

        let line = self.surface.open_line(index, &style);
        self.state.step_start = Some(StepStart {
            line,
            glyphs: self.surface.glyph_count(line),
        });
        self.caret.move_to(line);
        self.caret.set_height(style.font_size);
        self.caret.pause();
        self.surface.place_caret(self.caret.state());
        self.state.phase = Phase::Typing;

        let session = self.state.session;
        let typing = self.timing.typing_speed();
        let backspace = self.timing.backspace_speed();

        for offset in 0..len {
            self.timeline.schedule(
                t0.saturating_add(times(typing, offset)),
                session,
                Action::Append {
                    index,
                    offset,
                    line,
                },
            );
        }
        let typed = t0.saturating_add(self.timing.typing_duration(len));
        self.timeline
            .schedule(typed, session, Action::TypingDone { index });

        if options.backspace {
            let dwell_end = typed.saturating_add(typing);
            self.timeline
                .schedule(dwell_end, session, Action::DwellDone { index });
            for k in 0..len {
                self.timeline.schedule(
                    dwell_end.saturating_add(times(backspace, k)),
                    session,
                    Action::Remove { index, line },
                );
            }
        }

        let advance_at =
            t0.saturating_add(self.timing.fragment_duration(len, options.backspace));
        self.timeline
            .schedule(advance_at, session, Action::Advance { index });

        debug!(
            fragment = index,
            len,
            at_ms = millis(t0),
            advance_ms = millis(advance_at),
            "typing fragment"
        );
        Ok(())
    }

    fn execute(&mut self, action: Action, at: Duration) -> Result<()> {
        match action {
            Action::Append {
                index,
                offset,
                line,
            } => {
                let fragment = self.queue.at(index)?;
                let ch = fragment
                    .glyph(offset)
                    .ok_or(TypewriterError::IndexOutOfRange {
                        index: offset,
                        len: fragment.len(),
                    })?;
                self.surface.append_glyph(line, ch);
            }
            Action::TypingDone { .. } => {
                self.caret.resume(at);
                self.surface.place_caret(self.caret.state());
                self.state.phase = if self.options().backspace {
                    Phase::Dwelling
                } else {
                    Phase::Advancing
                };
            }
            Action::DwellDone { .. } => {
                self.state.phase = Phase::Backspacing;
            }
            Action::Remove { line, .. } => {
                self.surface.remove_last_glyph(line);
            }
            Action::Advance { index } => {
                self.state.phase = Phase::Advancing;
                self.state.fragments_completed += 1;
                self.state.step_start = None;
                self.state.current_index = index + 1;
                self.step(at)?;
            }
        }
        Ok(())
    }
}
