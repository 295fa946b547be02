//! A headless surface that remembers what happened and when.

use std::fmt::Write as _;
use std::time::Duration;

use super::{Align, Canvas, Justify, LayoutMode, LineHandle, RenderSurface};
use crate::caret::CaretState;
use crate::scheduler::Clock;
use crate::style::{EffectiveStyle, FontSize};

/// One surface operation.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Layout(LayoutMode),
    OpenLine {
        fragment: usize,
        line: LineHandle,
        style: EffectiveStyle,
    },
    Append {
        line: LineHandle,
        ch: char,
    },
    /// `ch` is `None` when the line was already empty.
    Remove {
        line: LineHandle,
        ch: Option<char>,
    },
    /// Caret moved, resized, paused or resumed. Blink toggles are not logged.
    Caret {
        line: Option<LineHandle>,
        height: FontSize,
        paused: bool,
    },
    Position {
        align: Align,
        justify: Justify,
    },
}

/// A surface operation with the time it happened.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceEvent {
    pub at: Duration,
    pub op: SurfaceOp,
}

/// Surface that applies operations to a [`Canvas`] and logs them.
#[derive(Debug)]
pub struct RecordingSurface<C: Clock> {
    canvas: Canvas,
    clock: C,
    events: Vec<SurfaceEvent>,
}

impl<C: Clock> RecordingSurface<C> {
    /// Record against `clock`, usually a clone of the player's clock.
    pub fn new(clock: C) -> Self {
        Self {
            canvas: Canvas::new(),
            clock,
            events: Vec::new(),
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn events(&self) -> &[SurfaceEvent] {
        &self.events
    }

    /// Number of glyph appends so far.
    pub fn appends(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event.op, SurfaceOp::Append { .. }))
            .count()
    }

    /// Number of glyph removals that actually removed something.
    pub fn removals(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event.op, SurfaceOp::Remove { ch: Some(_), .. }))
            .count()
    }

    /// Times at which glyphs were appended, in order.
    pub fn append_times(&self) -> Vec<Duration> {
        self.events
            .iter()
            .filter(|event| matches!(event.op, SurfaceOp::Append { .. }))
            .map(|event| event.at)
            .collect()
    }

    /// Times at which glyphs were removed, in order.
    pub fn removal_times(&self) -> Vec<Duration> {
        self.events
            .iter()
            .filter(|event| matches!(event.op, SurfaceOp::Remove { ch: Some(_), .. }))
            .map(|event| event.at)
            .collect()
    }

    /// Human-readable log, one operation per line.
    pub fn trace(&self) -> String {
        let mut out = String::new();
        for event in &self.events {
            let _ = writeln!(
                out,
                "[{:>5}ms] {}",
                event.at.as_millis(),
                describe(&event.op)
            );
        }
        out
    }

    fn record(&mut self, op: SurfaceOp) {
        self.events.push(SurfaceEvent {
            at: self.clock.now(),
            op,
        });
    }
}

fn describe(op: &SurfaceOp) -> String {
    match op {
        SurfaceOp::Layout(LayoutMode::Stacked) => "layout stacked".to_string(),
        SurfaceOp::Layout(LayoutMode::Inline) => "layout inline".to_string(),
        SurfaceOp::OpenLine {
            fragment,
            line,
            style,
        } => format!(
            "open line {} for fragment {} [{}]",
            line.index(),
            fragment,
            describe_style(style)
        ),
        SurfaceOp::Append { line, ch } => format!("type {:?} on line {}", ch, line.index()),
        SurfaceOp::Remove { line, ch: Some(ch) } => {
            format!("erase {:?} on line {}", ch, line.index())
        }
        SurfaceOp::Remove { line, ch: None } => format!("erase nothing on line {}", line.index()),
        SurfaceOp::Caret {
            line,
            height,
            paused,
        } => format!(
            "caret on {} {} {}",
            line.map_or_else(|| "no line".to_string(), |l| format!("line {}", l.index())),
            height,
            if *paused { "paused" } else { "blinking" }
        ),
        SurfaceOp::Position { align, justify } => {
            format!("position align={} justify={}", align.0, justify.0)
        }
    }
}

fn describe_style(style: &EffectiveStyle) -> String {
    let mut parts = vec![style.font_size.to_string()];
    if let Some(color) = style.color {
        parts.push(color.to_string());
    }
    if let Some(family) = &style.font_family {
        parts.push(family.clone());
    }
    for (on, name) in [
        (style.bold, "bold"),
        (style.italic, "italic"),
        (style.underline, "underline"),
        (style.strikethrough, "strikethrough"),
    ] {
        if on {
            parts.push(name.to_string());
        }
    }
    parts.join(" ")
}

impl<C: Clock> RenderSurface for RecordingSurface<C> {
    fn set_layout(&mut self, layout: LayoutMode) {
        self.canvas.set_layout(layout);
        self.record(SurfaceOp::Layout(layout));
    }

    fn open_line(&mut self, fragment: usize, style: &EffectiveStyle) -> LineHandle {
        let line = self.canvas.open_line(fragment, style);
        self.record(SurfaceOp::OpenLine {
            fragment,
            line,
            style: style.clone(),
        });
        line
    }

    fn append_glyph(&mut self, line: LineHandle, ch: char) {
        self.canvas.append_glyph(line, ch);
        self.record(SurfaceOp::Append { line, ch });
    }

    fn remove_last_glyph(&mut self, line: LineHandle) -> bool {
        let ch = self
            .canvas
            .line(line)
            .and_then(|l| l.glyphs().last())
            .map(|glyph| glyph.ch);
        let removed = self.canvas.remove_last_glyph(line);
        self.record(SurfaceOp::Remove { line, ch });
        removed
    }

    fn place_caret(&mut self, caret: &CaretState) {
        let changed = self.canvas.caret().map_or(true, |previous| {
            previous.line != caret.line
                || previous.height != caret.height
                || previous.paused != caret.paused
        });
        self.canvas.place_caret(caret);
        if changed {
            self.record(SurfaceOp::Caret {
                line: caret.line,
                height: caret.height,
                paused: caret.paused,
            });
        }
    }

    fn set_position(&mut self, align: Align, justify: Justify) {
        self.canvas.set_position(align, justify);
        self.record(SurfaceOp::Position { align, justify });
    }

    fn glyph_count(&self, line: LineHandle) -> usize {
        self.canvas.glyph_count(line)
    }

    fn line_count(&self) -> usize {
        self.canvas.line_count()
    }
}
