//! Terminal surface: paints the canvas to an ANSI terminal.
//!
//! Lines are drawn as a block positioned by `align` (vertical) and
//! `justify` (horizontal). The caret is drawn after the last glyph of its
//! line. Painting happens on [`TerminalSurface::render`]; surface operations
//! only update the canvas and mark it dirty.

use std::io::{self, Write};

use unicode_width::UnicodeWidthChar;

use super::ansi::{push_style, RESET};
use super::{Align, Canvas, Justify, LayoutMode, LineHandle, Placement, RenderSurface};
use crate::caret::CaretState;
use crate::style::EffectiveStyle;

/// Caret glyph for fonts up to this many pixels.
const THIN_CARET_MAX_PX: f32 = 32.0;

/// Canvas plus terminal geometry and a dirty flag.
#[derive(Debug, Clone)]
pub struct TerminalSurface {
    canvas: Canvas,
    cols: u16,
    rows: u16,
    needs_render: bool,
}

impl TerminalSurface {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            canvas: Canvas::new(),
            cols,
            rows,
            needs_render: true,
        }
    }

    /// Size the surface to the current terminal, 80x24 when unknown.
    pub fn for_stdout() -> Self {
        let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
        Self::new(cols, rows)
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Columns and rows.
    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    pub fn needs_render(&self) -> bool {
        self.needs_render
    }

    /// Handle terminal resize.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.needs_render = true;
    }

    /// Paint the whole surface to `out` and clear the dirty flag.
    pub fn render<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let frame = self.frame();
        out.write_all(frame.as_bytes())?;
        out.flush()?;
        self.needs_render = false;
        Ok(())
    }

    /// Build the escape sequence for one full repaint.
    pub fn frame(&self) -> String {
        let rows = self.rows.max(1) as usize;
        let cols = self.cols as usize;
        let lines = self.canvas.lines();

        // Keep the newest lines when there are more than fit.
        let first = lines.len().saturating_sub(rows);
        let visible = &lines[first..];

        let top = match self.canvas.align().0 {
            Placement::Left => 0,
            Placement::Center => (rows - visible.len()) / 2,
            Placement::Right => rows - visible.len(),
        };

        let caret = self.canvas.caret().copied();
        let mut output = String::with_capacity(rows * cols * 2);
        output.push_str("\x1b[2J");

        for (offset, line) in visible.iter().enumerate() {
            let index = first + offset;
            let caret_here = caret.filter(|c| c.line == Some(LineHandle::new(index)));

            let mut width: usize = line
                .glyphs()
                .iter()
                .map(|glyph| glyph.ch.width().unwrap_or(0))
                .sum();
            if caret_here.is_some() {
                width += 1;
            }

            let left = match self.canvas.justify().0 {
                Placement::Left => 0,
                Placement::Center => cols.saturating_sub(width) / 2,
                Placement::Right => cols.saturating_sub(width),
            };

            output.push_str(&format!("\x1b[{};{}H", top + offset + 1, left + 1));

            let mut current: Option<&EffectiveStyle> = None;
            for glyph in line.glyphs() {
                if current != Some(&glyph.style) {
                    push_style(&glyph.style, &mut output);
                    current = Some(&glyph.style);
                }
                output.push(glyph.ch);
            }
            output.push_str(RESET);

            if let Some(caret) = caret_here {
                output.push(caret_glyph(&caret));
            }
        }

        output
    }
}

/// Glyph used for the caret in its current state.
fn caret_glyph(caret: &CaretState) -> char {
    if !caret.visible {
        ' '
    } else if caret.height.to_px() <= THIN_CARET_MAX_PX {
        '▏'
    } else {
        '▌'
    }
}

impl RenderSurface for TerminalSurface {
    fn set_layout(&mut self, layout: LayoutMode) {
        self.canvas.set_layout(layout);
    }

    fn open_line(&mut self, fragment: usize, style: &EffectiveStyle) -> LineHandle {
        self.needs_render = true;
        self.canvas.open_line(fragment, style)
    }

    fn append_glyph(&mut self, line: LineHandle, ch: char) {
        self.canvas.append_glyph(line, ch);
        self.needs_render = true;
    }

    fn remove_last_glyph(&mut self, line: LineHandle) -> bool {
        let removed = self.canvas.remove_last_glyph(line);
        self.needs_render |= removed;
        removed
    }

    fn place_caret(&mut self, caret: &CaretState) {
        if self.canvas.caret() != Some(caret) {
            self.canvas.place_caret(caret);
            self.needs_render = true;
        }
    }

    fn set_position(&mut self, align: Align, justify: Justify) {
        self.canvas.set_position(align, justify);
        self.needs_render = true;
    }

    fn glyph_count(&self, line: LineHandle) -> usize {
        self.canvas.glyph_count(line)
    }

    fn line_count(&self) -> usize {
        self.canvas.line_count()
    }
}
