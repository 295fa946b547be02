//! In-memory line model shared by the concrete surfaces.

use super::{Align, Justify, LayoutMode, LineHandle, RenderSurface};
use crate::caret::CaretState;
use crate::style::EffectiveStyle;

/// One typed character and the style it was typed with.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub ch: char,
    pub style: EffectiveStyle,
}

/// A container of glyphs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    glyphs: Vec<Glyph>,
    /// Style applied to glyphs appended from now on.
    style: EffectiveStyle,
}

impl Line {
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn style(&self) -> &EffectiveStyle {
        &self.style
    }

    pub fn text(&self) -> String {
        self.glyphs.iter().map(|glyph| glyph.ch).collect()
    }
}

/// Lines, caret and placement for a surface, without any output.
#[derive(Debug, Clone)]
pub struct Canvas {
    lines: Vec<Line>,
    layout: LayoutMode,
    caret: Option<CaretState>,
    align: Align,
    justify: Justify,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            layout: LayoutMode::Stacked,
            caret: None,
            align: Align::default(),
            justify: Justify::default(),
        }
    }
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(&self, line: LineHandle) -> Option<&Line> {
        self.lines.get(line.index())
    }

    /// Text of `line`, empty if the line does not exist.
    pub fn line_text(&self, line: LineHandle) -> String {
        self.line(line).map(Line::text).unwrap_or_default()
    }

    pub fn layout(&self) -> LayoutMode {
        self.layout
    }

    pub fn caret(&self) -> Option<&CaretState> {
        self.caret.as_ref()
    }

    pub fn align(&self) -> Align {
        self.align
    }

    pub fn justify(&self) -> Justify {
        self.justify
    }
}

impl RenderSurface for Canvas {
    fn set_layout(&mut self, layout: LayoutMode) {
        self.layout = layout;
    }

    fn open_line(&mut self, fragment: usize, style: &EffectiveStyle) -> LineHandle {
        let index = match self.layout {
            LayoutMode::Stacked => fragment,
            LayoutMode::Inline => 0,
        };
        if self.lines.len() <= index {
            self.lines.resize_with(index + 1, Line::default);
        }
        self.lines[index].style = style.clone();
        LineHandle::new(index)
    }

    fn append_glyph(&mut self, line: LineHandle, ch: char) {
        if let Some(target) = self.lines.get_mut(line.index()) {
            let style = target.style.clone();
            target.glyphs.push(Glyph { ch, style });
        }
    }

    fn remove_last_glyph(&mut self, line: LineHandle) -> bool {
        self.lines
            .get_mut(line.index())
            .and_then(|target| target.glyphs.pop())
            .is_some()
    }

    fn place_caret(&mut self, caret: &CaretState) {
        self.caret = Some(*caret);
    }

    fn set_position(&mut self, align: Align, justify: Justify) {
        self.align = align;
        self.justify = justify;
    }

    fn glyph_count(&self, line: LineHandle) -> usize {
        self.line(line).map_or(0, |l| l.glyphs.len())
    }

    fn line_count(&self) -> usize {
        self.lines.len()
    }
}
