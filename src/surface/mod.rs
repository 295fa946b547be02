//! Render surfaces.
//!
//! A surface is anything that can hold lines of styled glyphs plus a caret.
//! The player drives it through [`RenderSurface`]; how glyphs actually reach
//! a screen is up to the implementation:
//!
//! - [`Canvas`]: the in-memory line model the other surfaces build on
//! - [`RecordingSurface`]: a canvas that logs every operation with its time
//! - [`TerminalSurface`]: a canvas painted to an ANSI terminal

mod ansi;
mod canvas;
mod recording;
mod terminal;

pub use ansi::{push_style, style_to_ansi_attrs, style_to_ansi_fg};
pub use canvas::{Canvas, Glyph, Line};
pub use recording::{RecordingSurface, SurfaceEvent, SurfaceOp};
pub use terminal::TerminalSurface;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::caret::CaretState;
use crate::error::TypewriterError;
use crate::style::EffectiveStyle;

/// Handle to one line on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineHandle(usize);

impl LineHandle {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

/// How fragments are laid out, fixed once per typewriter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Each fragment gets its own line.
    Stacked,
    /// All fragments share one line.
    Inline,
}

impl LayoutMode {
    /// Layout requested by the `new_line` playback option.
    pub fn from_new_line(new_line: bool) -> Self {
        if new_line {
            Self::Stacked
        } else {
            Self::Inline
        }
    }
}

/// Placement keyword shared by [`Align`] and [`Justify`].
fn parse_placement(field: &'static str, s: &str) -> Result<Placement, TypewriterError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "center" => Ok(Placement::Center),
        "left" => Ok(Placement::Left),
        "right" => Ok(Placement::Right),
        _ => Err(TypewriterError::invalid_style(
            field,
            s,
            "expected one of center, left, right",
        )),
    }
}

/// Where the block of lines sits inside the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    #[default]
    Center,
    Left,
    Right,
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Center => "center",
            Self::Left => "left",
            Self::Right => "right",
        })
    }
}

/// Cross-axis alignment: `left` is the top edge, `right` the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Align(pub Placement);

/// Main-axis justification of each line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Justify(pub Placement);

impl Align {
    pub const CENTER: Align = Align(Placement::Center);
    pub const LEFT: Align = Align(Placement::Left);
    pub const RIGHT: Align = Align(Placement::Right);
}

impl Justify {
    pub const CENTER: Justify = Justify(Placement::Center);
    pub const LEFT: Justify = Justify(Placement::Left);
    pub const RIGHT: Justify = Justify(Placement::Right);
}

impl FromStr for Align {
    type Err = TypewriterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_placement("align", s).map(Align)
    }
}

impl FromStr for Justify {
    type Err = TypewriterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_placement("justify", s).map(Justify)
    }
}

/// Operations the player performs on a visual text area.
pub trait RenderSurface {
    /// Fix how fragments map to lines. Called once, before the first line
    /// is opened.
    fn set_layout(&mut self, layout: LayoutMode);

    /// Create or reuse the line for `fragment` and apply `style` to glyphs
    /// appended to it from now on.
    fn open_line(&mut self, fragment: usize, style: &EffectiveStyle) -> LineHandle;

    /// Append one glyph at the end of `line`.
    fn append_glyph(&mut self, line: LineHandle, ch: char);

    /// Remove the most recent glyph of `line`. Returns false (and does
    /// nothing) when the line holds no glyphs; the caret is never removed.
    fn remove_last_glyph(&mut self, line: LineHandle) -> bool;

    /// Draw the caret as described.
    fn place_caret(&mut self, caret: &CaretState);

    fn set_position(&mut self, align: Align, justify: Justify);

    fn glyph_count(&self, line: LineHandle) -> usize;

    fn line_count(&self) -> usize;
}
