//! Style records and resolution.
//!
//! A [`StyleRecord`] is a set of optional overrides. Fragments carry one, and
//! the typewriter keeps a global one as the default. [`resolve`] merges the
//! two field by field into an [`EffectiveStyle`] that a surface can apply.

mod color;
mod size;

pub use color::Color;
pub use size::{FontSize, SizeUnit};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TypewriterError};

/// Optional style fields. A missing field inherits from the global default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<FontSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
}

impl StyleRecord {
    /// An empty record (every field inherits).
    pub fn new() -> Self {
        Self::default()
    }

    /// The global style a new typewriter starts with: 64px, no flags.
    pub fn global_default() -> Self {
        Self {
            font_size: Some(FontSize::DEFAULT),
            ..Self::default()
        }
    }

    pub fn font_size(mut self, size: FontSize) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn bold(mut self, on: bool) -> Self {
        self.bold = Some(on);
        self
    }

    pub fn italic(mut self, on: bool) -> Self {
        self.italic = Some(on);
        self
    }

    pub fn underline(mut self, on: bool) -> Self {
        self.underline = Some(on);
        self
    }

    pub fn strikethrough(mut self, on: bool) -> Self {
        self.strikethrough = Some(on);
        self
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Check every set field can be applied by a surface.
    ///
    /// Colors are valid by construction; sizes and family names may not be
    /// when built programmatically.
    pub fn validate(&self) -> Result<()> {
        if let Some(size) = &self.font_size {
            size.validate()?;
        }
        if let Some(family) = &self.font_family {
            validate_font_family(family)?;
        }
        Ok(())
    }

    /// Copy every field set in `other` over this record.
    pub fn merge(&mut self, other: &StyleRecord) {
        if other.font_size.is_some() {
            self.font_size = other.font_size;
        }
        if other.color.is_some() {
            self.color = other.color;
        }
        if other.font_family.is_some() {
            self.font_family.clone_from(&other.font_family);
        }
        if other.bold.is_some() {
            self.bold = other.bold;
        }
        if other.italic.is_some() {
            self.italic = other.italic;
        }
        if other.underline.is_some() {
            self.underline = other.underline;
        }
        if other.strikethrough.is_some() {
            self.strikethrough = other.strikethrough;
        }
    }
}

/// Reject empty family names and names containing control characters.
pub fn validate_font_family(family: &str) -> Result<()> {
    if family.trim().is_empty() {
        return Err(TypewriterError::invalid_style(
            "font family",
            family,
            "family name must not be empty",
        ));
    }
    if family.chars().any(char::is_control) {
        return Err(TypewriterError::invalid_style(
            "font family",
            family.escape_debug().to_string(),
            "family name must not contain control characters",
        ));
    }
    Ok(())
}

/// A fully resolved style, ready to be applied to glyphs.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveStyle {
    pub font_size: FontSize,
    /// `None` means the surface's default color.
    pub color: Option<Color>,
    /// `None` means the surface's default family.
    pub font_family: Option<String>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
}

impl Default for EffectiveStyle {
    fn default() -> Self {
        resolve(&StyleRecord::global_default(), None)
    }
}

/// Resolve a fragment's override against the global default.
///
/// Each field comes from the override when it is set there and from the
/// global default otherwise. Flags are independent: a fragment can be bold
/// without being italic even when the default is italic, but only an
/// explicit `Some(false)` turns a flag off; omission inherits.
pub fn resolve(global: &StyleRecord, override_style: Option<&StyleRecord>) -> EffectiveStyle {
    let empty = StyleRecord::default();
    let over = override_style.unwrap_or(&empty);

    EffectiveStyle {
        font_size: over
            .font_size
            .or(global.font_size)
            .unwrap_or(FontSize::DEFAULT),
        color: over.color.or(global.color),
        font_family: over
            .font_family
            .clone()
            .or_else(|| global.font_family.clone()),
        bold: over.bold.or(global.bold).unwrap_or(false),
        italic: over.italic.or(global.italic).unwrap_or(false),
        underline: over.underline.or(global.underline).unwrap_or(false),
        strikethrough: over
            .strikethrough
            .or(global.strikethrough)
            .unwrap_or(false),
    }
}
