//! Expression queue: the ordered fragments a typewriter plays.

use crate::error::{Result, TypewriterError};
use crate::style::StyleRecord;

/// One queued unit of text with an optional style override.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    text: String,
    style: Option<StyleRecord>,
    char_count: usize,
}

impl Fragment {
    pub fn new(text: impl Into<String>, style: Option<StyleRecord>) -> Self {
        let text = text.into();
        let char_count = text.chars().count();
        Self {
            text,
            style,
            char_count,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> Option<&StyleRecord> {
        self.style.as_ref()
    }

    /// Number of glyphs this fragment types.
    pub fn len(&self) -> usize {
        self.char_count
    }

    pub fn is_empty(&self) -> bool {
        self.char_count == 0
    }

    /// The glyph at `offset`, if any.
    pub fn glyph(&self, offset: usize) -> Option<char> {
        self.text.chars().nth(offset)
    }
}

/// Append-only, insertion-ordered collection of fragments.
#[derive(Debug, Clone, Default)]
pub struct ExpressionQueue {
    fragments: Vec<Fragment>,
}

impl ExpressionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment, validating its style override first.
    ///
    /// Any text is accepted, including the empty string.
    pub fn push(&mut self, text: impl Into<String>, style: Option<StyleRecord>) -> Result<()> {
        if let Some(style) = &style {
            style.validate()?;
        }
        self.fragments.push(Fragment::new(text, style));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// The fragment at `index`.
    pub fn at(&self, index: usize) -> Result<&Fragment> {
        self.fragments
            .get(index)
            .ok_or(TypewriterError::IndexOutOfRange {
                index,
                len: self.fragments.len(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fragment> {
        self.fragments.iter()
    }

    /// Total glyph count across all fragments.
    pub fn total_chars(&self) -> usize {
        self.fragments.iter().map(Fragment::len).sum()
    }
}
