//! Font sizes with CSS-like units.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypewriterError;

/// Pixels per `em`/`rem` and the base for percentages.
const BASE_PX: f32 = 16.0;

/// Unit attached to a [`FontSize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeUnit {
    Px,
    Pt,
    Em,
    Rem,
    Percent,
}

impl SizeUnit {
    fn suffix(&self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Pt => "pt",
            Self::Em => "em",
            Self::Rem => "rem",
            Self::Percent => "%",
        }
    }

    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix.to_ascii_lowercase().as_str() {
            "" | "px" => Some(Self::Px),
            "pt" => Some(Self::Pt),
            "em" => Some(Self::Em),
            "rem" => Some(Self::Rem),
            "%" => Some(Self::Percent),
            _ => None,
        }
    }
}

/// A font size such as `24px` or `1.5em`.
///
/// Parsing rejects zero, negative, and non-finite values, so a parsed size
/// can always be applied by a surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FontSize {
    value: f32,
    unit: SizeUnit,
}

impl FontSize {
    /// Size applied when neither the fragment nor the global style sets one.
    pub const DEFAULT: FontSize = FontSize {
        value: 64.0,
        unit: SizeUnit::Px,
    };

    /// Create a size without validation. Use [`FontSize::validate`] or
    /// parse from a string when the value comes from user input.
    pub fn new(value: f32, unit: SizeUnit) -> Self {
        Self { value, unit }
    }

    /// Shorthand for a pixel size.
    pub fn px(value: f32) -> Self {
        Self::new(value, SizeUnit::Px)
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn unit(&self) -> SizeUnit {
        self.unit
    }

    /// Approximate size in pixels (`em`, `rem` and `%` against 16px).
    pub fn to_px(&self) -> f32 {
        match self.unit {
            SizeUnit::Px => self.value,
            SizeUnit::Pt => self.value * 4.0 / 3.0,
            SizeUnit::Em | SizeUnit::Rem => self.value * BASE_PX,
            SizeUnit::Percent => self.value / 100.0 * BASE_PX,
        }
    }

    /// Check that the size is positive and finite.
    pub fn validate(&self) -> Result<(), TypewriterError> {
        if !self.value.is_finite() {
            return Err(TypewriterError::invalid_style(
                "font size",
                self.to_string(),
                "size must be a finite number",
            ));
        }
        if self.value <= 0.0 {
            return Err(TypewriterError::invalid_style(
                "font size",
                self.to_string(),
                "size must be greater than zero",
            ));
        }
        Ok(())
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

impl FromStr for FontSize {
    type Err = TypewriterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
            .unwrap_or(trimmed.len());
        let (number, suffix) = trimmed.split_at(split);

        if number.is_empty() {
            return Err(TypewriterError::invalid_style(
                "font size",
                s,
                "expected a number followed by an optional unit (px, pt, em, rem, %)",
            ));
        }

        let value: f32 = number.parse().map_err(|_| {
            TypewriterError::invalid_style("font size", s, format!("'{}' is not a number", number))
        })?;

        let unit = SizeUnit::from_suffix(suffix.trim()).ok_or_else(|| {
            TypewriterError::invalid_style(
                "font size",
                s,
                format!("unknown unit '{}' (use px, pt, em, rem or %)", suffix.trim()),
            )
        })?;

        let size = Self::new(value, unit);
        size.validate().map_err(|_| {
            TypewriterError::invalid_style("font size", s, "size must be a positive number")
        })?;
        Ok(size)
    }
}

impl TryFrom<String> for FontSize {
    type Error = TypewriterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FontSize> for String {
    fn from(size: FontSize) -> Self {
        size.to_string()
    }
}
