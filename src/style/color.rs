//! Text colors.
//!
//! Accepts the 16 ANSI color names (`red`, `bright-blue`, ...), a handful of
//! CSS names, `#rgb`/`#rrggbb` hex and `rgb(r, g, b)`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypewriterError;

/// A foreground color for glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
    Rgb(u8, u8, u8),
}

/// Named colors and what they map to.
const NAMED: &[(&str, Color)] = &[
    ("black", Color::Black),
    ("red", Color::Red),
    ("green", Color::Green),
    ("yellow", Color::Yellow),
    ("blue", Color::Blue),
    ("magenta", Color::Magenta),
    ("cyan", Color::Cyan),
    ("white", Color::White),
    ("bright-black", Color::BrightBlack),
    ("bright-red", Color::BrightRed),
    ("bright-green", Color::BrightGreen),
    ("bright-yellow", Color::BrightYellow),
    ("bright-blue", Color::BrightBlue),
    ("bright-magenta", Color::BrightMagenta),
    ("bright-cyan", Color::BrightCyan),
    ("bright-white", Color::BrightWhite),
    // CSS names
    ("gray", Color::BrightBlack),
    ("grey", Color::BrightBlack),
    ("pink", Color::Rgb(255, 192, 203)),
    ("orange", Color::Rgb(255, 165, 0)),
    ("purple", Color::Rgb(128, 0, 128)),
];

impl Color {
    fn name(&self) -> Option<&'static str> {
        NAMED
            .iter()
            .find(|(_, color)| color == self)
            .map(|(name, _)| *name)
    }

    fn parse_hex(s: &str, hex: &str) -> Result<Self, TypewriterError> {
        let invalid = || TypewriterError::invalid_style("color", s, "expected #rgb or #rrggbb");
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let digit = |i: usize, len: usize| u8::from_str_radix(&hex[i..i + len], 16);
        match hex.len() {
            3 => {
                let expand = |i| digit(i, 1).map(|v| v * 17);
                Ok(Self::Rgb(
                    expand(0).map_err(|_| invalid())?,
                    expand(1).map_err(|_| invalid())?,
                    expand(2).map_err(|_| invalid())?,
                ))
            }
            6 => Ok(Self::Rgb(
                digit(0, 2).map_err(|_| invalid())?,
                digit(2, 2).map_err(|_| invalid())?,
                digit(4, 2).map_err(|_| invalid())?,
            )),
            _ => Err(invalid()),
        }
    }

    fn parse_rgb(s: &str, body: &str) -> Result<Self, TypewriterError> {
        let channels: Vec<&str> = body.split(',').map(str::trim).collect();
        if channels.len() != 3 {
            return Err(TypewriterError::invalid_style(
                "color",
                s,
                "rgb() takes exactly three channels",
            ));
        }
        let mut values = [0u8; 3];
        for (slot, channel) in values.iter_mut().zip(&channels) {
            *slot = channel.parse().map_err(|_| {
                TypewriterError::invalid_style(
                    "color",
                    s,
                    format!("channel '{}' is not in 0..=255", channel),
                )
            })?;
        }
        Ok(Self::Rgb(values[0], values[1], values[2]))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => match self {
                Self::Rgb(r, g, b) => write!(f, "#{:02x}{:02x}{:02x}", r, g, b),
                _ => Ok(()),
            },
        }
    }
}

impl FromStr for Color {
    type Err = TypewriterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");

        if let Some(hex) = normalized.strip_prefix('#') {
            return Self::parse_hex(s, hex);
        }
        if let Some(body) = normalized
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return Self::parse_rgb(s, body);
        }

        let lookup = match normalized.strip_prefix("bright") {
            Some(rest) if !rest.starts_with('-') => format!("bright-{}", rest),
            _ => normalized,
        };
        NAMED
            .iter()
            .find(|(name, _)| *name == lookup)
            .map(|(_, color)| *color)
            .ok_or_else(|| TypewriterError::invalid_style("color", s, "unknown color name"))
    }
}

impl TryFrom<String> for Color {
    type Error = TypewriterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}
