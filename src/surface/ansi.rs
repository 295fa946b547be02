//! ANSI escape code conversion utilities.
//!
//! Converts resolved glyph styles to ANSI escape sequences for rendering.
//! Font size and family have no terminal equivalent and are not emitted.

use crate::style::{Color, EffectiveStyle};

/// ANSI reset sequence
pub(crate) const RESET: &str = "\x1b[0m";

/// Append the foreground escape for `color`.
///
/// # Arguments
/// * `color` - The color to convert, `None` for the terminal default
/// * `buf` - The output buffer to append to
///
/// # Returns
/// `true` if a code was appended, `false` if the color is default
pub fn style_to_ansi_fg(color: Option<Color>, buf: &mut String) -> bool {
    let code = match color {
        None => return false,
        Some(Color::Black) => "\x1b[30m",
        Some(Color::Red) => "\x1b[31m",
        Some(Color::Green) => "\x1b[32m",
        Some(Color::Yellow) => "\x1b[33m",
        Some(Color::Blue) => "\x1b[34m",
        Some(Color::Magenta) => "\x1b[35m",
        Some(Color::Cyan) => "\x1b[36m",
        Some(Color::White) => "\x1b[37m",
        Some(Color::BrightBlack) => "\x1b[90m",
        Some(Color::BrightRed) => "\x1b[91m",
        Some(Color::BrightGreen) => "\x1b[92m",
        Some(Color::BrightYellow) => "\x1b[93m",
        Some(Color::BrightBlue) => "\x1b[94m",
        Some(Color::BrightMagenta) => "\x1b[95m",
        Some(Color::BrightCyan) => "\x1b[96m",
        Some(Color::BrightWhite) => "\x1b[97m",
        Some(Color::Rgb(r, g, b)) => {
            buf.push_str("\x1b[38;2;");
            buf.push_str(&r.to_string());
            buf.push(';');
            buf.push_str(&g.to_string());
            buf.push(';');
            buf.push_str(&b.to_string());
            buf.push('m');
            return true;
        }
    };
    buf.push_str(code);
    true
}

/// Append ANSI codes for text attributes (bold, italic, underline, strikethrough).
///
/// # Arguments
/// * `style` - The resolved style to convert
/// * `buf` - The output buffer to append to
pub fn style_to_ansi_attrs(style: &EffectiveStyle, buf: &mut String) {
    if style.bold {
        buf.push_str("\x1b[1m");
    }
    if style.italic {
        buf.push_str("\x1b[3m");
    }
    if style.underline {
        buf.push_str("\x1b[4m");
    }
    if style.strikethrough {
        buf.push_str("\x1b[9m");
    }
}

/// Reset, then switch to `style`.
pub fn push_style(style: &EffectiveStyle, buf: &mut String) {
    buf.push_str(RESET);
    style_to_ansi_fg(style.color, buf);
    style_to_ansi_attrs(style, buf);
}
