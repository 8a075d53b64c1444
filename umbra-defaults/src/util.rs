//! Shared helpers for value parsing.

use crate::error::ParseError;
use crate::value::Color;

/// Parse a bare hex color with optional alpha channel.
///
/// Supports both RGB and RGBA formats, without a leading `#`:
/// - `rrggbb` - 6 characters, opaque (alpha = 255)
/// - `rrggbbaa` - 8 characters, with alpha channel (0-255)
pub fn parse_hex_color(hex: &str) -> Result<Color, ParseError> {
    let invalid = || ParseError::InvalidColor(hex.to_string());
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let channel = |at: usize| u8::from_str_radix(&hex[at..at + 2], 16).map_err(|_| invalid());
    match hex.len() {
        6 => Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
        8 => Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
        _ => Err(invalid()),
    }
}

/// Split `value` on commas and parse exactly `N` integers.
pub fn parse_int_tuple<const N: usize>(value: &str) -> Option<[i32; N]> {
    let mut out = [0; N];
    let mut parts = value.split(',');
    for slot in out.iter_mut() {
        *slot = parts.next()?.trim().parse().ok()?;
    }
    match parts.next() {
        Some(_) => None,
        None => Some(out),
    }
}
