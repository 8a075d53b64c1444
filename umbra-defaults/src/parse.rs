//! Typed value parsers and the scalar fallback chain.
//!
//! Each parser returns a `Result`; none of them records anything. Deciding
//! what a failure means for the entry is left to the
//! [DefaultsBuilder](crate::builder::DefaultsBuilder).

use crate::error::ParseError;
use crate::reference::{self, ReferenceScope};
use crate::util::{parse_hex_color, parse_int_tuple};
use crate::value::{FontSpec, FontStyle, Insets, ResolvedValue, SizeSpec};

/// Parse `top,left,bottom,right`.
pub fn parse_insets(value: &str) -> Result<Insets, ParseError> {
    parse_int_tuple::<4>(value)
        .map(|[top, left, bottom, right]| Insets::new(top, left, bottom, right))
        .ok_or_else(|| ParseError::InvalidInsets(value.to_string()))
}

/// Parse `width,height`.
pub fn parse_size(value: &str) -> Result<SizeSpec, ParseError> {
    parse_int_tuple::<2>(value)
        .map(|[width, height]| SizeSpec::new(width, height))
        .ok_or_else(|| ParseError::InvalidSize(value.to_string()))
}

/// Parse `family-style-size`.
///
/// The value is split from the right, so the family may itself contain `-`.
pub fn parse_font(value: &str) -> Result<FontSpec, ParseError> {
    let invalid = || ParseError::InvalidFont(value.to_string());
    let mut parts = value.trim().rsplitn(3, '-');
    let size = parts.next().ok_or_else(invalid)?;
    let style = parts.next().ok_or_else(invalid)?;
    let family = parts.next().ok_or_else(invalid)?;

    let size = size.parse::<i32>().map_err(|_| invalid())?;
    let style = FontStyle::from_token(style).ok_or_else(invalid)?;
    if family.is_empty() || size <= 0 {
        return Err(invalid());
    }
    Ok(FontSpec::new(family, style, size))
}

/// Run the scalar fallback chain over `value`.
///
/// In order, the first success wins:
/// 1. `null` in any case
/// 2. `%name`, resolved against `scope`
/// 3. a 6- or 8-digit hex color
/// 4. an integer
/// 5. `true`/`false` in any case
/// 6. the raw string
///
/// Only a reference can fail.
pub fn parse_scalar(value: &str, scope: &dyn ReferenceScope) -> Result<ResolvedValue, ParseError> {
    if value.eq_ignore_ascii_case("null") {
        return Ok(ResolvedValue::Null);
    }
    if let Some(name) = reference::reference_target(value) {
        return reference::resolve(name, scope);
    }
    if let Ok(color) = parse_hex_color(value) {
        return Ok(ResolvedValue::Color(color));
    }
    if let Ok(int) = value.parse::<i32>() {
        return Ok(ResolvedValue::Integer(int));
    }
    if value.eq_ignore_ascii_case("true") {
        return Ok(ResolvedValue::Bool(true));
    }
    if value.eq_ignore_ascii_case("false") {
        return Ok(ResolvedValue::Bool(false));
    }
    Ok(ResolvedValue::String(value.to_string()))
}
