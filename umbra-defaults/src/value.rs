use std::any::Any;
use std::fmt;

use crate::factory::Instance;
use crate::icon::ThemedIcon;

/// An RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel, 255 is opaque.
    pub a: u8,
}

impl Color {
    /// Create an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color with an alpha channel.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Space around a component, in `top,left,bottom,right` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Insets {
    /// Top inset.
    pub top: i32,
    /// Left inset.
    pub left: i32,
    /// Bottom inset.
    pub bottom: i32,
    /// Right inset.
    pub right: i32,
}

impl Insets {
    /// Create insets from their four sides.
    pub const fn new(top: i32, left: i32, bottom: i32, right: i32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SizeSpec {
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
}

impl SizeSpec {
    /// Create a size.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Style of a font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    /// Regular weight, upright.
    #[default]
    Plain,
    /// Bold weight.
    Bold,
    /// Italic.
    Italic,
    /// Bold and italic.
    BoldItalic,
}

impl FontStyle {
    /// Parse a style token. Accepts the numeric codes `0`-`3` and the names
    /// `plain`, `bold`, `italic` and `bolditalic`. Case-sensitive.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "0" | "plain" => Some(FontStyle::Plain),
            "1" | "bold" => Some(FontStyle::Bold),
            "2" | "italic" => Some(FontStyle::Italic),
            "3" | "bolditalic" => Some(FontStyle::BoldItalic),
            _ => None,
        }
    }

    /// Whether the style is bold.
    pub fn is_bold(&self) -> bool {
        matches!(self, FontStyle::Bold | FontStyle::BoldItalic)
    }

    /// Whether the style is italic.
    pub fn is_italic(&self) -> bool {
        matches!(self, FontStyle::Italic | FontStyle::BoldItalic)
    }
}

/// A font declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontSpec {
    /// Font family name.
    pub family: String,
    /// Font style.
    pub style: FontStyle,
    /// Point size, always positive.
    pub size: i32,
}

impl FontSpec {
    /// Create a font spec.
    pub fn new(family: impl Into<String>, style: FontStyle, size: i32) -> Self {
        Self {
            family: family.into(),
            style,
            size,
        }
    }

    /// The built-in font used when a font declaration cannot be parsed.
    pub fn builtin() -> Self {
        Self::new("Dialog", FontStyle::Plain, 12)
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::builtin()
    }
}

/// A typed default value.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedValue {
    /// Insets from an `Insets` key.
    Insets(Insets),
    /// A font from a `.font` key.
    Font(FontSpec),
    /// An icon from an `.icon`/`Icon` key.
    Icon(ThemedIcon),
    /// A size from a `Size`/`.size` key.
    Size(SizeSpec),
    /// An object constructed by a registered factory.
    Instance(Instance),
    /// A hex color.
    Color(Color),
    /// An integer.
    Integer(i32),
    /// A boolean.
    Bool(bool),
    /// Any other text, kept verbatim.
    String(String),
    /// An explicit `null`.
    Null,
    /// A value that could not be resolved.
    Unresolved {
        /// Why resolution failed.
        reason: String,
    },
}

impl ResolvedValue {
    /// Create an unresolved value.
    pub fn unresolved(reason: impl Into<String>) -> Self {
        ResolvedValue::Unresolved {
            reason: reason.into(),
        }
    }

    /// Whether this value is unresolved.
    pub fn is_unresolved(&self) -> bool {
        matches!(self, ResolvedValue::Unresolved { .. })
    }

    /// Whether this value is an explicit `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, ResolvedValue::Null)
    }

    /// Get the color value, if this is a color.
    pub fn as_color(&self) -> Option<Color> {
        match self {
            ResolvedValue::Color(color) => Some(*color),
            _ => None,
        }
    }

    /// Get the integer value, if this is an integer.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            ResolvedValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Get the boolean value, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ResolvedValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Get the string value, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ResolvedValue::String(value) => Some(value),
            _ => None,
        }
    }

    /// Get the insets, if this is an insets value.
    pub fn as_insets(&self) -> Option<Insets> {
        match self {
            ResolvedValue::Insets(insets) => Some(*insets),
            _ => None,
        }
    }

    /// Get the size, if this is a size value.
    pub fn as_size(&self) -> Option<SizeSpec> {
        match self {
            ResolvedValue::Size(size) => Some(*size),
            _ => None,
        }
    }

    /// Get the font, if this is a font value.
    pub fn as_font(&self) -> Option<&FontSpec> {
        match self {
            ResolvedValue::Font(font) => Some(font),
            _ => None,
        }
    }

    /// Get the icon, if this is an icon value.
    pub fn as_icon(&self) -> Option<&ThemedIcon> {
        match self {
            ResolvedValue::Icon(icon) => Some(icon),
            _ => None,
        }
    }

    /// Get the constructed instance, if this is an instance value.
    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            ResolvedValue::Instance(instance) => Some(instance),
            _ => None,
        }
    }

    /// Downcast a constructed instance to `T`.
    pub fn instance_as<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.as_instance().and_then(|instance| instance.downcast_ref::<T>())
    }

    /// The unresolved reason, if this value is unresolved.
    pub fn unresolved_reason(&self) -> Option<&str> {
        match self {
            ResolvedValue::Unresolved { reason } => Some(reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_style_tokens() {
        assert_eq!(FontStyle::from_token("0"), Some(FontStyle::Plain));
        assert_eq!(FontStyle::from_token("bold"), Some(FontStyle::Bold));
        assert_eq!(FontStyle::from_token("3"), Some(FontStyle::BoldItalic));
        assert_eq!(FontStyle::from_token("Bold"), None);
        assert!(FontStyle::BoldItalic.is_bold() && FontStyle::BoldItalic.is_italic());
    }

    #[test]
    fn test_color_display() {
        assert_eq!(Color::rgb(0x33, 0x66, 0x99).to_string(), "336699");
        assert_eq!(Color::rgba(255, 0, 0, 128).to_string(), "ff000080");
    }
}
