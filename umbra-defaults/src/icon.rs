//! # Icon Variant Addressing
//!
//! Icon values carry an optional dimension and an optional variant tag:
//!
//! ```text
//! path ::= basePath [ "(" width "," height ")" ] [ "[dual]" | "[aware]" | "[patch]" ]
//! ```
//!
//! - no tag, `empty` - a placeholder of the given dimension
//! - no tag - a plain themed icon
//! - `[patch]` - an icon recolored by the current theme
//! - `[aware]` - a light/dark pair, switched at render time
//! - `[dual]` - the dark rendition of the aware pair only
//!
//! The dimension defaults to 16x16. It may also follow the tag
//! (`basePath[aware](24,24)`).

use crate::error::ParseError;
use crate::resource::{Appearance, AwareIcon, IconResource, ResourceLoader};

const DUAL_TAG: &str = "[dual]";
const AWARE_TAG: &str = "[aware]";
const PATCH_TAG: &str = "[patch]";
const EMPTY_PATH: &str = "empty";

/// Default icon dimension.
pub const DEFAULT_ICON_SIZE: (u32, u32) = (16, 16);

/// The variant tag of an icon path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IconVariant {
    /// No tag.
    #[default]
    None,
    /// `[dual]`: keep only the dark rendition.
    Dual,
    /// `[aware]`: keep both renditions.
    Aware,
    /// `[patch]`: recolor according to the theme.
    Patch,
}

impl IconVariant {
    fn tag(&self) -> Option<&'static str> {
        match self {
            IconVariant::None => None,
            IconVariant::Dual => Some(DUAL_TAG),
            IconVariant::Aware => Some(AWARE_TAG),
            IconVariant::Patch => Some(PATCH_TAG),
        }
    }
}

/// A parsed icon path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IconSpec {
    /// The base path, without dimension or tag.
    pub path: String,
    /// Icon width.
    pub width: u32,
    /// Icon height.
    pub height: u32,
    /// The variant tag.
    pub variant: IconVariant,
}

impl IconSpec {
    /// Whether this spec names the empty placeholder icon.
    pub fn is_placeholder(&self) -> bool {
        self.variant == IconVariant::None && self.path == EMPTY_PATH
    }
}

/// Parse an icon path, using `default_size` when no dimension is given.
pub fn parse_icon_spec(value: &str, default_size: (u32, u32)) -> Result<IconSpec, ParseError> {
    let (mut rest, mut size) = strip_dimension(value.trim(), value)?;

    let mut variant = IconVariant::None;
    if rest.ends_with(']') {
        variant = [IconVariant::Dual, IconVariant::Aware, IconVariant::Patch]
            .into_iter()
            .find(|v| v.tag().is_some_and(|tag| rest.ends_with(tag)))
            .ok_or_else(|| ParseError::MalformedIconTag(value.to_string()))?;
        let tag_len = variant.tag().map_or(0, str::len);
        rest = &rest[..rest.len() - tag_len];
    }

    if size.is_none() {
        (rest, size) = strip_dimension(rest, value)?;
    }

    let path = rest.trim_end();
    if path.is_empty() {
        return Err(ParseError::EmptyIconPath(value.to_string()));
    }

    let (width, height) = size.unwrap_or(default_size);
    Ok(IconSpec {
        path: path.to_string(),
        width,
        height,
        variant,
    })
}

/// Strip a trailing `(w,h)` from `rest`.
fn strip_dimension<'a>(
    rest: &'a str,
    value: &str,
) -> Result<(&'a str, Option<(u32, u32)>), ParseError> {
    if !rest.ends_with(')') {
        return Ok((rest, None));
    }
    let invalid = || ParseError::InvalidDimension(value.to_string());
    let open = rest.rfind('(').ok_or_else(invalid)?;
    let (width, height) = rest[open + 1..rest.len() - 1]
        .split_once(',')
        .ok_or_else(invalid)?;
    let width = width.trim().parse::<u32>().map_err(|_| invalid())?;
    let height = height.trim().parse::<u32>().map_err(|_| invalid())?;
    Ok((&rest[..open], Some((width, height))))
}

/// The renditions kept for an icon entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Renditions {
    /// The empty placeholder; nothing to load.
    Placeholder,
    /// A single rendition.
    Single(IconResource),
    /// Both light and dark renditions.
    Aware(AwareIcon),
}

/// A resolved icon value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThemedIcon {
    spec: IconSpec,
    renditions: Renditions,
}

impl ThemedIcon {
    /// Resolve `spec` through `loader`.
    pub fn resolve(spec: IconSpec, loader: &dyn ResourceLoader) -> Result<Self, ParseError> {
        let renditions = if spec.is_placeholder() {
            Renditions::Placeholder
        } else {
            match spec.variant {
                IconVariant::None => {
                    Renditions::Single(loader.load_icon(&spec.path, spec.width, spec.height, false)?)
                },
                IconVariant::Patch => {
                    Renditions::Single(loader.load_icon(&spec.path, spec.width, spec.height, true)?)
                },
                IconVariant::Aware => {
                    Renditions::Aware(loader.load_aware_icon(&spec.path, spec.width, spec.height)?)
                },
                IconVariant::Dual => Renditions::Single(
                    loader
                        .load_aware_icon(&spec.path, spec.width, spec.height)?
                        .dual(),
                ),
            }
        };
        Ok(Self { spec, renditions })
    }

    /// The parsed path this icon was resolved from.
    pub fn spec(&self) -> &IconSpec {
        &self.spec
    }

    /// Icon width.
    pub fn width(&self) -> u32 {
        self.spec.width
    }

    /// Icon height.
    pub fn height(&self) -> u32 {
        self.spec.height
    }

    /// The variant tag.
    pub fn variant(&self) -> IconVariant {
        self.spec.variant
    }

    /// The kept renditions.
    pub fn renditions(&self) -> &Renditions {
        &self.renditions
    }

    /// Whether this is the empty placeholder icon.
    pub fn is_placeholder(&self) -> bool {
        matches!(self.renditions, Renditions::Placeholder)
    }

    /// The rendition to paint for the active appearance, `None` for the placeholder.
    pub fn rendition(&self, dark: bool) -> Option<&IconResource> {
        match &self.renditions {
            Renditions::Placeholder => None,
            Renditions::Single(resource) => Some(resource),
            Renditions::Aware(aware) => Some(aware.select(dark)),
        }
    }

    /// The rendition kept for `appearance`, if any.
    pub fn rendition_for(&self, appearance: Appearance) -> Option<&IconResource> {
        match &self.renditions {
            Renditions::Placeholder => None,
            Renditions::Single(resource) => {
                (resource.appearance == appearance).then_some(resource)
            },
            Renditions::Aware(aware) => match appearance {
                Appearance::Light => Some(aware.light()),
                Appearance::Dark => Some(aware.dark()),
                Appearance::Neutral => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::LazyResourceLoader;

    fn spec(value: &str) -> Result<IconSpec, ParseError> {
        parse_icon_spec(value, DEFAULT_ICON_SIZE)
    }

    #[test]
    fn test_plain_path_uses_default_size() {
        let parsed = spec("icons/foo.svg").unwrap();
        assert_eq!(parsed.path, "icons/foo.svg");
        assert_eq!((parsed.width, parsed.height), (16, 16));
        assert_eq!(parsed.variant, IconVariant::None);
    }

    #[test]
    fn test_dimension_before_tag() {
        let parsed = spec("icons/foo(24,24)[dual]").unwrap();
        assert_eq!(parsed.path, "icons/foo");
        assert_eq!((parsed.width, parsed.height), (24, 24));
        assert_eq!(parsed.variant, IconVariant::Dual);
    }

    #[test]
    fn test_dimension_after_tag() {
        let parsed = spec("icons/foo[aware](32,20)").unwrap();
        assert_eq!(parsed.path, "icons/foo");
        assert_eq!((parsed.width, parsed.height), (32, 20));
        assert_eq!(parsed.variant, IconVariant::Aware);
    }

    #[test]
    fn test_patch_tag() {
        assert_eq!(spec("icons/menu[patch]").unwrap().variant, IconVariant::Patch);
    }

    #[test]
    fn test_malformed_tag() {
        assert_eq!(
            spec("icons/foo[bogus]"),
            Err(ParseError::MalformedIconTag("icons/foo[bogus]".into()))
        );
    }

    #[test]
    fn test_malformed_dimension() {
        assert!(matches!(spec("icons/foo(a,b)"), Err(ParseError::InvalidDimension(_))));
        assert!(matches!(spec("icons/foo(12)"), Err(ParseError::InvalidDimension(_))));
        assert!(matches!(spec("icons/foo12)"), Err(ParseError::InvalidDimension(_))));
    }

    #[test]
    fn test_empty_path() {
        assert!(matches!(spec("[aware]"), Err(ParseError::EmptyIconPath(_))));
    }

    #[test]
    fn test_placeholder_icon() {
        let icon = ThemedIcon::resolve(spec("empty(8,4)").unwrap(), &LazyResourceLoader).unwrap();
        assert!(icon.is_placeholder());
        assert_eq!((icon.width(), icon.height()), (8, 4));
        assert_eq!(icon.rendition(true), None);
    }

    #[test]
    fn test_dual_keeps_dark_only() {
        let icon = ThemedIcon::resolve(spec("icons/foo[dual]").unwrap(), &LazyResourceLoader)
            .unwrap();
        assert!(icon.rendition_for(Appearance::Dark).is_some());
        assert!(icon.rendition_for(Appearance::Light).is_none());
        assert_eq!(icon.rendition(false), icon.rendition(true));
    }

    #[test]
    fn test_aware_keeps_both() {
        let icon = ThemedIcon::resolve(spec("icons/foo[aware]").unwrap(), &LazyResourceLoader)
            .unwrap();
        assert_eq!(
            icon.rendition_for(Appearance::Light).map(|r| r.location.as_str()),
            Some("light/icons/foo")
        );
        assert_eq!(
            icon.rendition_for(Appearance::Dark).map(|r| r.location.as_str()),
            Some("dark/icons/foo")
        );
    }
}
