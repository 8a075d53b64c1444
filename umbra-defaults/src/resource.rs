//! # Resource Loading
//!
//! The engine never touches image data itself. Icon entries are handed to a
//! [ResourceLoader], which turns a logical path and a dimension into an
//! [IconResource] handle (or an [AwareIcon] pair of light/dark handles).
//!
//! Loaders may keep a cache keyed by path, dimension and variant. Such a cache
//! belongs to the loader, and so does invalidating it when the theme changes.

use std::path::PathBuf;
use thiserror::Error;

/// Errors a resource loader can report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// No resource exists for the logical path.
    #[error("Resource '{0}' not found")]
    NotFound(String),

    /// The logical path cannot be used for a lookup.
    #[error("Invalid resource path: '{0}'")]
    InvalidPath(String),

    /// The resource exists but could not be read.
    #[error("I/O error for {path:?}: {message}")]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// The underlying error message.
        message: String,
    },
}

/// Which theme appearance a rendition is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Appearance {
    /// Used regardless of the active appearance.
    #[default]
    Neutral,
    /// Rendition for light themes.
    Light,
    /// Rendition for dark themes.
    Dark,
}

/// A loadable icon handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IconResource {
    /// Where the icon data lives. Loader specific: a logical path for
    /// deferred loaders, a file path for filesystem loaders.
    pub location: String,
    /// Requested width.
    pub width: u32,
    /// Requested height.
    pub height: u32,
    /// Whether the icon is recolored according to the current theme when rendered.
    pub patched: bool,
    /// The appearance this rendition belongs to.
    pub appearance: Appearance,
}

impl IconResource {
    /// Create a neutral, unpatched handle.
    pub fn new(location: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            location: location.into(),
            width,
            height,
            patched: false,
            appearance: Appearance::Neutral,
        }
    }

    /// Mark the handle as theme-patched.
    pub fn with_patched(mut self, patched: bool) -> Self {
        self.patched = patched;
        self
    }

    /// Set the appearance of the handle.
    pub fn with_appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = appearance;
        self
    }
}

/// A theme-aware icon bundling a light and a dark rendition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AwareIcon {
    light: IconResource,
    dark: IconResource,
}

impl AwareIcon {
    /// Bundle two renditions.
    pub fn new(light: IconResource, dark: IconResource) -> Self {
        Self {
            light: light.with_appearance(Appearance::Light),
            dark: dark.with_appearance(Appearance::Dark),
        }
    }

    /// The light rendition.
    pub fn light(&self) -> &IconResource {
        &self.light
    }

    /// The dark rendition.
    pub fn dark(&self) -> &IconResource {
        &self.dark
    }

    /// The designated dual rendition (the dark one), detached from the pair.
    pub fn dual(&self) -> IconResource {
        self.dark.clone()
    }

    /// Select the rendition for the active appearance.
    pub fn select(&self, dark: bool) -> &IconResource {
        if dark {
            &self.dark
        } else {
            &self.light
        }
    }
}

/// Logical locations of the light and dark renditions of an aware icon.
pub fn aware_locations(path: &str) -> (String, String) {
    let path = path.trim_start_matches('/');
    (format!("light/{}", path), format!("dark/{}", path))
}

/// Provides icon handles for logical paths.
pub trait ResourceLoader {
    /// Load a plain icon, optionally patched by the current theme.
    fn load_icon(
        &self,
        path: &str,
        width: u32,
        height: u32,
        patched: bool,
    ) -> Result<IconResource, ResourceError>;

    /// Load a theme-aware icon with light and dark renditions.
    fn load_aware_icon(&self, path: &str, width: u32, height: u32)
        -> Result<AwareIcon, ResourceError>;
}

impl<L: ResourceLoader + ?Sized> ResourceLoader for &L {
    fn load_icon(
        &self,
        path: &str,
        width: u32,
        height: u32,
        patched: bool,
    ) -> Result<IconResource, ResourceError> {
        (**self).load_icon(path, width, height, patched)
    }

    fn load_aware_icon(
        &self,
        path: &str,
        width: u32,
        height: u32,
    ) -> Result<AwareIcon, ResourceError> {
        (**self).load_aware_icon(path, width, height)
    }
}

/// A loader that hands out handles without touching any storage.
///
/// Loading is deferred to whoever renders the handle, so every non-empty
/// path is accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct LazyResourceLoader;

impl LazyResourceLoader {
    /// Create a new deferred loader.
    pub fn new() -> Self {
        Self
    }

    fn check(path: &str) -> Result<&str, ResourceError> {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            Err(ResourceError::InvalidPath(path.to_string()))
        } else {
            Ok(trimmed)
        }
    }
}

impl ResourceLoader for LazyResourceLoader {
    fn load_icon(
        &self,
        path: &str,
        width: u32,
        height: u32,
        patched: bool,
    ) -> Result<IconResource, ResourceError> {
        let path = Self::check(path)?;
        Ok(IconResource::new(path, width, height).with_patched(patched))
    }

    fn load_aware_icon(
        &self,
        path: &str,
        width: u32,
        height: u32,
    ) -> Result<AwareIcon, ResourceError> {
        let (light, dark) = aware_locations(Self::check(path)?);
        Ok(AwareIcon::new(
            IconResource::new(light, width, height),
            IconResource::new(dark, width, height),
        ))
    }
}
