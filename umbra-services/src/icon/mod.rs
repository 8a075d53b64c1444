// SPDX-License-Identifier: LGPL-3.0-only
//! Filesystem Icon Loading
//!
//! A [ResourceLoader] that resolves logical icon paths against a list of
//! directories, with an optional theme subdirectory and an owned LRU cache
//! of resolved handles.

mod cache;
mod lookup;

pub use cache::{IconCache, IconKey, DEFAULT_CACHE_SIZE};
pub use lookup::IconLookup;

use std::path::PathBuf;

use umbra_defaults::config::EngineConfig;
use umbra_defaults::resource::{
    aware_locations, Appearance, AwareIcon, IconResource, ResourceError, ResourceLoader,
};

/// Icon loader backed by icon directories on disk.
///
/// Aware icons look for their renditions under `light/` and `dark/` first and
/// fall back to the plain path. Switching the theme clears the cache.
pub struct DirectoryIconLoader {
    /// Current theme subdirectory, if any.
    theme: Option<String>,
    /// File lookup.
    lookup: IconLookup,
    /// Resolved handles.
    cache: IconCache,
}

impl DirectoryIconLoader {
    /// Create a loader searching `roots` in order.
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            theme: None,
            lookup: IconLookup::new(roots),
            cache: IconCache::default(),
        }
    }

    /// Create a loader searching the icon roots of `config`.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.icon.roots.clone())
    }

    /// Use `cache` instead of a private one.
    ///
    /// Handles are keyed by theme, so loaders with different themes may share
    /// a cache; they must search the same roots.
    pub fn with_cache(mut self, cache: IconCache) -> Self {
        self.cache = cache;
        self
    }

    /// Start with a theme subdirectory.
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    /// Set the current theme and invalidate cached handles.
    pub fn set_theme(&mut self, theme: Option<String>) {
        if self.theme != theme {
            log::debug!("DirectoryIconLoader: switching theme to {:?}", theme);
            self.theme = theme;
            self.cache.clear();
        }
    }

    /// Get the current theme name.
    pub fn theme(&self) -> Option<&str> {
        self.theme.as_deref()
    }

    /// The cache of resolved handles.
    pub fn cache(&self) -> &IconCache {
        &self.cache
    }

    fn resolve(&self, key: IconKey, candidates: &[&str]) -> Result<IconResource, ResourceError> {
        if let Some(cached) = self.cache.get(&key) {
            log::debug!("DirectoryIconLoader: cache hit for '{}'", key.path);
            return Ok(cached);
        }

        let mut result = Err(ResourceError::NotFound(key.path.clone()));
        for candidate in candidates {
            result = self.lookup.lookup(candidate, self.theme());
            if result.is_ok() {
                break;
            }
        }

        let file = result?;
        let icon = IconResource::new(file.to_string_lossy(), key.width, key.height)
            .with_patched(key.patched)
            .with_appearance(key.appearance);
        self.cache.put(key, icon.clone());
        Ok(icon)
    }
}

impl ResourceLoader for DirectoryIconLoader {
    fn load_icon(
        &self,
        path: &str,
        width: u32,
        height: u32,
        patched: bool,
    ) -> Result<IconResource, ResourceError> {
        let key =
            IconKey::new(path, width, height, patched, Appearance::Neutral).for_theme(self.theme());
        self.resolve(key, &[path])
    }

    fn load_aware_icon(
        &self,
        path: &str,
        width: u32,
        height: u32,
    ) -> Result<AwareIcon, ResourceError> {
        let (light_path, dark_path) = aware_locations(path);
        let light = self.resolve(
            IconKey::new(path, width, height, false, Appearance::Light).for_theme(self.theme()),
            &[&light_path, path],
        )?;
        let dark = self.resolve(
            IconKey::new(path, width, height, false, Appearance::Dark).for_theme(self.theme()),
            &[&dark_path, path],
        )?;
        Ok(AwareIcon::new(light, dark))
    }
}
