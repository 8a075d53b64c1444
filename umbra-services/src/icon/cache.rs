// SPDX-License-Identifier: LGPL-3.0-only
//! LRU cache for resolved icon handles.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use lru::LruCache;
use umbra_defaults::resource::{Appearance, IconResource};

/// Default number of cached handles.
pub const DEFAULT_CACHE_SIZE: usize = 256;

/// Cache key: logical path, dimension, variant and theme.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IconKey {
    /// Logical icon path as written in the defaults source.
    pub path: String,
    /// Requested width.
    pub width: u32,
    /// Requested height.
    pub height: u32,
    /// Whether the theme-patched rendition was requested.
    pub patched: bool,
    /// The requested appearance.
    pub appearance: Appearance,
    /// The theme subdirectory the handle was resolved in.
    pub theme: Option<String>,
}

impl IconKey {
    /// Create a key.
    pub fn new(path: &str, width: u32, height: u32, patched: bool, appearance: Appearance) -> Self {
        Self {
            path: path.to_string(),
            width,
            height,
            patched,
            appearance,
            theme: None,
        }
    }

    /// Scope the key to a theme.
    pub fn for_theme(mut self, theme: Option<&str>) -> Self {
        self.theme = theme.map(str::to_string);
        self
    }
}

/// Cache of icon handles, owned by a loader.
///
/// Cheap to clone; clones share the same storage. Keys carry the theme, but
/// not the search roots: loaders sharing a cache must search the same roots.
#[derive(Clone)]
pub struct IconCache {
    cache: Arc<Mutex<LruCache<IconKey, IconResource>>>,
}

impl IconCache {
    /// Create a cache holding at most `capacity` handles.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    /// Get a cached handle.
    pub fn get(&self, key: &IconKey) -> Option<IconResource> {
        match self.cache.lock() {
            Ok(mut cache) => cache.get(key).cloned(),
            Err(_) => None,
        }
    }

    /// Store a handle.
    pub fn put(&self, key: IconKey, icon: IconResource) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.put(key, icon);
        }
    }

    /// Number of cached handles.
    pub fn len(&self) -> usize {
        self.cache.lock().map(|cache| cache.len()).unwrap_or(0)
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if a handle is cached.
    pub fn contains(&self, key: &IconKey) -> bool {
        self.cache
            .lock()
            .map(|cache| cache.contains(key))
            .unwrap_or(false)
    }

    /// Drop every cached handle.
    pub fn clear(&self) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.clear();
        }
    }
}

impl Default for IconCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(path: &str, size: u32) -> IconKey {
        IconKey::new(path, size, size, false, Appearance::Neutral)
    }

    #[test]
    fn test_put_get() {
        let cache = IconCache::default();
        cache.put(key("icons/a", 16), IconResource::new("/icons/a.svg", 16, 16));

        assert!(cache.contains(&key("icons/a", 16)));
        assert!(!cache.contains(&key("icons/a", 24)));
        assert_eq!(
            cache.get(&key("icons/a", 16)).map(|icon| icon.location),
            Some("/icons/a.svg".to_string())
        );
    }

    #[test]
    fn test_variant_is_part_of_key() {
        let cache = IconCache::default();
        cache.put(key("icons/a", 16), IconResource::new("/a.svg", 16, 16));
        let patched = IconKey::new("icons/a", 16, 16, true, Appearance::Neutral);
        assert!(cache.get(&patched).is_none());
    }

    #[test]
    fn test_theme_is_part_of_key() {
        let cache = IconCache::default();
        cache.put(key("icons/a", 16), IconResource::new("/a.svg", 16, 16));
        assert!(!cache.contains(&key("icons/a", 16).for_theme(Some("darcula"))));
        assert!(cache.contains(&key("icons/a", 16).for_theme(None)));
    }

    #[test]
    fn test_eviction_and_clear() {
        let cache = IconCache::new(2);
        cache.put(key("a", 16), IconResource::new("a", 16, 16));
        cache.put(key("b", 16), IconResource::new("b", 16, 16));
        cache.put(key("c", 16), IconResource::new("c", 16, 16));
        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(&key("a", 16)));

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_zero_capacity_holds_one() {
        let cache = IconCache::new(0);
        cache.put(key("a", 16), IconResource::new("a", 16, 16));
        assert_eq!(cache.len(), 1);
    }
}
