// SPDX-License-Identifier: LGPL-3.0-only
//! Icon file lookup over a list of root directories.

use std::path::{Component, Path, PathBuf};

use umbra_defaults::resource::ResourceError;

/// Extensions tried, in order, for paths without one.
const EXTENSIONS: [&str; 2] = ["svg", "png"];

/// Finds icon files under a list of root directories.
#[derive(Debug, Clone, Default)]
pub struct IconLookup {
    search_paths: Vec<PathBuf>,
}

impl IconLookup {
    /// Create a lookup over `search_paths`, searched in order.
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }

    /// The search paths.
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Add a search path after the existing ones.
    pub fn add_search_path(&mut self, path: impl Into<PathBuf>) {
        self.search_paths.push(path.into());
    }

    /// Find the file for a logical icon path.
    ///
    /// With a theme, each root is tried as `<root>/<theme>/<path>` before
    /// `<root>/<path>`.
    pub fn lookup(&self, path: &str, theme: Option<&str>) -> Result<PathBuf, ResourceError> {
        let relative = Self::relative_path(path)?;

        for root in &self.search_paths {
            if let Some(theme) = theme {
                if let Some(found) = Self::lookup_in_dir(&root.join(theme), relative) {
                    log::debug!("IconLookup: Found icon '{}' in theme '{}' at {:?}", path, theme, found);
                    return Ok(found);
                }
            }
            if let Some(found) = Self::lookup_in_dir(root, relative) {
                log::debug!("IconLookup: Found icon '{}' at {:?}", path, found);
                return Ok(found);
            }
        }

        log::debug!("IconLookup: Icon '{}' not found in any search path", path);
        Err(ResourceError::NotFound(path.to_string()))
    }

    fn lookup_in_dir(dir: &Path, relative: &Path) -> Option<PathBuf> {
        let base = dir.join(relative);
        if relative.extension().is_some() && base.is_file() {
            return Some(base);
        }
        EXTENSIONS
            .iter()
            .map(|ext| {
                let mut candidate = base.clone().into_os_string();
                candidate.push(".");
                candidate.push(ext);
                PathBuf::from(candidate)
            })
            .find(|candidate| candidate.is_file())
    }

    /// Only plain relative paths may be looked up.
    fn relative_path(path: &str) -> Result<&Path, ResourceError> {
        let relative = Path::new(path.trim());
        let plain = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));
        if path.trim().is_empty() || !plain {
            return Err(ResourceError::InvalidPath(path.to_string()));
        }
        Ok(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"<svg/>").unwrap();
    }

    #[test]
    fn test_extension_order() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("icons/close.png"));
        touch(&dir.path().join("icons/close.svg"));

        let lookup = IconLookup::new(vec![dir.path().to_path_buf()]);
        assert_eq!(
            lookup.lookup("icons/close", None).unwrap(),
            dir.path().join("icons/close.svg")
        );
        assert_eq!(
            lookup.lookup("icons/close.png", None).unwrap(),
            dir.path().join("icons/close.png")
        );
    }

    #[test]
    fn test_theme_dir_preferred() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("icons/close.svg"));
        touch(&dir.path().join("darcula/icons/close.svg"));

        let lookup = IconLookup::new(vec![dir.path().to_path_buf()]);
        assert_eq!(
            lookup.lookup("icons/close", Some("darcula")).unwrap(),
            dir.path().join("darcula/icons/close.svg")
        );
        assert_eq!(
            lookup.lookup("icons/close", Some("solarized")).unwrap(),
            dir.path().join("icons/close.svg")
        );
    }

    #[test]
    fn test_roots_in_order() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        touch(&second.path().join("menu.svg"));

        let mut lookup = IconLookup::new(vec![first.path().to_path_buf()]);
        assert!(matches!(
            lookup.lookup("menu", None),
            Err(ResourceError::NotFound(_))
        ));

        lookup.add_search_path(second.path());
        assert_eq!(lookup.lookup("menu", None).unwrap(), second.path().join("menu.svg"));
    }

    #[test]
    fn test_rejects_escaping_paths() {
        let lookup = IconLookup::new(vec![PathBuf::from("/tmp")]);
        for path in ["", "../etc/passwd", "/etc/passwd", "icons/../../x"] {
            assert!(matches!(
                lookup.lookup(path, None),
                Err(ResourceError::InvalidPath(_))
            ));
        }
    }
}
