//! Tests for the filesystem icon loader

use std::fs;
use std::path::Path;

use umbra_defaults::builder::DefaultsBuilder;
use umbra_defaults::config::EngineConfig;
use umbra_defaults::error::WarningKind;
use umbra_defaults::factory::FactoryRegistry;
use umbra_defaults::resource::{Appearance, ResourceError, ResourceLoader};
use umbra_services::icon::{DirectoryIconLoader, IconCache, IconKey};

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"<svg/>").unwrap();
}

#[test]
fn test_plain_icon_cached() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "icons/close.svg");

    let loader = DirectoryIconLoader::new(vec![dir.path().to_path_buf()]);
    let icon = loader.load_icon("icons/close", 16, 16, false).unwrap();
    assert_eq!(Path::new(&icon.location), dir.path().join("icons/close.svg"));
    assert!(loader
        .cache()
        .contains(&IconKey::new("icons/close", 16, 16, false, Appearance::Neutral)));

    // cached handles survive the file going away
    fs::remove_file(dir.path().join("icons/close.svg")).unwrap();
    assert!(loader.load_icon("icons/close", 16, 16, false).is_ok());
    assert!(matches!(
        loader.load_icon("icons/close", 24, 24, false),
        Err(ResourceError::NotFound(_))
    ));
}

#[test]
fn test_aware_renditions() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "light/icons/folder.svg");
    touch(dir.path(), "dark/icons/folder.svg");
    touch(dir.path(), "icons/file.png");

    let loader = DirectoryIconLoader::new(vec![dir.path().to_path_buf()]);

    let folder = loader.load_aware_icon("icons/folder", 16, 16).unwrap();
    assert_eq!(Path::new(&folder.light().location), dir.path().join("light/icons/folder.svg"));
    assert_eq!(Path::new(&folder.dark().location), dir.path().join("dark/icons/folder.svg"));
    assert_eq!(folder.dark().appearance, Appearance::Dark);

    // without light/dark files both renditions use the plain file
    let file = loader.load_aware_icon("icons/file", 16, 16).unwrap();
    assert_eq!(file.light().location, file.dark().location);
}

#[test]
fn test_set_theme_clears_cache() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "icons/close.svg");
    touch(dir.path(), "darcula/icons/close.svg");

    let mut loader = DirectoryIconLoader::new(vec![dir.path().to_path_buf()]);
    let plain = loader.load_icon("icons/close", 16, 16, false).unwrap();
    assert_eq!(loader.cache().len(), 1);

    loader.set_theme(Some("darcula".to_string()));
    assert_eq!(loader.theme(), Some("darcula"));
    assert!(loader.cache().is_empty());

    let themed = loader.load_icon("icons/close", 16, 16, false).unwrap();
    assert_ne!(plain.location, themed.location);
    assert_eq!(Path::new(&themed.location), dir.path().join("darcula/icons/close.svg"));
}

#[test]
fn test_shared_cache_keeps_themes_apart() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "icons/close.svg");
    touch(dir.path(), "darcula/icons/close.svg");

    let cache = IconCache::default();
    let plain =
        DirectoryIconLoader::new(vec![dir.path().to_path_buf()]).with_cache(cache.clone());
    let themed = DirectoryIconLoader::new(vec![dir.path().to_path_buf()])
        .with_cache(cache.clone())
        .with_theme("darcula");

    let first = plain.load_icon("icons/close", 16, 16, false).unwrap();
    let second = themed.load_icon("icons/close", 16, 16, false).unwrap();
    assert_eq!(Path::new(&first.location), dir.path().join("icons/close.svg"));
    assert_eq!(Path::new(&second.location), dir.path().join("darcula/icons/close.svg"));
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_builder_with_directory_loader() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "icons/tree/open.svg");
    touch(dir.path(), "dark/icons/tree/leaf.svg");
    touch(dir.path(), "icons/tree/leaf.svg");

    let config = EngineConfig::new().with_icon_root(dir.path());
    let loader = DirectoryIconLoader::from_config(&config);
    let factories = FactoryRegistry::new();
    let table = DefaultsBuilder::new(&loader, &factories)
        .with_config(config)
        .build_source(
            "Tree.openIcon = icons/tree/open(12,12)[patch]\n\
             Tree.leafIcon = icons/tree/leaf[dual]\n\
             Tree.closedIcon = icons/tree/closed\n",
        );

    let open = table.icon("Tree.openIcon").unwrap();
    let rendition = open.rendition(false).unwrap();
    assert!(rendition.patched);
    assert_eq!((rendition.width, rendition.height), (12, 12));

    let leaf = table.icon("Tree.leafIcon").unwrap();
    let dark = leaf.rendition_for(Appearance::Dark).unwrap();
    assert_eq!(Path::new(&dark.location), dir.path().join("dark/icons/tree/leaf.svg"));

    assert!(table.get("Tree.closedIcon").unwrap().is_unresolved());
    assert_eq!(
        table.warnings_of(WarningKind::RecoverableParseFailure).count(),
        1
    );
}
