#![warn(missing_docs)]

//! Typed theme defaults from look-and-feel property sources.

pub use umbra_defaults as defaults;
#[cfg(feature = "services")]
pub use umbra_services as services;

/// A "prelude" for users of umbra.
///
/// Importing this module brings into scope the types needed to load a
/// defaults source and read values back.
///
/// ```rust
/// use umbra::prelude::*;
///
/// let loader = LazyResourceLoader::new();
/// let factories = FactoryRegistry::new();
/// let table = DefaultsBuilder::new(&loader, &factories).build([("Button.arc", "8")]);
/// assert_eq!(table.int("Button.arc"), Some(8));
/// ```
pub mod prelude {
    pub use crate::defaults::builder::{DefaultsBuilder, ThemeLayer};
    pub use crate::defaults::config::EngineConfig;
    pub use crate::defaults::error::{LoadWarning, WarningKind};
    pub use crate::defaults::factory::FactoryRegistry;
    pub use crate::defaults::properties::{PropertiesSource, RawEntry};
    pub use crate::defaults::resource::{LazyResourceLoader, ResourceLoader};
    pub use crate::defaults::table::DefaultsTable;
    pub use crate::defaults::value::{Color, FontSpec, Insets, ResolvedValue, SizeSpec};

    #[cfg(feature = "services")]
    pub use crate::services::DirectoryIconLoader;
}
