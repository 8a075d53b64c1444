#![warn(missing_docs)]

//! # Umbra Defaults Engine
//!
//! Turns flat `key=value` theme declarations into a typed table of UI defaults.
//! Keys carry their type in their suffix (`Button.borderInsets`, `Label.font`,
//! `Tree.openIcon`), values may reference earlier keys with `%name`, and no
//! single malformed entry can abort a load.
//!
//! ## Overview
//!
//! - **[DefaultsBuilder](builder::DefaultsBuilder)**: folds declarations into a table
//! - **[DefaultsTable](table::DefaultsTable)**: the typed, ordered result plus its warnings
//! - **[EngineConfig](config::EngineConfig)**: icon size, fallback font and reference settings
//! - **[ResourceLoader](resource::ResourceLoader)**: where icon paths are turned into icons
//! - **[FactoryRegistry](factory::FactoryRegistry)**: the closed set of constructible types
//!
//! ## Quick Start
//!
//! ```rust
//! use umbra_defaults::builder::DefaultsBuilder;
//! use umbra_defaults::factory::FactoryRegistry;
//! use umbra_defaults::resource::LazyResourceLoader;
//! use umbra_defaults::value::{Color, Insets};
//!
//! let loader = LazyResourceLoader::new();
//! let factories = FactoryRegistry::new();
//! let table = DefaultsBuilder::new(&loader, &factories).build_source(
//!     "accent = 4a88c7\n\
//!      Button.focusColor = %accent\n\
//!      Button.borderInsets = 4,8,4,8\n\
//!      Button.font = Dialog-1-13\n",
//! );
//!
//! assert_eq!(table.color("Button.focusColor"), Some(Color::rgb(0x4a, 0x88, 0xc7)));
//! assert_eq!(table.insets("Button.borderInsets"), Some(Insets::new(4, 8, 4, 8)));
//! assert!(table.warnings().is_empty());
//! ```
//!
//! ## Layers
//!
//! A theme is usually a base file plus overrides. [build_layers](builder::DefaultsBuilder::build_layers)
//! resolves each layer against the layers beneath it and merges them, later
//! layers winning.
//!
//! ## Diagnostics
//!
//! Every recoverable failure is logged through the `log` facade at warn level
//! and kept on the table as a [LoadWarning](error::LoadWarning).

/// Contains the [builder::DefaultsBuilder] and theme layers.
pub mod builder;
/// Contains key suffix classification.
pub mod classify;
/// Contains the [config::EngineConfig] struct.
pub mod config;
/// Contains error and warning types.
pub mod error;
/// Contains the [factory::FactoryRegistry] for named instance types.
pub mod factory;
/// Contains icon path parsing and themed icons.
pub mod icon;
/// Contains typed value parsers and the scalar fallback chain.
pub mod parse;
/// Contains the properties text reader.
pub mod properties;
/// Contains `%name` reference resolution.
pub mod reference;
/// Contains the [resource::ResourceLoader] trait.
pub mod resource;
/// Contains the [table::DefaultsTable] struct.
pub mod table;
/// Contains small parsing utilities.
pub mod util;
/// Contains the resolved value types.
pub mod value;

pub use builder::{DefaultsBuilder, ThemeLayer};
pub use config::EngineConfig;
pub use error::{DefaultsError, LoadWarning, ParseError, WarningKind};
pub use table::DefaultsTable;
pub use value::ResolvedValue;
