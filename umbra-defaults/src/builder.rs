//! # Defaults Table Builder
//!
//! Folds an ordered sequence of [RawEntry]s into a [DefaultsTable].
//!
//! For every entry, in declaration order:
//!
//! 1. the literal `null` resolves to [ResolvedValue::Null] for any key
//! 2. the key is [classified](crate::classify::classify) by its suffix
//! 3. scalar keys and `%name` references go through the scalar fallback chain;
//!    other kinds go through their typed parser
//! 4. a failed typed parser falls back to the scalar chain; if the chain only
//!    yields the raw string, the entry is recorded as unresolved (fonts get
//!    the configured fallback font instead) and a warning is logged
//! 5. the value is inserted, replacing any earlier value of the same key, and
//!    becomes visible to later references
//!
//! No entry can abort the fold.
//!
//! ## Usage
//!
//! ```rust
//! use umbra_defaults::builder::DefaultsBuilder;
//! use umbra_defaults::factory::FactoryRegistry;
//! use umbra_defaults::resource::LazyResourceLoader;
//!
//! let loader = LazyResourceLoader::new();
//! let factories = FactoryRegistry::new();
//! let builder = DefaultsBuilder::new(&loader, &factories);
//!
//! let table = builder.build_source("background = 3c3f41\nPanel.background = %background\n");
//! assert_eq!(table.color("Panel.background"), table.color("background"));
//! ```

use indexmap::IndexMap;

use crate::classify::{classify, ValueKind};
use crate::config::EngineConfig;
use crate::error::{LoadWarning, ParseError, WarningKind};
use crate::factory::FactoryRegistry;
use crate::icon::{parse_icon_spec, ThemedIcon};
use crate::parse::{parse_font, parse_insets, parse_scalar, parse_size};
use crate::properties::{PropertiesSource, RawEntry};
use crate::reference::{reference_target, ChainedScope, ReferenceScope};
use crate::resource::ResourceLoader;
use crate::table::DefaultsTable;
use crate::value::ResolvedValue;

const NULL_LITERAL: &str = "null";

/// The outcome of resolving a single declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The value to record.
    pub value: ResolvedValue,
    /// The warning to record alongside it, if any.
    pub warning: Option<ParseError>,
}

impl Resolution {
    fn resolved(value: ResolvedValue) -> Self {
        Self {
            value,
            warning: None,
        }
    }

    fn failed(error: ParseError) -> Self {
        Self {
            value: ResolvedValue::unresolved(error.unresolved_reason()),
            warning: Some(error),
        }
    }
}

/// A named layer of a theme stack, such as a base theme or an accent override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeLayer {
    /// Layer name, used in diagnostics.
    pub name: String,
    /// Declarations of the layer.
    pub entries: Vec<RawEntry>,
}

impl ThemeLayer {
    /// Create a layer from entries.
    pub fn new<I, E>(name: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<RawEntry>,
    {
        Self {
            name: name.into(),
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a layer from properties text.
    pub fn from_source(name: impl Into<String>, content: &str) -> Self {
        Self {
            name: name.into(),
            entries: PropertiesSource::parse(content),
        }
    }
}

/// Builds [DefaultsTable]s from properties declarations.
pub struct DefaultsBuilder<'a> {
    loader: &'a dyn ResourceLoader,
    factories: &'a FactoryRegistry,
    config: EngineConfig,
}

impl<'a> DefaultsBuilder<'a> {
    /// Create a builder with the default configuration.
    pub fn new(loader: &'a dyn ResourceLoader, factories: &'a FactoryRegistry) -> Self {
        Self {
            loader,
            factories,
            config: EngineConfig::default(),
        }
    }

    /// Use `config` instead of the default configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// The configuration in use.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Build a table from entries in declaration order.
    pub fn build<I, E>(&self, entries: I) -> DefaultsTable
    where
        I: IntoIterator<Item = E>,
        E: Into<RawEntry>,
    {
        self.fold(entries.into_iter().map(Into::into), None)
    }

    /// Build a table from properties text.
    pub fn build_source(&self, content: &str) -> DefaultsTable {
        self.build(PropertiesSource::parse(content))
    }

    /// Build and merge layers in priority order, later layers winning.
    ///
    /// References in a layer see that layer's earlier entries first, then
    /// everything merged from the layers before it.
    pub fn build_layers<I>(&self, layers: I) -> DefaultsTable
    where
        I: IntoIterator<Item = ThemeLayer>,
    {
        let mut merged = DefaultsTable::new();
        for layer in layers {
            let table = self.fold(layer.entries.into_iter(), Some(&merged));
            log::debug!(
                "DefaultsBuilder: layer '{}' resolved {} keys with {} warnings",
                layer.name,
                table.len(),
                table.warnings().len()
            );
            merged = merged.merge(table);
        }
        merged
    }

    /// Resolve a single declaration against `scope`.
    pub fn resolve_value(&self, key: &str, value: &str, scope: &dyn ReferenceScope) -> Resolution {
        if value == NULL_LITERAL {
            return Resolution::resolved(ResolvedValue::Null);
        }

        let kind = classify(key);
        if kind == ValueKind::Scalar || reference_target(value).is_some() {
            return match parse_scalar(value, scope) {
                Ok(resolved) => Resolution::resolved(resolved),
                Err(error) => Resolution::failed(error),
            };
        }

        let typed = match kind {
            ValueKind::Insets => parse_insets(value).map(ResolvedValue::Insets),
            ValueKind::Size => parse_size(value).map(ResolvedValue::Size),
            ValueKind::Font => parse_font(value).map(ResolvedValue::Font),
            ValueKind::Instance => self
                .factories
                .instantiate(value.trim())
                .map(ResolvedValue::Instance),
            ValueKind::Icon => parse_icon_spec(value, self.config.icon_size())
                .and_then(|spec| ThemedIcon::resolve(spec, self.loader))
                .map(ResolvedValue::Icon),
            ValueKind::Scalar => parse_scalar(value, scope),
        };

        match typed {
            Ok(resolved) => Resolution::resolved(resolved),
            Err(error) => self.recover(key, kind, value, error, scope),
        }
    }

    /// Last resort after a typed parser failed.
    fn recover(
        &self,
        key: &str,
        kind: ValueKind,
        value: &str,
        error: ParseError,
        scope: &dyn ReferenceScope,
    ) -> Resolution {
        match parse_scalar(value, scope) {
            Ok(ResolvedValue::String(_)) => {},
            Ok(rescued) => {
                log::debug!("DefaultsBuilder: '{}' ({}), using scalar value", key, error);
                return Resolution::resolved(rescued);
            },
            Err(chain_error) => return Resolution::failed(chain_error),
        }

        if kind == ValueKind::Font {
            return Resolution {
                value: ResolvedValue::Font(self.config.fallback_font()),
                warning: Some(error),
            };
        }
        Resolution::failed(error)
    }

    fn fold(
        &self,
        entries: impl Iterator<Item = RawEntry>,
        base: Option<&DefaultsTable>,
    ) -> DefaultsTable {
        let base = base.map(|table| table as &dyn ReferenceScope);
        let mut table = DefaultsTable::new();
        let mut pending: IndexMap<String, String> = IndexMap::new();

        for RawEntry { key, value } in entries {
            let resolution = self.resolve_value(&key, &value, &ChainedScope::new(&table, base));

            pending.shift_remove(&key);
            if resolution.value.is_unresolved() && reference_target(&value).is_some() {
                pending.insert(key.clone(), value);
            }
            if let Some(error) = resolution.warning {
                table.push_warning(LoadWarning::new(key.clone(), error));
            }
            table.insert(key, resolution.value);
        }

        if self.config.references.second_pass && !pending.is_empty() {
            self.second_pass(&mut table, pending, base);
        }
        table
    }

    /// Retry pending references against the complete table until nothing changes.
    fn second_pass(
        &self,
        table: &mut DefaultsTable,
        mut pending: IndexMap<String, String>,
        base: Option<&dyn ReferenceScope>,
    ) {
        loop {
            let before = pending.len();
            pending.retain(|key, value| {
                let resolution = self.resolve_value(key, value, &ChainedScope::new(&*table, base));
                if resolution.value.is_unresolved() {
                    return true;
                }
                log::debug!("DefaultsBuilder: second pass resolved '{}'", key);
                table.retract_warning(key, WarningKind::UnresolvedReference);
                if let Some(error) = resolution.warning {
                    table.push_warning(LoadWarning::new(key.clone(), error));
                }
                table.insert(key.clone(), resolution.value);
                false
            });
            if pending.is_empty() || pending.len() == before {
                break;
            }
        }

        for key in pending.keys() {
            log::debug!("DefaultsBuilder: '{}' is still unresolved after second pass", key);
        }
    }
}
