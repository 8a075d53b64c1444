use std::any::Any;

use indexmap::IndexMap;

use crate::error::{LoadWarning, WarningKind};
use crate::factory::Instance;
use crate::icon::ThemedIcon;
use crate::reference::ReferenceScope;
use crate::value::{Color, FontSpec, Insets, ResolvedValue, SizeSpec};

/// The typed result of a load pass.
///
/// Keys are unique and iterate in the order they were first declared.
/// Alongside the values the table keeps every warning raised while it was
/// built. Tables are only produced by the
/// [DefaultsBuilder](crate::builder::DefaultsBuilder) and by [merging](DefaultsTable::merge);
/// there is no way to mutate one afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefaultsTable {
    values: IndexMap<String, ResolvedValue>,
    warnings: Vec<LoadWarning>,
}

impl DefaultsTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            values: IndexMap::new(),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn insert(&mut self, key: impl Into<String>, value: ResolvedValue) {
        self.values.insert(key.into(), value);
    }

    pub(crate) fn push_warning(&mut self, warning: LoadWarning) {
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }

    /// Drop the most recent warning of `kind` recorded for `key`.
    pub(crate) fn retract_warning(&mut self, key: &str, kind: WarningKind) {
        if let Some(index) = self
            .warnings
            .iter()
            .rposition(|w| w.key == key && w.kind() == kind)
        {
            self.warnings.remove(index);
        }
    }

    /// Merge `other` over `self`: on a key collision the value from `other` wins.
    ///
    /// Warnings of `self` about keys that `other` overrides are dropped with
    /// the values they describe. The rest are kept, those of `self` first.
    pub fn merge(mut self, other: DefaultsTable) -> Self {
        self.warnings.retain(|w| !other.values.contains_key(&w.key));
        for (key, value) in other.values {
            self.values.insert(key, value);
        }
        self.warnings.extend(other.warnings);
        self
    }

    /// Merge tables in priority order, later tables winning.
    pub fn merge_all<I: IntoIterator<Item = DefaultsTable>>(tables: I) -> Self {
        tables
            .into_iter()
            .fold(DefaultsTable::new(), DefaultsTable::merge)
    }

    /// Get a value.
    pub fn get(&self, key: &str) -> Option<&ResolvedValue> {
        self.values.get(key)
    }

    /// Check if a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the table has no keys.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over keys and values in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResolvedValue)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Iterate over keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Warnings raised while building, in the order they occurred.
    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }

    /// Warnings of one category.
    pub fn warnings_of(&self, kind: WarningKind) -> impl Iterator<Item = &LoadWarning> {
        self.warnings.iter().filter(move |w| w.kind() == kind)
    }

    /// Keys whose value is unresolved.
    pub fn unresolved_keys(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, value)| value.is_unresolved())
            .map(|(key, _)| key)
    }

    /// Get a color.
    pub fn color(&self, key: &str) -> Option<Color> {
        self.get(key).and_then(ResolvedValue::as_color)
    }

    /// Get an integer.
    pub fn int(&self, key: &str) -> Option<i32> {
        self.get(key).and_then(ResolvedValue::as_int)
    }

    /// Get a boolean.
    pub fn bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(ResolvedValue::as_bool)
    }

    /// Get a string.
    pub fn string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ResolvedValue::as_str)
    }

    /// Get insets.
    pub fn insets(&self, key: &str) -> Option<Insets> {
        self.get(key).and_then(ResolvedValue::as_insets)
    }

    /// Get a size.
    pub fn size(&self, key: &str) -> Option<SizeSpec> {
        self.get(key).and_then(ResolvedValue::as_size)
    }

    /// Get a font.
    pub fn font(&self, key: &str) -> Option<&FontSpec> {
        self.get(key).and_then(ResolvedValue::as_font)
    }

    /// Get an icon.
    pub fn icon(&self, key: &str) -> Option<&ThemedIcon> {
        self.get(key).and_then(ResolvedValue::as_icon)
    }

    /// Get a constructed instance.
    pub fn instance(&self, key: &str) -> Option<&Instance> {
        self.get(key).and_then(ResolvedValue::as_instance)
    }

    /// Get a constructed instance downcast to `T`.
    pub fn instance_as<T: Any + Send + Sync>(&self, key: &str) -> Option<&T> {
        self.get(key).and_then(ResolvedValue::instance_as::<T>)
    }
}

impl ReferenceScope for DefaultsTable {
    fn lookup(&self, name: &str) -> Option<&ResolvedValue> {
        self.get(name)
    }
}

impl<'a> IntoIterator for &'a DefaultsTable {
    type Item = (&'a String, &'a ResolvedValue);
    type IntoIter = indexmap::map::Iter<'a, String, ResolvedValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
