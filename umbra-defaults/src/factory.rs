//! # Instance Factories
//!
//! Keys ending in `.border`/`Border`, `.component`/`Component` or `Renderer`
//! name a type to construct. Construction goes through a closed registry of
//! named zero-argument factories: every constructible type must be registered
//! under the name used in the properties source.
//!
//! ```rust
//! use umbra_defaults::factory::FactoryRegistry;
//!
//! #[derive(Default)]
//! struct RoundedBorder;
//!
//! let mut registry = FactoryRegistry::new();
//! registry.register_default::<RoundedBorder>("ui.border.RoundedBorder");
//!
//! let instance = registry.instantiate("ui.border.RoundedBorder").unwrap();
//! assert!(instance.downcast_ref::<RoundedBorder>().is_some());
//! ```

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::ParseError;

type Factory = dyn Fn() -> Result<Arc<dyn Any + Send + Sync>, String> + Send + Sync;

/// An object constructed from a type name.
///
/// Clones share the underlying object.
#[derive(Clone)]
pub struct Instance {
    type_name: String,
    object: Arc<dyn Any + Send + Sync>,
}

impl Instance {
    /// Wrap an already constructed object.
    pub fn new<T: Any + Send + Sync>(type_name: impl Into<String>, object: T) -> Self {
        Self {
            type_name: type_name.into(),
            object: Arc::new(object),
        }
    }

    /// The name the object was constructed from.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Borrow the object as `T`.
    pub fn downcast_ref<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.object.downcast_ref::<T>()
    }

    /// Share the object as `T`.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.object.clone().downcast::<T>().ok()
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name && Arc::ptr_eq(&self.object, &other.object)
    }
}

/// A registry of named zero-argument factories.
#[derive(Clone, Default)]
pub struct FactoryRegistry {
    factories: HashMap<String, Arc<Factory>>,
}

impl FactoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register an infallible factory under `type_name`, replacing any previous one.
    pub fn register<T, F>(&mut self, type_name: impl Into<String>, factory: F)
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.insert(
            type_name.into(),
            Arc::new(move || Ok::<_, String>(Arc::new(factory()) as Arc<dyn Any + Send + Sync>)),
        );
    }

    /// Register a factory that may fail to construct its object.
    pub fn register_fallible<T, E, F>(&mut self, type_name: impl Into<String>, factory: F)
    where
        T: Any + Send + Sync,
        E: fmt::Display,
        F: Fn() -> Result<T, E> + Send + Sync + 'static,
    {
        self.insert(
            type_name.into(),
            Arc::new(move || {
                factory()
                    .map(|object| Arc::new(object) as Arc<dyn Any + Send + Sync>)
                    .map_err(|e| e.to_string())
            }),
        );
    }

    /// Register `T::default` under `type_name`.
    pub fn register_default<T>(&mut self, type_name: impl Into<String>)
    where
        T: Any + Default + Send + Sync,
    {
        self.register(type_name, T::default);
    }

    fn insert(&mut self, type_name: String, factory: Arc<Factory>) {
        if self.factories.insert(type_name.clone(), factory).is_some() {
            log::debug!("FactoryRegistry: replaced factory for '{}'", type_name);
        }
    }

    /// Check if a factory is registered under `type_name`.
    pub fn contains(&self, type_name: &str) -> bool {
        self.factories.contains_key(type_name)
    }

    /// Number of registered factories.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Construct the object registered under `type_name`.
    pub fn instantiate(&self, type_name: &str) -> Result<Instance, ParseError> {
        let factory = self
            .factories
            .get(type_name)
            .ok_or_else(|| ParseError::UnknownType(type_name.to_string()))?;

        let object = factory().map_err(|message| ParseError::Instantiation {
            type_name: type_name.to_string(),
            message,
        })?;

        Ok(Instance {
            type_name: type_name.to_string(),
            object,
        })
    }
}

impl fmt::Debug for FactoryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.factories.keys().collect();
        names.sort();
        f.debug_struct("FactoryRegistry")
            .field("types", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct LineBorder {
        thickness: i32,
    }

    #[test]
    fn test_register_and_instantiate() {
        let mut registry = FactoryRegistry::new();
        registry.register("ui.LineBorder", || LineBorder { thickness: 2 });

        let instance = registry.instantiate("ui.LineBorder").unwrap();
        assert_eq!(instance.type_name(), "ui.LineBorder");
        assert_eq!(
            instance.downcast_ref::<LineBorder>(),
            Some(&LineBorder { thickness: 2 })
        );
        assert!(instance.downcast_ref::<String>().is_none());
    }

    #[test]
    fn test_unknown_type() {
        let registry = FactoryRegistry::new();
        assert_eq!(
            registry.instantiate("ui.Missing").unwrap_err(),
            ParseError::UnknownType("ui.Missing".into())
        );
    }

    #[test]
    fn test_failing_factory() {
        let mut registry = FactoryRegistry::new();
        registry.register_fallible("ui.Broken", || Err::<LineBorder, _>("no display"));

        match registry.instantiate("ui.Broken") {
            Err(ParseError::Instantiation { type_name, message }) => {
                assert_eq!(type_name, "ui.Broken");
                assert_eq!(message, "no display");
            },
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_each_instantiation_is_fresh() {
        let mut registry = FactoryRegistry::new();
        registry.register_default::<LineBorder>("ui.LineBorder");

        let first = registry.instantiate("ui.LineBorder").unwrap();
        let second = registry.instantiate("ui.LineBorder").unwrap();
        assert_ne!(first, second);
        assert_eq!(first.clone(), first);
    }
}
