//! `%name` references between entries.
//!
//! A reference resolves to a copy of the value already recorded under `name`
//! in declaration order. A target declared later is not visible and the
//! reference stays unresolved.

use crate::error::ParseError;
use crate::value::ResolvedValue;

/// Marker that introduces a reference.
pub const REFERENCE_PREFIX: char = '%';

/// A view of already-resolved values that references can point into.
pub trait ReferenceScope {
    /// Look up the value recorded under `name`.
    fn lookup(&self, name: &str) -> Option<&ResolvedValue>;
}

/// The target name of a reference value, or `None` if `value` is not a reference.
pub fn reference_target(value: &str) -> Option<&str> {
    value.strip_prefix(REFERENCE_PREFIX)
}

/// Resolve the reference target `name` against `scope`.
///
/// A target that is present but unresolved fails as well.
pub fn resolve(name: &str, scope: &dyn ReferenceScope) -> Result<ResolvedValue, ParseError> {
    match scope.lookup(name) {
        None => Err(ParseError::ForwardReference(name.to_string())),
        Some(value) if value.is_unresolved() => Err(ParseError::UnresolvedTarget(name.to_string())),
        Some(value) => Ok(value.clone()),
    }
}

/// Scope that consults `primary` first, then `fallback`.
pub struct ChainedScope<'a> {
    primary: &'a dyn ReferenceScope,
    fallback: Option<&'a dyn ReferenceScope>,
}

impl<'a> ChainedScope<'a> {
    /// Chain two scopes.
    pub fn new(primary: &'a dyn ReferenceScope, fallback: Option<&'a dyn ReferenceScope>) -> Self {
        Self { primary, fallback }
    }
}

impl ReferenceScope for ChainedScope<'_> {
    fn lookup(&self, name: &str) -> Option<&ResolvedValue> {
        self.primary
            .lookup(name)
            .or_else(|| self.fallback.and_then(|scope| scope.lookup(name)))
    }
}

impl ReferenceScope for std::collections::HashMap<String, ResolvedValue> {
    fn lookup(&self, name: &str) -> Option<&ResolvedValue> {
        self.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_reference_target() {
        assert_eq!(reference_target("%background"), Some("background"));
        assert_eq!(reference_target("%"), Some(""));
        assert_eq!(reference_target("background"), None);
    }

    #[test]
    fn test_resolve_present_and_missing() {
        let mut scope = HashMap::new();
        scope.insert("b".to_string(), ResolvedValue::Integer(42));

        assert_eq!(resolve("b", &scope), Ok(ResolvedValue::Integer(42)));
        assert_eq!(
            resolve("c", &scope),
            Err(ParseError::ForwardReference("c".into()))
        );
    }

    #[test]
    fn test_resolve_unresolved_target() {
        let mut scope = HashMap::new();
        scope.insert("c".to_string(), ResolvedValue::unresolved("forward-reference"));

        assert_eq!(
            resolve("c", &scope),
            Err(ParseError::UnresolvedTarget("c".into()))
        );
    }

    #[test]
    fn test_chained_scope_prefers_primary() {
        let mut primary = HashMap::new();
        primary.insert("x".to_string(), ResolvedValue::Integer(2));
        let mut fallback = HashMap::new();
        fallback.insert("x".to_string(), ResolvedValue::Integer(1));
        fallback.insert("y".to_string(), ResolvedValue::Bool(true));

        let scope = ChainedScope::new(&primary, Some(&fallback));
        assert_eq!(scope.lookup("x"), Some(&ResolvedValue::Integer(2)));
        assert_eq!(scope.lookup("y"), Some(&ResolvedValue::Bool(true)));
        assert_eq!(scope.lookup("z"), None);
    }
}
