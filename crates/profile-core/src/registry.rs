//! Scope factory registry
//!
//! Maps scope type names to constructors so that scopes can be built from
//! serialized configuration. The registry is an ordinary value owned by the
//! caller; resolution never consults it.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::scope::{Api, Environment, ScopeRef, Tag};
use crate::{Error, Result};

/// Constructor for a scope from its value string.
pub type ScopeFactory = Arc<dyn Fn(&str) -> Result<ScopeRef> + Send + Sync>;

/// Registry mapping scope type names to factories.
///
/// # Example
///
/// ```
/// use profile_core::ScopeRegistry;
/// use profile_core::scope::{NamedScope, ScopeRef};
/// use std::sync::Arc;
///
/// let mut registry = ScopeRegistry::with_builtins();
/// registry.register("region", |name| Ok(Arc::new(NamedScope::new("region", name, 30)?) as ScopeRef));
///
/// let scope = registry.resolve("region", "eu-west").unwrap();
/// assert_eq!(scope.precedence(), 30);
/// assert!(registry.has_type("api"));
/// ```
#[derive(Clone, Default)]
pub struct ScopeRegistry {
    factories: HashMap<String, ScopeFactory>,
}

impl ScopeRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Create a registry with the named built-in scopes registered.
    ///
    /// Currently registers:
    /// - `api` -> [`Api`]
    /// - `environment` -> [`Environment`]
    /// - `tag` -> [`Tag`] at its default precedence
    ///
    /// `global` and `composite` are structural and are not looked up here.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Api::TYPE, |name| Ok(Arc::new(Api::new(name)?) as ScopeRef));
        registry.register(Environment::TYPE, |name| {
            Ok(Arc::new(Environment::new(name)?) as ScopeRef)
        });
        registry.register(Tag::TYPE, |name| Ok(Arc::new(Tag::new(name)?) as ScopeRef));
        registry
    }

    /// Register a factory for a scope type.
    ///
    /// If the type was already registered, the previous factory is replaced.
    pub fn register<F>(&mut self, scope_type: impl Into<String>, factory: F)
    where
        F: Fn(&str) -> Result<ScopeRef> + Send + Sync + 'static,
    {
        let scope_type = scope_type.into();
        tracing::debug!(%scope_type, "Registering scope factory");
        self.factories.insert(scope_type, Arc::new(factory));
    }

    /// Build a scope of the given type.
    ///
    /// Fails with [`Error::UnknownScopeType`] when no factory is registered;
    /// factory errors are passed through.
    pub fn resolve(&self, scope_type: &str, value: &str) -> Result<ScopeRef> {
        let factory = self
            .factories
            .get(scope_type)
            .ok_or_else(|| Error::UnknownScopeType {
                scope_type: scope_type.to_string(),
            })?;
        factory(value)
    }

    /// Check if a factory is registered for a scope type.
    pub fn has_type(&self, scope_type: &str) -> bool {
        self.factories.contains_key(scope_type)
    }

    /// List all registered scope types, sorted.
    pub fn list_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.factories.keys().cloned().collect();
        types.sort();
        types
    }

    /// Get the number of registered scope types.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for ScopeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeRegistry")
            .field("types", &self.list_types())
            .finish()
    }
}
