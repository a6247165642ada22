//! Built-in scope variants

use super::{Scope, normalize_name, precedence, requests_dimension, validate_type};
use crate::Result;

/// The catch-all scope. Matches every request at the lowest precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Global;

impl Global {
    pub const TYPE: &'static str = "global";
}

impl Scope for Global {
    fn scope_type(&self) -> &str {
        Self::TYPE
    }

    fn value(&self) -> Option<&str> {
        None
    }

    fn precedence(&self) -> u32 {
        precedence::GLOBAL
    }

    fn matches(&self, _requested: &dyn Scope) -> bool {
        true
    }
}

/// Scope for a single API, e.g. `api:payment`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Api {
    name: String,
}

impl Api {
    pub const TYPE: &'static str = "api";

    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = normalize_name(Self::TYPE, name.into())?;
        Ok(Self { name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Scope for Api {
    fn scope_type(&self) -> &str {
        Self::TYPE
    }

    fn value(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn precedence(&self) -> u32 {
        precedence::API
    }

    fn matches(&self, requested: &dyn Scope) -> bool {
        requests_dimension(requested, Self::TYPE, Some(&self.name))
    }
}

/// Scope for a deployment environment, e.g. `environment:prod`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Environment {
    name: String,
}

impl Environment {
    pub const TYPE: &'static str = "environment";

    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = normalize_name(Self::TYPE, name.into())?;
        Ok(Self { name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Scope for Environment {
    fn scope_type(&self) -> &str {
        Self::TYPE
    }

    fn value(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn precedence(&self) -> u32 {
        precedence::ENVIRONMENT
    }

    fn matches(&self, requested: &dyn Scope) -> bool {
        requests_dimension(requested, Self::TYPE, Some(&self.name))
    }
}

/// Free-form label scope with a configurable precedence.
///
/// Matching only looks at the tag name, so `Tag::new("beta")` applies to a
/// request for `Tag::with_precedence("beta", 40)` even though the two are not
/// equal scopes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    name: String,
    precedence: u32,
}

impl Tag {
    pub const TYPE: &'static str = "tag";

    /// Create a tag at [`precedence::TAG_DEFAULT`].
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Self::with_precedence(name, precedence::TAG_DEFAULT)
    }

    pub fn with_precedence(name: impl Into<String>, precedence: u32) -> Result<Self> {
        let name = normalize_name(Self::TYPE, name.into())?;
        Ok(Self { name, precedence })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Scope for Tag {
    fn scope_type(&self) -> &str {
        Self::TYPE
    }

    fn value(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn precedence(&self) -> u32 {
        self.precedence
    }

    fn matches(&self, requested: &dyn Scope) -> bool {
        requests_dimension(requested, Self::TYPE, Some(&self.name))
    }
}

/// A custom named dimension, typically built from a
/// [`ScopeRegistry`](crate::ScopeRegistry) factory.
///
/// Matches the same way the built-in named scopes do: a requested dimension
/// with the same type and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedScope {
    scope_type: String,
    name: String,
    precedence: u32,
}

impl NamedScope {
    pub fn new(scope_type: impl Into<String>, name: impl Into<String>, precedence: u32) -> Result<Self> {
        let scope_type = scope_type.into();
        validate_type(&scope_type)?;
        let name = normalize_name(&scope_type, name.into())?;
        Ok(Self {
            scope_type,
            name,
            precedence,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Scope for NamedScope {
    fn scope_type(&self) -> &str {
        &self.scope_type
    }

    fn value(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn precedence(&self) -> u32 {
        self.precedence
    }

    fn matches(&self, requested: &dyn Scope) -> bool {
        requests_dimension(requested, &self.scope_type, Some(&self.name))
    }
}
