//! Scoped configuration fragments

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::key::ConfigKey;
use crate::scope::{Scope, ScopeRef};
use crate::value::ConfigValue;
use crate::Result;

/// An immutable fragment of configuration tied to exactly one scope.
///
/// # Example
///
/// ```
/// use profile_core::{Profile, scope::Api};
/// use std::time::Duration;
///
/// let profile = Profile::builder(Api::new("payment").unwrap())
///     .set("timeout", Duration::from_secs(60))
///     .unwrap()
///     .set("retries", 3_i64)
///     .unwrap()
///     .build();
///
/// assert_eq!(profile.len(), 2);
/// assert_eq!(profile.get("timeout").and_then(|v| v.as_duration()), Some(Duration::from_secs(60)));
/// ```
#[derive(Debug, Clone)]
pub struct Profile {
    scope: ScopeRef,
    values: BTreeMap<ConfigKey, ConfigValue>,
}

impl Profile {
    /// Create a profile from an already-built map of values.
    pub fn new(scope: ScopeRef, values: BTreeMap<ConfigKey, ConfigValue>) -> Self {
        Self { scope, values }
    }

    /// Start building a profile for the given scope.
    pub fn builder(scope: impl Scope + 'static) -> ProfileBuilder {
        ProfileBuilder::new(Arc::new(scope))
    }

    /// Start building a profile for an already-shared scope.
    pub fn builder_for(scope: ScopeRef) -> ProfileBuilder {
        ProfileBuilder::new(scope)
    }

    pub fn scope(&self) -> &ScopeRef {
        &self.scope
    }

    /// Look up a value; the key is normalized before lookup.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.values.get(ConfigKey::normalize(key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(ConfigKey::normalize(key))
    }

    pub fn values(&self) -> &BTreeMap<ConfigKey, ConfigValue> {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ConfigKey, &ConfigValue)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Builder for [`Profile`]. Setting a key twice keeps the last value.
#[derive(Debug)]
pub struct ProfileBuilder {
    scope: ScopeRef,
    values: BTreeMap<ConfigKey, ConfigValue>,
}

impl ProfileBuilder {
    fn new(scope: ScopeRef) -> Self {
        Self {
            scope,
            values: BTreeMap::new(),
        }
    }

    /// Set a value, validating the key.
    pub fn set(mut self, key: impl AsRef<str>, value: impl Into<ConfigValue>) -> Result<Self> {
        let key = ConfigKey::new(key)?;
        self.values.insert(key, value.into());
        Ok(self)
    }

    /// Set a value under an already-validated key.
    pub fn insert(mut self, key: ConfigKey, value: impl Into<ConfigValue>) -> Self {
        self.values.insert(key, value.into());
        self
    }

    pub fn build(self) -> Profile {
        Profile {
            scope: self.scope,
            values: self.values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::{Global, precedence};

    #[test]
    fn test_builder_last_write_wins() {
        let profile = Profile::builder(Global)
            .set("mode", "strict")
            .unwrap()
            .set(" mode ", "lenient")
            .unwrap()
            .build();

        assert_eq!(profile.len(), 1);
        assert_eq!(profile.get("mode"), Some(&ConfigValue::from("lenient")));
    }

    #[test]
    fn test_builder_rejects_invalid_key() {
        assert!(Profile::builder(Global).set("", 1_i64).is_err());
    }

    #[test]
    fn test_lookup_normalizes_key() {
        let profile = Profile::builder(Global).set("retries", 3_i64).unwrap().build();
        assert!(profile.contains_key("  retries"));
        assert!(!profile.contains_key("Retries"));
    }

    #[test]
    fn test_scope_is_kept() {
        let profile = Profile::builder(Global).build();
        assert!(profile.is_empty());
        assert_eq!(profile.scope().precedence(), precedence::GLOBAL);
    }
}
