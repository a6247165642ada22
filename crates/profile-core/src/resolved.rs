//! The output of a resolution: merged configuration plus audit trail

use std::collections::BTreeMap;

use serde::Serialize;

use crate::key::ConfigKey;
use crate::scope::{ScopeDescriptor, ScopeRef};
use crate::value::ConfigValue;

/// Merged configuration for one requested scope.
///
/// For every key in [`configuration`](Self::configuration) the
/// [`audit_trail`](Self::audit_trail) lists each matching scope that defined
/// the key, ordered from least to most specific. The last scope in a trail is
/// the one whose value was selected.
///
/// Built once per resolution and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedProfile {
    configuration: BTreeMap<ConfigKey, ConfigValue>,
    audit_trail: BTreeMap<ConfigKey, Vec<ScopeRef>>,
}

impl ResolvedProfile {
    pub(crate) fn new(
        configuration: BTreeMap<ConfigKey, ConfigValue>,
        audit_trail: BTreeMap<ConfigKey, Vec<ScopeRef>>,
    ) -> Self {
        debug_assert!(configuration.keys().eq(audit_trail.keys()));
        debug_assert!(audit_trail.values().all(|trail| !trail.is_empty()));
        Self {
            configuration,
            audit_trail,
        }
    }

    pub fn configuration(&self) -> &BTreeMap<ConfigKey, ConfigValue> {
        &self.configuration
    }

    pub fn audit_trail(&self) -> &BTreeMap<ConfigKey, Vec<ScopeRef>> {
        &self.audit_trail
    }

    /// Selected value for a key; the key is normalized before lookup.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.configuration.get(ConfigKey::normalize(key))
    }

    /// Contributing scopes for a key, least specific first.
    pub fn trail(&self, key: &str) -> Option<&[ScopeRef]> {
        self.audit_trail
            .get(ConfigKey::normalize(key))
            .map(Vec::as_slice)
    }

    /// The scope whose value was selected for a key.
    pub fn selected_scope(&self, key: &str) -> Option<&ScopeRef> {
        self.trail(key).and_then(|trail| trail.last())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.configuration.contains_key(ConfigKey::normalize(key))
    }

    pub fn keys(&self) -> impl Iterator<Item = &ConfigKey> {
        self.configuration.keys()
    }

    pub fn len(&self) -> usize {
        self.configuration.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configuration.is_empty()
    }

    /// Serializable view for audit and reporting tools.
    pub fn to_report(&self) -> ResolutionReport {
        let entries = self
            .configuration
            .iter()
            .map(|(key, value)| {
                let trail = self
                    .audit_trail
                    .get(key)
                    .map(|scopes| scopes.iter().map(|s| s.descriptor()).collect())
                    .unwrap_or_default();
                (
                    key.clone(),
                    ReportEntry {
                        value: value.clone(),
                        trail,
                    },
                )
            })
            .collect();

        ResolutionReport { entries }
    }
}

/// Serializable form of a [`ResolvedProfile`], keyed by config key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionReport {
    pub entries: BTreeMap<ConfigKey, ReportEntry>,
}

/// Selected value and contributing scopes for one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub value: ConfigValue,
    pub trail: Vec<ScopeDescriptor>,
}

impl ReportEntry {
    /// The scope that produced [`value`](Self::value).
    pub fn selected(&self) -> Option<&ScopeDescriptor> {
        self.trail.last()
    }
}
