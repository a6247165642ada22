//! Precedence-based profile resolution
//!
//! The `ProfileResolver` merges a set of scoped profiles for one requested
//! scope. For each key the most specific matching scope wins; when the most
//! specific scopes disagree the whole resolution fails with a
//! [`ConflictError`] instead of picking one arbitrarily.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::conflict::{ConflictError, ConflictHandler, matching_contributions};
use crate::key::ConfigKey;
use crate::profile::Profile;
use crate::resolved::ResolvedProfile;
use crate::scope::{Scope, ScopeRef, canonical_cmp};
use crate::value::ConfigValue;

/// Resolves profile sets into a [`ResolvedProfile`].
///
/// Stateless: the same inputs, in any order, always produce an equal result.
///
/// # Example
///
/// ```
/// use profile_core::{Profile, ProfileResolver, scope::{Api, Global}};
/// use std::time::Duration;
///
/// let profiles = vec![
///     Profile::builder(Global).set("timeout", Duration::from_secs(30)).unwrap().build(),
///     Profile::builder(Api::new("payment").unwrap())
///         .set("timeout", Duration::from_secs(60))
///         .unwrap()
///         .build(),
/// ];
///
/// let resolver = ProfileResolver::new();
/// let resolved = resolver.resolve(&profiles, &Api::new("payment").unwrap()).unwrap();
/// assert_eq!(resolved.get("timeout").and_then(|v| v.as_duration()), Some(Duration::from_secs(60)));
///
/// let fallback = resolver.resolve(&profiles, &Api::new("search").unwrap()).unwrap();
/// assert_eq!(fallback.get("timeout").and_then(|v| v.as_duration()), Some(Duration::from_secs(30)));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileResolver {
    conflicts: ConflictHandler,
}

impl ProfileResolver {
    pub fn new() -> Self {
        Self {
            conflicts: ConflictHandler::new(),
        }
    }

    /// Resolve `profiles` for the `requested` scope.
    ///
    /// Conflicts are checked before anything is merged; if any key has
    /// disagreeing values at its highest matching precedence, every such key
    /// is reported and no partial result is returned.
    ///
    /// Keys that no matching profile defines are simply absent from the
    /// result.
    pub fn resolve(
        &self,
        profiles: &[Profile],
        requested: &dyn Scope,
    ) -> Result<ResolvedProfile, ConflictError> {
        let conflicts = self.conflicts.detect_conflicts(profiles, requested);
        if !conflicts.is_empty() {
            tracing::warn!(
                requested = %requested,
                conflicts = conflicts.len(),
                "Resolution aborted by conflicting profiles"
            );
            return Err(ConflictError::new(conflicts));
        }

        let contributions = matching_contributions(profiles, requested);
        tracing::debug!(
            requested = %requested,
            profiles = profiles.len(),
            keys = contributions.len(),
            "Resolving profiles"
        );

        let mut configuration: BTreeMap<ConfigKey, ConfigValue> = BTreeMap::new();
        let mut audit_trail: BTreeMap<ConfigKey, Vec<ScopeRef>> = BTreeMap::new();

        for (key, mut entries) in contributions {
            // Canonical order, never input order. Entries that still tie are
            // equal scopes; below the top precedence their values are shadowed,
            // at the top they agree (otherwise a conflict was reported above).
            entries.sort_by(|(a, _), (b, _)| canonical_cmp(a.as_ref(), b.as_ref()));

            let Some((_, selected)) = entries.last() else {
                continue;
            };

            configuration.insert(key.clone(), (*selected).clone());
            audit_trail.insert(
                key.clone(),
                entries.iter().map(|(scope, _)| Arc::clone(scope)).collect(),
            );
        }

        tracing::debug!(requested = %requested, resolved = configuration.len(), "Resolution complete");
        Ok(ResolvedProfile::new(configuration, audit_trail))
    }
}
