//! Detection of ambiguous overrides
//!
//! A conflict exists when, for one key, the highest-precedence matching
//! contributions disagree on the value. Lower precedence groups are shadowed
//! and may differ freely.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::key::ConfigKey;
use crate::profile::Profile;
use crate::scope::{Scope, ScopeDescriptor, ScopeRef};
use crate::value::ConfigValue;

/// One `(scope, value)` pair taking part in a conflict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contribution {
    pub scope: ScopeDescriptor,
    pub value: ConfigValue,
}

/// Disagreement between equally-specific matching profiles on one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub key: ConfigKey,
    pub precedence: u32,
    pub contributions: Vec<Contribution>,
}

impl Conflict {
    /// Distinct values supplied at the conflicting precedence, in report order.
    pub fn values(&self) -> Vec<&ConfigValue> {
        let mut values: Vec<&ConfigValue> = Vec::new();
        for contribution in &self.contributions {
            if !values.contains(&&contribution.value) {
                values.push(&contribution.value);
            }
        }
        values
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at precedence {}: ", self.key, self.precedence)?;
        for (index, contribution) in self.contributions.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} = {}", contribution.scope, contribution.value)?;
        }
        Ok(())
    }
}

/// Resolution aborted because matching profiles disagree.
///
/// Carries every conflicting key so a caller can report all problems at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{}", render_conflicts(.conflicts))]
pub struct ConflictError {
    pub conflicts: Vec<Conflict>,
}

impl ConflictError {
    pub fn new(conflicts: Vec<Conflict>) -> Self {
        Self { conflicts }
    }

    /// The conflict for a given key, if any.
    pub fn conflict_for(&self, key: &str) -> Option<&Conflict> {
        let key = ConfigKey::normalize(key);
        self.conflicts.iter().find(|c| c.key.as_str() == key)
    }

    pub fn keys(&self) -> Vec<&ConfigKey> {
        self.conflicts.iter().map(|c| &c.key).collect()
    }
}

fn render_conflicts(conflicts: &[Conflict]) -> String {
    let mut out = format!(
        "Conflicting profile values for {} key(s):",
        conflicts.len()
    );
    for conflict in conflicts {
        out.push_str("\n  ");
        out.push_str(&conflict.to_string());
    }
    out
}

/// Pure conflict detector over a profile set.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConflictHandler;

impl ConflictHandler {
    pub fn new() -> Self {
        Self
    }

    /// Find every key whose winning contributions disagree.
    ///
    /// Only profiles whose scope matches `requested` are considered. The
    /// result is ordered by key, and each conflict lists all contributions at
    /// the conflicting precedence in canonical scope order, then by value.
    pub fn detect_conflicts(&self, profiles: &[Profile], requested: &dyn Scope) -> Vec<Conflict> {
        let mut conflicts = Vec::new();

        for (key, contributions) in matching_contributions(profiles, requested) {
            let Some(top) = contributions.iter().map(|(scope, _)| scope.precedence()).max() else {
                continue;
            };

            let winners: Vec<&(&ScopeRef, &ConfigValue)> = contributions
                .iter()
                .filter(|(scope, _)| scope.precedence() == top)
                .collect();

            let first_value = winners[0].1;
            if winners.iter().all(|(_, value)| *value == first_value) {
                continue;
            }

            let mut disagreeing: Vec<Contribution> = winners
                .iter()
                .map(|(scope, value)| Contribution {
                    scope: scope.descriptor(),
                    value: (*value).clone(),
                })
                .collect();
            disagreeing.sort_by(|a, b| a.scope.cmp(&b.scope).then_with(|| a.value.cmp(&b.value)));

            tracing::debug!(key = %key, precedence = top, count = disagreeing.len(), "Conflict detected");
            conflicts.push(Conflict {
                key: key.clone(),
                precedence: top,
                contributions: disagreeing,
            });
        }

        conflicts
    }
}

/// Per-key `(scope, value)` pairs from every profile matching `requested`.
///
/// Pairs are in input order; callers that need a deterministic order sort
/// them themselves.
pub(crate) fn matching_contributions<'a>(
    profiles: &'a [Profile],
    requested: &dyn Scope,
) -> BTreeMap<&'a ConfigKey, Vec<(&'a ScopeRef, &'a ConfigValue)>> {
    let mut by_key: BTreeMap<&ConfigKey, Vec<(&ScopeRef, &ConfigValue)>> = BTreeMap::new();

    for profile in profiles.iter().filter(|p| p.scope().matches(requested)) {
        for (key, value) in profile.iter() {
            by_key.entry(key).or_default().push((profile.scope(), value));
        }
    }

    by_key
}
