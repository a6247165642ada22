//! Scopes: the context dimensions a profile applies to
//!
//! A [`Scope`] describes one dimension of an evaluation context (an API, an
//! environment, a tag, ...) together with a precedence used to rank it against
//! other matching scopes. The set of scope types is open: the built-in
//! variants in this module are ordinary implementations of the trait, and
//! callers add their own without touching the resolver.
//!
//! # Matching
//!
//! A requested scope is decomposed into its leaf *dimensions*. A leaf scope
//! matches when one of the requested dimensions has the same type and value,
//! so a request for `(api:payment + environment:staging)` pulls in profiles
//! scoped to either dimension. [`Global`] matches every request and a
//! [`Composite`] matches when either of its components does.
//!
//! # Example
//!
//! ```
//! use profile_core::scope::{Api, Composite, Environment, Global, Scope};
//! use std::sync::Arc;
//!
//! let payment = Api::new("payment").unwrap();
//! let staging = Environment::new("staging").unwrap();
//! let both = Composite::new(Arc::new(payment.clone()), Arc::new(staging));
//!
//! assert!(Global.matches(&payment));
//! assert!(both.matches(&payment));
//! assert_eq!(both.precedence(), 20);
//! ```

mod builtin;
mod composite;
pub mod precedence;

pub use builtin::{Api, Environment, Global, NamedScope, Tag};
pub use composite::Composite;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::Serialize;

use crate::{Error, Result};

/// Shared handle to a scope instance.
pub type ScopeRef = Arc<dyn Scope>;

/// A context dimension with a fixed precedence.
///
/// Implementations must be immutable and deterministic: `precedence` never
/// changes for an instance, `matches` performs no I/O and depends only on its
/// arguments, and `matches` is reflexive for equal scopes.
///
/// Two scopes are equal when their `(scope_type, value, precedence)` triples
/// are equal, regardless of the concrete type behind them.
pub trait Scope: fmt::Debug + Send + Sync {
    /// Stable, non-empty identifier of the dimension, e.g. `"api"`.
    fn scope_type(&self) -> &str;

    /// The dimension value, or `None` for singleton scopes such as [`Global`].
    fn value(&self) -> Option<&str>;

    /// Rank of this scope; higher is more specific.
    fn precedence(&self) -> u32;

    /// Whether a profile with this scope applies to the `requested` scope.
    fn matches(&self, requested: &dyn Scope) -> bool;

    /// Constituent scopes of a compound scope. Leaf scopes have none.
    fn components(&self) -> &[ScopeRef] {
        &[]
    }

    /// Owned snapshot of the scope's identity.
    fn descriptor(&self) -> ScopeDescriptor {
        ScopeDescriptor {
            scope_type: self.scope_type().to_string(),
            value: self.value().map(str::to_string),
            precedence: self.precedence(),
        }
    }
}

impl PartialEq for dyn Scope + '_ {
    fn eq(&self, other: &Self) -> bool {
        self.scope_type() == other.scope_type()
            && self.value() == other.value()
            && self.precedence() == other.precedence()
    }
}

impl Eq for dyn Scope + '_ {}

impl Hash for dyn Scope + '_ {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.scope_type().hash(state);
        self.value().hash(state);
        self.precedence().hash(state);
    }
}

impl fmt::Display for dyn Scope + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_scope(f, self.scope_type(), self.value())
    }
}

/// Order two scopes purely by precedence.
pub fn cmp_precedence(a: &dyn Scope, b: &dyn Scope) -> Ordering {
    a.precedence().cmp(&b.precedence())
}

/// Total order used wherever scopes must be sorted deterministically:
/// precedence, then type, then value.
pub fn canonical_cmp(a: &dyn Scope, b: &dyn Scope) -> Ordering {
    a.precedence()
        .cmp(&b.precedence())
        .then_with(|| a.scope_type().cmp(b.scope_type()))
        .then_with(|| a.value().cmp(&b.value()))
}

/// Leaf dimensions of a scope. Compound scopes are flattened recursively.
pub fn dimensions(scope: &dyn Scope) -> Vec<&dyn Scope> {
    let components = scope.components();
    if components.is_empty() {
        return vec![scope];
    }
    components
        .iter()
        .flat_map(|component| dimensions(component.as_ref()))
        .collect()
}

/// Whether `requested` carries a dimension with the given type and value.
///
/// This is the matching rule shared by the named built-in scopes and is
/// exposed for custom implementations that want the same behaviour.
pub fn requests_dimension(requested: &dyn Scope, scope_type: &str, value: Option<&str>) -> bool {
    dimensions(requested)
        .into_iter()
        .any(|dimension| dimension.scope_type() == scope_type && dimension.value() == value)
}

/// Characters that structure rendered scopes and may not appear in scope
/// types or values.
pub const RESERVED_CHARS: [char; 4] = [':', '+', '(', ')'];

/// Check a scope against the scope contract.
///
/// Built-in constructors already enforce this; custom implementations can
/// call it from their own constructors. Compound scopes are checked through
/// their components.
pub fn validate_scope(scope: &dyn Scope) -> Result<()> {
    let components = scope.components();
    if !components.is_empty() {
        return components
            .iter()
            .try_for_each(|component| validate_scope(component.as_ref()));
    }

    validate_type(scope.scope_type())?;
    if let Some(value) = scope.value() {
        validate_name(scope.scope_type(), value)?;
    }
    Ok(())
}

pub(crate) fn validate_type(scope_type: &str) -> Result<()> {
    if scope_type.is_empty() {
        return Err(Error::invalid_scope("<empty>", "scope type is empty"));
    }
    if scope_type
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || RESERVED_CHARS.contains(&c))
    {
        return Err(Error::invalid_scope(
            scope_type,
            "scope type must not contain whitespace, ':', '+' or parentheses",
        ));
    }
    Ok(())
}

pub(crate) fn validate_name(scope_type: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::invalid_scope(scope_type, "scope value is empty"));
    }
    if name.trim().len() != name.len() {
        return Err(Error::invalid_scope(
            scope_type,
            "scope value has surrounding whitespace",
        ));
    }
    if name.chars().any(char::is_control) {
        return Err(Error::invalid_scope(
            scope_type,
            "scope value contains control characters",
        ));
    }
    if name.chars().any(|c| RESERVED_CHARS.contains(&c)) {
        return Err(Error::invalid_scope(
            scope_type,
            "scope value must not contain ':', '+' or parentheses",
        ));
    }
    Ok(())
}

/// Trim a scope value and validate it. Values are trimmed the same way
/// [`ConfigKey`](crate::ConfigKey)s are.
pub(crate) fn normalize_name(scope_type: &str, name: String) -> Result<String> {
    let trimmed = name.trim();
    validate_name(scope_type, trimmed)?;
    if trimmed.len() == name.len() {
        Ok(name)
    } else {
        Ok(trimmed.to_string())
    }
}

fn write_scope(f: &mut fmt::Formatter<'_>, scope_type: &str, value: Option<&str>) -> fmt::Result {
    match value {
        Some(value) if scope_type == composite::COMPOSITE_TYPE => write!(f, "{scope_type}({value})"),
        Some(value) => write!(f, "{scope_type}:{value}"),
        None => f.write_str(scope_type),
    }
}

/// Owned, serializable identity of a scope: `(type, value, precedence)`.
///
/// Used wherever a scope has to outlive the profiles it came from or be
/// rendered for a report, such as conflict listings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ScopeDescriptor {
    #[serde(rename = "type")]
    pub scope_type: String,
    pub value: Option<String>,
    pub precedence: u32,
}

impl Ord for ScopeDescriptor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.precedence
            .cmp(&other.precedence)
            .then_with(|| self.scope_type.cmp(&other.scope_type))
            .then_with(|| self.value.cmp(&other.value))
    }
}

impl PartialOrd for ScopeDescriptor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ScopeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_scope(f, &self.scope_type, self.value.as_deref())
    }
}
