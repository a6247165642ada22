//! Textual scope selectors for requested scopes
//!
//! A selector names the evaluation context to resolve for:
//!
//! - `global`
//! - `api:payment` (any type known to the registry)
//! - `api:payment+environment:staging` (a composite; more than two
//!   dimensions nest left to right)

use std::sync::Arc;

use profile_core::scope::{Composite, Global};
use profile_core::{ScopeRef, ScopeRegistry};

use crate::{Error, Result};

/// Parse a selector into a scope, building named dimensions through `registry`.
///
/// # Example
///
/// ```
/// use profile_core::ScopeRegistry;
/// use profile_meta::parse_selector;
///
/// let registry = ScopeRegistry::with_builtins();
/// let scope = parse_selector(&registry, "api:payment+environment:staging").unwrap();
/// assert_eq!(scope.precedence(), 20);
/// ```
pub fn parse_selector(registry: &ScopeRegistry, selector: &str) -> Result<ScopeRef> {
    let invalid = || Error::InvalidSelector {
        selector: selector.to_string(),
    };

    let mut dimensions = selector
        .split('+')
        .map(|part| parse_dimension(registry, part.trim()).map_err(|e| match e {
            Error::InvalidSelector { .. } => invalid(),
            other => other,
        }));

    let first = dimensions.next().ok_or_else(invalid)??;
    dimensions.try_fold(first, |acc: ScopeRef, next: Result<ScopeRef>| -> Result<ScopeRef> {
        Ok(Arc::new(Composite::new(acc, next?)))
    })
}

fn parse_dimension(registry: &ScopeRegistry, part: &str) -> Result<ScopeRef> {
    if part == Global::TYPE {
        return Ok(Arc::new(Global));
    }

    let (scope_type, value) = part.split_once(':').ok_or_else(|| Error::InvalidSelector {
        selector: part.to_string(),
    })?;
    let (scope_type, value) = (scope_type.trim(), value.trim());
    if scope_type.is_empty() || value.is_empty() {
        return Err(Error::InvalidSelector {
            selector: part.to_string(),
        });
    }

    Ok(registry.resolve(scope_type, value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("global", "global", 0)]
    #[case("api:payment", "api:payment", 10)]
    #[case(" environment : prod ", "environment:prod", 15)]
    #[case("tag:canary", "tag:canary", 20)]
    #[case(
        "environment:staging+api:payment",
        "composite(api:payment+environment:staging)",
        20
    )]
    #[case(
        "api:payment+environment:staging+tag:canary",
        "composite((api:payment+environment:staging)+tag:canary)",
        25
    )]
    fn test_parse_selector(#[case] selector: &str, #[case] rendered: &str, #[case] precedence: u32) {
        let registry = ScopeRegistry::with_builtins();
        let scope = parse_selector(&registry, selector).unwrap();
        assert_eq!(scope.to_string(), rendered);
        assert_eq!(scope.precedence(), precedence);
    }

    #[rstest]
    #[case("")]
    #[case("api")]
    #[case("api:")]
    #[case(":payment")]
    #[case("api:payment+")]
    fn test_invalid_selector(#[case] selector: &str) {
        let registry = ScopeRegistry::with_builtins();
        let err = parse_selector(&registry, selector).unwrap_err();
        assert!(
            matches!(err, Error::InvalidSelector { selector: ref s } if s == selector),
            "unexpected error for {selector:?}: {err}"
        );
    }

    #[test]
    fn test_unknown_type_is_a_core_error() {
        let registry = ScopeRegistry::with_builtins();
        let err = parse_selector(&registry, "region:eu").unwrap_err();
        assert!(matches!(
            err,
            Error::Core(profile_core::Error::UnknownScopeType { .. })
        ));
    }
}
