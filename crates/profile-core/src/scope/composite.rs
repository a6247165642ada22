//! Two-dimensional scopes

use super::{Scope, ScopeRef, canonical_cmp, precedence};

pub(super) const COMPOSITE_TYPE: &str = "composite";

/// A scope combining two other scopes, e.g. `(api:payment + environment:staging)`.
///
/// Precedence is the higher component precedence plus
/// [`precedence::COMPOSITE_BUMP`]. Matching is disjunctive: the composite
/// applies whenever either component matches the request, which lets a
/// fragment defined for `(api:payment, environment:prod)` take part in a
/// resolution for `api:payment` alone.
///
/// Components are stored in canonical order, so `Composite::new(a, b)` and
/// `Composite::new(b, a)` are equal.
#[derive(Debug, Clone)]
pub struct Composite {
    components: [ScopeRef; 2],
    value: String,
    precedence: u32,
}

impl Composite {
    pub const TYPE: &'static str = COMPOSITE_TYPE;

    pub fn new(first: ScopeRef, second: ScopeRef) -> Self {
        let mut components = [first, second];
        components.sort_by(|a, b| {
            a.scope_type()
                .cmp(b.scope_type())
                .then_with(|| a.value().cmp(&b.value()))
                .then_with(|| canonical_cmp(a.as_ref(), b.as_ref()))
        });

        let precedence = components[0]
            .precedence()
            .max(components[1].precedence())
            .saturating_add(precedence::COMPOSITE_BUMP);

        let mut value = String::new();
        for (index, component) in components.iter().enumerate() {
            if index > 0 {
                value.push('+');
            }
            value.push_str(&render_component(component.as_ref()));
        }

        Self {
            components,
            value,
            precedence,
        }
    }

    /// The two components, in canonical order.
    pub fn parts(&self) -> (&ScopeRef, &ScopeRef) {
        (&self.components[0], &self.components[1])
    }
}

fn render_component(scope: &dyn Scope) -> String {
    match scope.value() {
        Some(value) if !scope.components().is_empty() => format!("({value})"),
        Some(value) => format!("{}:{value}", scope.scope_type()),
        None => scope.scope_type().to_string(),
    }
}

impl Scope for Composite {
    fn scope_type(&self) -> &str {
        Self::TYPE
    }

    fn value(&self) -> Option<&str> {
        Some(&self.value)
    }

    fn precedence(&self) -> u32 {
        self.precedence
    }

    fn matches(&self, requested: &dyn Scope) -> bool {
        self.components
            .iter()
            .any(|component| component.matches(requested))
    }

    fn components(&self) -> &[ScopeRef] {
        &self.components
    }
}
