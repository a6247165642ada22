//! Scope shorthands and canonical profile scenarios.
//!
//! The scenarios mirror the situations the resolver must get right:
//! plain precedence, composite specificity, and same-precedence conflicts.

use std::sync::Arc;
use std::time::Duration;

use profile_core::scope::{Api, Composite, Environment, Global, Tag};
use profile_core::{ConfigValue, Profile, ScopeRef};

/// `Global` as a shared scope.
pub fn global() -> ScopeRef {
    Arc::new(Global)
}

/// `api:<name>` as a shared scope.
///
/// # Panics
/// Panics if `name` is not a valid scope value.
pub fn api(name: &str) -> ScopeRef {
    Arc::new(Api::new(name).unwrap_or_else(|e| panic!("fixtures::api: {e}")))
}

/// `environment:<name>` as a shared scope.
///
/// # Panics
/// Panics if `name` is not a valid scope value.
pub fn env(name: &str) -> ScopeRef {
    Arc::new(Environment::new(name).unwrap_or_else(|e| panic!("fixtures::env: {e}")))
}

/// `tag:<name>` at the given precedence.
///
/// # Panics
/// Panics if `name` is not a valid scope value.
pub fn tag(name: &str, precedence: u32) -> ScopeRef {
    Arc::new(
        Tag::with_precedence(name, precedence).unwrap_or_else(|e| panic!("fixtures::tag: {e}")),
    )
}

/// Composite of two shared scopes.
pub fn composite(first: &ScopeRef, second: &ScopeRef) -> ScopeRef {
    Arc::new(Composite::new(Arc::clone(first), Arc::clone(second)))
}

/// Duration value of `n` seconds.
pub fn secs(n: u64) -> ConfigValue {
    ConfigValue::Duration(Duration::from_secs(n))
}

/// Build a profile from `(key, value)` pairs.
///
/// # Panics
/// Panics if any key is invalid.
pub fn profile(scope: &ScopeRef, entries: &[(&str, ConfigValue)]) -> Profile {
    let mut builder = Profile::builder_for(Arc::clone(scope));
    for (key, value) in entries {
        builder = builder
            .set(key, value.clone())
            .unwrap_or_else(|e| panic!("fixtures::profile: {e}"));
    }
    builder.build()
}

/// `Global{timeout=30s}` and `Api(payment){timeout=60s}`.
pub fn precedence_scenario() -> Vec<Profile> {
    vec![
        profile(&global(), &[("timeout", secs(30))]),
        profile(&api("payment"), &[("timeout", secs(60))]),
    ]
}

/// Global 30s, Environment(staging) 60s, Api(payment) 90s and
/// Composite(Api(payment), Environment(staging)) 120s, all for `timeout`.
pub fn composite_scenario() -> Vec<Profile> {
    vec![
        profile(&global(), &[("timeout", secs(30))]),
        profile(&env("staging"), &[("timeout", secs(60))]),
        profile(&api("payment"), &[("timeout", secs(90))]),
        profile(&payment_staging(), &[("timeout", secs(120))]),
    ]
}

/// The composite scope used by [`composite_scenario`].
pub fn payment_staging() -> ScopeRef {
    composite(&api("payment"), &env("staging"))
}

/// Two `Api(payment)` profiles disagreeing on `timeout` (30s vs 60s).
pub fn conflicting_scenario() -> Vec<Profile> {
    vec![
        profile(&api("payment"), &[("timeout", secs(30))]),
        profile(&api("payment"), &[("timeout", secs(60))]),
    ]
}

/// A broad, conflict-free profile set touching every built-in scope type.
pub fn layered_scenario() -> Vec<Profile> {
    vec![
        profile(
            &global(),
            &[
                ("timeout", secs(30)),
                ("retries", ConfigValue::Integer(1)),
                ("log_level", ConfigValue::from("info")),
                ("tracing", ConfigValue::Boolean(false)),
            ],
        ),
        profile(&env("prod"), &[("log_level", ConfigValue::from("warn"))]),
        profile(&env("staging"), &[("log_level", ConfigValue::from("debug"))]),
        profile(
            &api("payment"),
            &[("timeout", secs(90)), ("retries", ConfigValue::Integer(5))],
        ),
        profile(&api("search"), &[("timeout", secs(5))]),
        profile(&tag("canary", 20), &[("tracing", ConfigValue::Boolean(true))]),
        profile(
            &composite(&api("payment"), &env("prod")),
            &[("sample_rate", ConfigValue::Float(0.25))],
        ),
    ]
}
