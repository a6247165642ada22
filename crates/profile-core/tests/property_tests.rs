use profile_core::{ConfigValue, Profile, ProfileResolver, ScopeRef};
use profile_test_utils::fixtures::{api, composite, env, global, profile, tag};
use proptest::prelude::*;

const KEYS: [&str; 4] = ["timeout", "retries", "mode", "log_level"];

fn scope_pool() -> Vec<ScopeRef> {
    vec![
        global(),
        api("payment"),
        api("search"),
        env("prod"),
        env("staging"),
        tag("canary", 20),
        tag("beta", 10),
        composite(&api("payment"), &env("prod")),
    ]
}

/// Profile specs as `(scope index, [(key index, value)])`.
fn profile_specs() -> impl Strategy<Value = Vec<(usize, Vec<(usize, i64)>)>> {
    prop::collection::vec(
        (
            0..scope_pool().len(),
            prop::collection::vec((0..KEYS.len(), 0i64..3), 0..4),
        ),
        0..10,
    )
}

fn build(specs: &[(usize, Vec<(usize, i64)>)]) -> Vec<Profile> {
    let pool = scope_pool();
    specs
        .iter()
        .map(|(scope_index, entries)| {
            let entries: Vec<(&str, ConfigValue)> = entries
                .iter()
                .map(|(key_index, value)| (KEYS[*key_index], ConfigValue::Integer(*value)))
                .collect();
            profile(&pool[*scope_index], &entries)
        })
        .collect()
}

proptest! {
    #[test]
    fn test_resolution_ignores_profile_order(
        (specs, shuffled) in profile_specs().prop_flat_map(|specs| {
            (Just(specs.clone()), Just(specs).prop_shuffle())
        }),
        requested in 0..scope_pool().len(),
    ) {
        let requested = &scope_pool()[requested];
        let resolver = ProfileResolver::new();

        // Conflicts are part of the result: the same error must come back
        // regardless of order.
        let original = resolver.resolve(&build(&specs), requested.as_ref());
        let permuted = resolver.resolve(&build(&shuffled), requested.as_ref());
        prop_assert_eq!(original, permuted);
    }

    #[test]
    fn test_resolution_is_idempotent(specs in profile_specs(), requested in 0..scope_pool().len()) {
        let requested = &scope_pool()[requested];
        let profiles = build(&specs);
        let resolver = ProfileResolver::new();

        let first = resolver.resolve(&profiles, requested.as_ref());
        for _ in 0..3 {
            prop_assert_eq!(&first, &resolver.resolve(&profiles, requested.as_ref()));
        }
    }

    #[test]
    fn test_every_resolved_key_has_a_trail(specs in profile_specs(), requested in 0..scope_pool().len()) {
        let requested = &scope_pool()[requested];
        let profiles = build(&specs);

        if let Ok(resolved) = ProfileResolver::new().resolve(&profiles, requested.as_ref()) {
            for (key, value) in resolved.configuration() {
                let trail = resolved.trail(key.as_str()).unwrap_or_default();
                prop_assert!(!trail.is_empty());

                let top = trail.iter().map(|s| s.precedence()).max().unwrap_or_default();
                let selected = &trail[trail.len() - 1];
                prop_assert_eq!(selected.precedence(), top);
                prop_assert!(profiles.iter().any(|p| p.scope() == selected && p.get(key.as_str()) == Some(value)));
            }
        }
    }
}
