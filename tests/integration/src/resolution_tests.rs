//! End-to-end resolution over the shared fixture documents
//!
//! Exercises the complete flow: profile documents on disk -> loader ->
//! selector -> resolver -> report.

use std::path::PathBuf;
use std::time::Duration;

use pretty_assertions::assert_eq;
use profile_core::{ConfigValue, ProfileResolver, ResolvedProfile};
use profile_meta::duration::parse_duration;
use profile_meta::{ProfileLoader, parse_selector};
use profile_test_utils::dir::TestProfileDir;
use profile_test_utils::fixtures::layered_scenario;
use tracing_subscriber::EnvFilter;

/// Route resolver logs through the test harness. Set `RUST_LOG=debug` to see them.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_test_writer()
        .try_init();
}

fn fixtures_dir(name: &str) -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    // tests/integration -> ../../test-fixtures
    manifest_dir.join("../../test-fixtures").join(name)
}

fn resolve_fixtures(dir: &str, selector: &str) -> ResolvedProfile {
    let loader = ProfileLoader::default();
    let profiles = loader.load_dir(fixtures_dir(dir)).unwrap();
    let request = parse_selector(loader.registry(), selector).unwrap();
    ProfileResolver::new()
        .resolve(&profiles, request.as_ref())
        .unwrap_or_else(|e| panic!("resolving {selector}: {e}"))
}

#[test]
fn test_fixture_documents_load_in_file_order() {
    init_tracing();
    let profiles = ProfileLoader::default()
        .load_dir(fixtures_dir("profiles"))
        .unwrap();

    let scopes: Vec<String> = profiles.iter().map(|p| p.scope().to_string()).collect();
    assert_eq!(
        scopes,
        vec![
            "global",
            "environment:prod",
            "environment:staging",
            "api:payment",
            "api:search",
            "tag:canary",
            "composite(api:payment+environment:prod)",
        ]
    );
}

#[test]
fn test_documents_resolve_like_programmatic_profiles() {
    init_tracing();
    let loader = ProfileLoader::default();
    let from_disk = loader.load_dir(fixtures_dir("profiles")).unwrap();
    let in_memory = layered_scenario();
    let resolver = ProfileResolver::new();

    for selector in [
        "global",
        "api:payment",
        "api:search",
        "environment:staging",
        "api:payment+environment:prod",
        "api:search+environment:prod+tag:canary",
    ] {
        let request = parse_selector(loader.registry(), selector).unwrap();
        assert_eq!(
            resolver.resolve(&from_disk, request.as_ref()).unwrap(),
            resolver.resolve(&in_memory, request.as_ref()).unwrap(),
            "selector {selector}"
        );
    }
}

#[test]
fn test_payment_in_prod() {
    init_tracing();
    let resolved = resolve_fixtures("profiles", "api:payment+environment:prod");

    assert_eq!(
        resolved.get("timeout"),
        Some(&ConfigValue::Duration(Duration::from_secs(90)))
    );
    assert_eq!(resolved.get("retries"), Some(&ConfigValue::Integer(5)));
    assert_eq!(resolved.get("log_level"), Some(&ConfigValue::from("warn")));
    assert_eq!(resolved.get("sample_rate"), Some(&ConfigValue::Float(0.25)));
    assert_eq!(resolved.get("tracing"), Some(&ConfigValue::Boolean(false)));

    let trail: Vec<String> = resolved
        .trail("log_level")
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(trail, vec!["global", "environment:prod"]);
}

#[test]
fn test_unmatched_request_falls_back_to_global() {
    init_tracing();
    let resolved = resolve_fixtures("profiles", "api:billing");

    assert_eq!(resolved.len(), 4);
    assert_eq!(
        resolved.get("timeout"),
        Some(&ConfigValue::Duration(Duration::from_secs(30)))
    );
    for key in resolved.keys() {
        assert_eq!(
            resolved.selected_scope(key.as_str()).unwrap().to_string(),
            "global"
        );
    }
}

#[test]
fn test_report_serializes_selected_scopes() {
    init_tracing();
    let resolved = resolve_fixtures("profiles", "environment:staging+tag:canary");
    let report = resolved.to_report();

    let selected = report.entries["tracing"].selected().unwrap();
    assert_eq!(selected.to_string(), "tag:canary");

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["entries"]["log_level"]["value"]["value"], "debug");
    assert_eq!(json["entries"]["log_level"]["trail"][1]["type"], "environment");
    assert_eq!(json["entries"]["tracing"]["value"]["value"], true);
}

#[test]
fn test_report_durations_read_back_as_literals() {
    init_tracing();
    let resolved = resolve_fixtures("profiles", "api:payment");
    let json = serde_json::to_value(resolved.to_report()).unwrap();

    let literal = json["entries"]["timeout"]["value"]["value"].as_str().unwrap();
    assert_eq!(literal, "90s");
    assert_eq!(
        Some(&ConfigValue::Duration(parse_duration(literal).unwrap())),
        resolved.get("timeout")
    );
}

#[test]
fn test_conflicting_documents_fail_resolution() {
    init_tracing();
    let loader = ProfileLoader::default();
    let profiles = loader.load_dir(fixtures_dir("conflicts")).unwrap();
    let resolver = ProfileResolver::new();

    let request = parse_selector(loader.registry(), "api:payment+environment:prod").unwrap();
    let err = resolver.resolve(&profiles, request.as_ref()).unwrap_err();
    assert_eq!(err.keys().into_iter().map(|k| k.as_str()).collect::<Vec<_>>(), vec!["timeout"]);
    assert!(err.to_string().contains("api:payment = 30s, api:payment = 1m"));

    // The conflicting profiles do not match this request.
    let request = parse_selector(loader.registry(), "environment:prod").unwrap();
    let resolved = resolver.resolve(&profiles, request.as_ref()).unwrap();
    assert_eq!(resolved.get("log_level"), Some(&ConfigValue::from("warn")));
    assert!(!resolved.contains_key("timeout"));
}

#[test]
fn test_documents_written_at_runtime() {
    init_tracing();
    let dir = TestProfileDir::new();
    dir.write(
        "global.toml",
        "[[profiles]]\nscope = { type = \"global\" }\nvalues = { retries = 1 }\n",
    );
    dir.write(
        "canary.yaml",
        "profiles:\n  - scope: { type: tag, value: canary, precedence: 40 }\n    values: { retries: 9 }\n",
    );

    let loader = ProfileLoader::default();
    let profiles = loader.load_dir(dir.root()).unwrap();
    let request = parse_selector(loader.registry(), "tag:canary").unwrap();
    let resolved = ProfileResolver::new()
        .resolve(&profiles, request.as_ref())
        .unwrap();

    assert_eq!(resolved.get("retries"), Some(&ConfigValue::Integer(9)));
}
