//! Runs the shipped fixture documents against the `jsonschema` validator.

use std::sync::Arc;

use schema_fixtures_contract_tests::{FIXTURE_DIR, FIXTURE_TYPES, fixture_path};
use schema_fixtures_core::FixtureSet;
use schema_fixtures_jsonschema::JsonSchemaValidator;
use schema_fixtures_runner::{FixtureRunner, RecordingSink, TapSink, TypeOutcome};

fn load_fixture_set(type_name: &str) -> FixtureSet {
    let raw = std::fs::read_to_string(fixture_path(type_name))
        .expect("fixture file should be readable");
    FixtureSet::parse(type_name, &raw).expect("fixture file should be valid")
}

#[test]
fn shipped_fixtures_hold_against_jsonschema() {
    let sink = Arc::new(RecordingSink::new());
    let runner = FixtureRunner::new(
        FIXTURE_DIR,
        Arc::new(JsonSchemaValidator::new()),
        sink.clone(),
    );

    let reports = runner
        .run_fixtures_for_types(FIXTURE_TYPES)
        .expect("shipped fixtures should parse");

    let failures: Vec<String> = sink
        .assertions()
        .into_iter()
        .filter(|assertion| !assertion.passed)
        .map(|assertion| assertion.message)
        .collect();
    assert!(failures.is_empty(), "unexpected failures: {failures:#?}");

    for report in &reports {
        assert!(report.is_clean(), "{} should be clean", report.type_name);
        let expected = load_fixture_set(&report.type_name).instance_count();
        assert_eq!(report.assertion_count(), expected);
    }
}

#[test]
fn shipped_fixtures_cover_every_case() {
    for type_name in FIXTURE_TYPES {
        let set = load_fixture_set(type_name);
        assert!(!set.is_empty(), "{type_name} fixture should have cases");
        for case in &set.cases {
            assert!(
                case.schema.as_value().get("type").is_some(),
                "{type_name} schema should declare a type"
            );
            assert!(!case.pass.is_empty(), "{type_name} case needs pass instances");
        }
    }
}

#[test]
fn unknown_type_reports_single_load_failure() {
    let sink = Arc::new(RecordingSink::new());
    let runner = FixtureRunner::new(
        FIXTURE_DIR,
        Arc::new(JsonSchemaValidator::new()),
        sink.clone(),
    );

    let report = runner
        .run_fixtures_for_type("no-such-type")
        .expect("fetch failure is not an error");
    assert!(matches!(report.outcome, TypeOutcome::LoadFailed { .. }));

    let assertions = sink.assertions();
    assert_eq!(assertions.len(), 1);
    assert_eq!(
        assertions[0].message,
        "... failed to load fixtures for no-such-type"
    );
}

#[test]
fn shipped_number_fixture_renders_tap() {
    let sink = Arc::new(TapSink::new(Vec::new()).expect("header should write"));
    let runner = FixtureRunner::new(
        FIXTURE_DIR,
        Arc::new(JsonSchemaValidator::new()),
        sink.clone(),
    );

    runner
        .run_fixtures_for_type("number")
        .expect("number fixture should parse");
    drop(runner);

    let sink = Arc::try_unwrap(sink)
        .ok()
        .expect("runner dropped its sink handle");
    let (output, summary) = sink.finish().expect("plan should write");
    let text = String::from_utf8(output).expect("tap output should be utf-8");

    assert_eq!(summary.failed, 0);
    assert!(text.contains("ok 1 - ... validation passed for 0 against  number\n"));
    assert!(text.contains("ok 5 - ... validation passed for 1000 against  number\n"));
    assert!(text.ends_with(&format!("1..{}\n", summary.passed)));
    assert!(!text.contains("not ok"));
}
