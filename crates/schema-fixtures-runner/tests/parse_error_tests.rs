//! Tests that malformed fixture documents escape to the caller.

mod common;

use std::sync::Arc;

use common::{TypeKeywordValidator, static_runner};
use schema_fixtures_core::FixtureError;
use schema_fixtures_runner::{RecordingSink, RunnerError};
use schema_fixtures_source::StaticSource;

#[test]
fn parse_error_tests_propagate_invalid_json_without_assertions() {
    let sink = Arc::new(RecordingSink::new());
    let source = StaticSource::new().with_document("/fixtures/string.json", "not json");
    let runner = static_runner(source, Arc::new(TypeKeywordValidator), sink.clone());

    let error = runner
        .run_fixtures_for_type("string")
        .expect_err("malformed body should fail");
    match error {
        RunnerError::Parse { type_name, source } => {
            assert_eq!(type_name, "string");
            assert!(matches!(source, FixtureError::Decode(_)));
        }
    }
    assert!(sink.assertions().is_empty());
}

#[test]
fn parse_error_tests_stop_multi_type_runs() {
    let sink = Arc::new(RecordingSink::new());
    let source = StaticSource::new()
        .with_document("/fixtures/object.json", r#"{"schema": {}}"#)
        .with_document(
            "/fixtures/null.json",
            r#"[{"schema":{"type":"null"},"pass":[null],"fail":[]}]"#,
        );
    let runner = static_runner(source, Arc::new(TypeKeywordValidator), sink.clone());

    let result = runner.run_fixtures_for_types(["object", "null"]);
    assert!(matches!(
        result,
        Err(RunnerError::Parse {
            source: FixtureError::InvalidShape(_),
            ..
        })
    ));
    assert!(sink.assertions().is_empty());
}

#[test]
fn parse_error_tests_reject_non_object_schema_without_assertions() {
    let sink = Arc::new(RecordingSink::new());
    let source = StaticSource::new().with_document(
        "/fixtures/number.json",
        r#"[{"schema":5,"pass":[1],"fail":["x"]}]"#,
    );
    let runner = static_runner(source, Arc::new(TypeKeywordValidator), sink.clone());

    let error = runner
        .run_fixtures_for_type("number")
        .expect_err("scalar schema should fail");
    match error {
        RunnerError::Parse { type_name, source } => {
            assert_eq!(type_name, "number");
            assert!(matches!(source, FixtureError::InvalidShape(_)));
        }
    }
    assert!(sink.assertions().is_empty());
}
