//! Shared validators and sinks for runner integration tests.

use std::sync::Arc;

use schema_fixtures_core::{SchemaDocument, ValidationResult, Validator};
use schema_fixtures_runner::{AssertionSink, FixtureRunner, RecordingSink, SinkError};
use schema_fixtures_source::StaticSource;
use serde_json::{Value, json};

/// Fixture directory used by in-memory runs.
#[allow(dead_code)]
pub const FIXTURE_DIR: &str = "/fixtures/";

/// The single-case number document used across tests.
#[allow(dead_code)]
pub const NUMBER_FIXTURE: &str = r#"[{"schema":{"type":"number"},"pass":[1,2],"fail":["x"]}]"#;

/// Checks only the schema `type` keyword for primitive types.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct TypeKeywordValidator;

impl Validator for TypeKeywordValidator {
    fn validate(&self, schema: &SchemaDocument, instance: &Value) -> ValidationResult {
        let expected = schema.as_value().get("type").and_then(Value::as_str);
        let matches = match expected {
            Some("number") => instance.is_number(),
            Some("integer") => instance.is_i64() || instance.is_u64(),
            Some("string") => instance.is_string(),
            Some("boolean") => instance.is_boolean(),
            Some("null") => instance.is_null(),
            Some("array") => instance.is_array(),
            Some("object") => instance.is_object(),
            _ => true,
        };

        if matches {
            ValidationResult::valid().with_field("value", instance.clone())
        } else {
            ValidationResult::invalid(json!({
                "message": format!("expected {}", expected.unwrap_or("anything")),
            }))
        }
    }
}

/// Accepts every instance.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct AcceptEverything;

impl Validator for AcceptEverything {
    fn validate(&self, _schema: &SchemaDocument, instance: &Value) -> ValidationResult {
        ValidationResult::valid().with_field("value", instance.clone())
    }
}

/// Rejects every instance.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct RejectEverything;

impl Validator for RejectEverything {
    fn validate(&self, _schema: &SchemaDocument, _instance: &Value) -> ValidationResult {
        ValidationResult::invalid("rejected")
    }
}

/// Records assertions but refuses every diagnostic dump.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct BrokenDiagnosticsSink {
    pub inner: RecordingSink,
}

impl AssertionSink for BrokenDiagnosticsSink {
    fn ok(&self, passed: bool, message: &str) {
        self.inner.ok(passed, message);
    }

    fn diagnostic(&self, _raw: &str) -> Result<(), SinkError> {
        Err(SinkError::Rejected("diagnostics unavailable".to_string()))
    }
}

/// Builds a runner over an in-memory source rooted at [`FIXTURE_DIR`].
#[allow(dead_code)]
pub fn static_runner(
    source: StaticSource,
    validator: Arc<dyn Validator>,
    sink: Arc<dyn AssertionSink>,
) -> FixtureRunner {
    FixtureRunner::builder()
        .fixture_dir(FIXTURE_DIR)
        .validator(validator)
        .sink(sink)
        .source(Arc::new(source))
        .build()
        .expect("runner should build")
}
