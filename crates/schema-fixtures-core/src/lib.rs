#![warn(missing_docs)]
//! # schema-fixtures-core
//!
//! ## Purpose
//! Defines the data model shared by the `schema-fixtures` workspace.
//!
//! ## Responsibilities
//! - Represent fixture documents ([`FixtureSet`], [`FixtureCase`]).
//! - Represent validator output ([`ValidationResult`]) and the [`Validator`]
//!   seam the runner drives.
//! - Render instance values and schema types into assertion messages.
//!
//! ## Data flow
//! Raw fixture text -> [`FixtureSet::parse`] -> per-case [`Validator::validate`]
//! calls -> [`ValidationResult`] handed to the reporter.
//!
//! ## Ownership and lifetimes
//! Parsed fixtures own their JSON values so a set can outlive the transient
//! body it was decoded from.
//!
//! ## Error model
//! Malformed fixture documents return [`FixtureError`] variants. Nothing in
//! this crate recovers from them; callers decide whether a parse failure is
//! fatal.
//!
//! ## Example
//! ```rust
//! use schema_fixtures_core::{FixtureSet, pass_message};
//!
//! let set = FixtureSet::parse(
//!     "number",
//!     r#"[{"schema":{"type":"number"},"pass":[1,2],"fail":["x"]}]"#,
//! )
//! .expect("fixture should parse");
//! let case = &set.cases[0];
//! assert_eq!(
//!     pass_message(&case.pass[0], &case.schema),
//!     "... validation passed for 1 against  number"
//! );
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// File extension appended to every fixture type name.
pub const FIXTURE_EXTENSION: &str = ".json";

/// Schema document handed to the validator untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaDocument(Value);

impl SchemaDocument {
    /// Wraps a raw JSON value as a schema document.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Returns the underlying JSON value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the document and returns the raw JSON value.
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Renders the schema `type` field for assertion messages.
    ///
    /// A missing field renders as `undefined`.
    pub fn type_label(&self) -> String {
        match self.0.get("type") {
            Some(value) => render_value(value),
            None => "undefined".to_string(),
        }
    }
}

impl From<Value> for SchemaDocument {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// One group of fixture instances sharing a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Schema every instance in this case is validated against.
    pub schema: SchemaDocument,
    /// Instances that must validate.
    #[serde(default)]
    pub pass: Vec<Value>,
    /// Instances that must be rejected.
    #[serde(default)]
    pub fail: Vec<Value>,
}

impl FixtureCase {
    /// Total number of instances carried by this case.
    pub fn instance_count(&self) -> usize {
        self.pass.len() + self.fail.len()
    }
}

/// Ordered fixture cases decoded from one fixture document.
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureSet {
    /// Type name the document was loaded for.
    pub type_name: String,
    /// Cases in document order.
    pub cases: Vec<FixtureCase>,
}

impl FixtureSet {
    /// Decodes a fixture document body.
    ///
    /// # Errors
    /// Returns [`FixtureError::Decode`] for invalid JSON or malformed cases.
    /// Returns [`FixtureError::InvalidShape`] when the top-level value is not
    /// an array or a case schema is not an object.
    pub fn parse(type_name: impl Into<String>, raw: &str) -> Result<Self, FixtureError> {
        let document: Value = serde_json::from_str(raw)?;
        if !document.is_array() {
            return Err(FixtureError::InvalidShape(format!(
                "expected an array of fixture cases, found {}",
                json_kind(&document)
            )));
        }

        let cases: Vec<FixtureCase> = serde_json::from_value(document)?;
        if let Some((index, case)) = cases
            .iter()
            .enumerate()
            .find(|(_, case)| !case.schema.as_value().is_object())
        {
            return Err(FixtureError::InvalidShape(format!(
                "case {index} schema must be an object, found {}",
                json_kind(case.schema.as_value())
            )));
        }

        Ok(Self {
            type_name: type_name.into(),
            cases,
        })
    }

    /// Total number of instances across all cases.
    pub fn instance_count(&self) -> usize {
        self.cases.iter().map(FixtureCase::instance_count).sum()
    }

    /// Returns `true` when the document held no cases.
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

/// Result returned by a [`Validator`].
///
/// Only the presence of `error` is significant: present means the instance
/// was rejected. A JSON `null` error decodes as absent. Remaining fields are
/// kept for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Error payload reported by the validator, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    /// Uninterpreted validator fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ValidationResult {
    /// Builds a result without an error indicator.
    pub fn valid() -> Self {
        Self::default()
    }

    /// Builds a result carrying `error`.
    pub fn invalid(error: impl Into<Value>) -> Self {
        Self {
            error: Some(error.into()),
            extra: Map::new(),
        }
    }

    /// Attaches an extra field kept verbatim for diagnostics.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Returns `true` when an error indicator is present.
    pub fn has_error(&self) -> bool {
        matches!(&self.error, Some(error) if !error.is_null())
    }
}

/// Validator collaborator driven by the fixture runner.
pub trait Validator: Send + Sync {
    /// Validates `instance` against `schema`.
    fn validate(&self, schema: &SchemaDocument, instance: &Value) -> ValidationResult;
}

impl<F> Validator for F
where
    F: Fn(&SchemaDocument, &Value) -> ValidationResult + Send + Sync,
{
    fn validate(&self, schema: &SchemaDocument, instance: &Value) -> ValidationResult {
        self(schema, instance)
    }
}

/// Builds the location of the fixture document for `type_name`.
///
/// The directory is a plain prefix; no separator is inserted.
pub fn fixture_location(fixture_dir: &str, type_name: &str) -> String {
    format!("{fixture_dir}{type_name}{FIXTURE_EXTENSION}")
}

/// Assertion message for an instance expected to validate.
pub fn pass_message(instance: &Value, schema: &SchemaDocument) -> String {
    format!(
        "... validation passed for {} against  {}",
        render_value(instance),
        schema.type_label()
    )
}

/// Assertion message for an instance expected to be rejected.
pub fn fail_message(instance: &Value, schema: &SchemaDocument) -> String {
    format!(
        "... validation failed correctly for {} against  {}",
        render_value(instance),
        schema.type_label()
    )
}

/// Assertion message for a fixture document that could not be fetched.
pub fn load_failure_message(type_name: &str) -> String {
    format!("... failed to load fixtures for {type_name}")
}

/// Renders a JSON value the way string concatenation in a script host does.
///
/// Strings are emitted without quotes, integral numbers without a fraction,
/// arrays as comma-joined elements (with `null` elements empty) and objects
/// as `[object Object]`.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => render_number(number),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => render_value(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn render_number(number: &serde_json::Number) -> String {
    if number.is_i64() || number.is_u64() {
        return number.to_string();
    }

    match number.as_f64() {
        Some(float) => render_float(float),
        None => number.to_string(),
    }
}

// Positional inside [1e-6, 1e21), exponent form with a signed exponent
// outside it; negative zero renders as `0`.
fn render_float(float: f64) -> String {
    if float == 0.0 {
        return "0".to_string();
    }

    let magnitude = float.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return float.to_string();
    }

    let exponential = format!("{float:e}");
    match exponential.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => exponential,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Error type for fixture document decoding.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// Body is not valid JSON or a case is malformed.
    #[error("fixture decode failure: {0}")]
    Decode(#[from] serde_json::Error),
    /// Top-level document is not an array of cases, or a case schema is not
    /// an object.
    #[error("invalid fixture document: {0}")]
    InvalidShape(String),
}
