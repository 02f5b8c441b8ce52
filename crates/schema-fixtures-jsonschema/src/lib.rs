#![warn(missing_docs)]
//! # schema-fixtures-jsonschema
//!
//! ## Purpose
//! Adapts the `jsonschema` crate to the [`Validator`] seam.
//!
//! ## Responsibilities
//! - Compile each schema on demand (no caching between calls).
//! - Report compile failures and instance errors through the `error` field of
//!   [`ValidationResult`].
//!
//! ## Error model
//! Nothing is returned as a Rust error. A schema that fails to compile
//! yields `{"kind": "schema", "errors": [...]}`; a rejected instance yields
//! `{"kind": "instance", "errors": [...]}` with one entry per violation.

use jsonschema::{Draft, JSONSchema};
use schema_fixtures_core::{SchemaDocument, ValidationResult, Validator};
use serde_json::{Value, json};
use tracing::debug;

/// [`Validator`] backed by `jsonschema::JSONSchema`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaValidator {
    draft: Option<Draft>,
}

impl JsonSchemaValidator {
    /// Creates a validator that detects the draft from `$schema`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a validator pinned to `draft`.
    pub fn with_draft(draft: Draft) -> Self {
        Self { draft: Some(draft) }
    }
}

impl Validator for JsonSchemaValidator {
    fn validate(&self, schema: &SchemaDocument, instance: &Value) -> ValidationResult {
        let mut options = JSONSchema::options();
        if let Some(draft) = self.draft {
            options.with_draft(draft);
        }

        let compiled = match options.compile(schema.as_value()) {
            Ok(compiled) => compiled,
            Err(error) => {
                debug!(%error, "schema failed to compile");
                return ValidationResult::invalid(json!({
                    "kind": "schema",
                    "errors": [{ "message": error.to_string() }],
                }));
            }
        };

        let errors: Vec<Value> = match compiled.validate(instance) {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .map(|error| {
                    json!({
                        "message": error.to_string(),
                        "instance_path": error.instance_path.to_string(),
                    })
                })
                .collect(),
        };

        if errors.is_empty() {
            ValidationResult::valid()
        } else {
            ValidationResult::invalid(json!({ "kind": "instance", "errors": errors }))
        }
    }
}
