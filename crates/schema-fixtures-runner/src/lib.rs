#![warn(missing_docs)]
//! # schema-fixtures-runner
//!
//! ## Purpose
//! Drives a JSON Schema validator through fixture documents and reports every
//! outcome as an assertion.
//!
//! ## Responsibilities
//! - Validate runner configuration ([`FixtureRunnerBuilder`]).
//! - Fetch one fixture document per type and run its cases in order
//!   ([`FixtureRunner`]).
//! - Turn validator results into `ok(passed, message)` calls
//!   ([`ResultReporter`]).
//! - Provide recording and TAP assertion sinks.
//!
//! ## Data flow
//! [`FixtureRunner::run_fixtures_for_type`] -> fixture source fetch ->
//! [`schema_fixtures_core::FixtureSet::parse`] -> validator -> reporter ->
//! [`AssertionSink::ok`].
//!
//! ## Error model
//! Missing configuration fails at build time with [`ConfigurationError`].
//! Fetch failures become one failed assertion; parse failures escape as
//! [`RunnerError`]. Diagnostic dump failures are swallowed.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//!
//! use schema_fixtures_core::{SchemaDocument, ValidationResult};
//! use schema_fixtures_runner::{FixtureRunner, RecordingSink};
//! use schema_fixtures_source::StaticSource;
//! use serde_json::Value;
//!
//! fn is_number(_schema: &SchemaDocument, instance: &Value) -> ValidationResult {
//!     if instance.is_number() {
//!         ValidationResult::valid()
//!     } else {
//!         ValidationResult::invalid("not a number")
//!     }
//! }
//!
//! let source = StaticSource::new().with_document(
//!     "/fixtures/number.json",
//!     r#"[{"schema":{"type":"number"},"pass":[1,2],"fail":["x"]}]"#,
//! );
//! let sink = Arc::new(RecordingSink::new());
//! let runner = FixtureRunner::builder()
//!     .fixture_dir("/fixtures/")
//!     .validator(Arc::new(is_number))
//!     .sink(sink.clone())
//!     .source(Arc::new(source))
//!     .build()
//!     .expect("runner should build");
//!
//! let report = runner.run_fixtures_for_type("number").expect("fixtures should parse");
//! assert!(report.is_clean());
//! assert_eq!(sink.assertions().len(), 3);
//! ```

pub mod reporter;
pub mod runner;
pub mod sink;

pub use reporter::{REPORT_TARGET, ResultReporter};
pub use runner::{
    ConfigurationError, FixtureRunner, FixtureRunnerBuilder, RunnerError, TypeOutcome, TypeReport,
};
pub use sink::{Assertion, AssertionSink, RecordingSink, SinkError, TapSink, TapSummary};
