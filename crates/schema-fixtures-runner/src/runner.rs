//! Fixture runner: fetch, parse, validate and report one type at a time.

use std::sync::Arc;

use schema_fixtures_core::{
    FixtureError, FixtureSet, Validator, fail_message, fixture_location, load_failure_message,
    pass_message,
};
use schema_fixtures_source::{DefaultSource, FixtureSource};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::reporter::ResultReporter;
use crate::sink::AssertionSink;

/// Outcome of running the fixtures for one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeOutcome {
    /// Fixture document could not be fetched; one failed assertion was made.
    LoadFailed {
        /// Fetch error text.
        reason: String,
    },
    /// Every case was run.
    Completed {
        /// Number of fixture cases.
        cases: usize,
        /// Assertions that held.
        passed: usize,
        /// Assertions that did not hold.
        failed: usize,
    },
}

/// Per-type report returned by [`FixtureRunner::run_fixtures_for_type`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeReport {
    /// Type name the fixtures were loaded for.
    pub type_name: String,
    /// What happened.
    pub outcome: TypeOutcome,
}

impl TypeReport {
    /// Returns `true` when the document loaded and every assertion held.
    pub fn is_clean(&self) -> bool {
        matches!(self.outcome, TypeOutcome::Completed { failed: 0, .. })
    }

    /// Number of assertions made for this type.
    pub fn assertion_count(&self) -> usize {
        match self.outcome {
            TypeOutcome::LoadFailed { .. } => 1,
            TypeOutcome::Completed { passed, failed, .. } => passed + failed,
        }
    }
}

/// Runs fixture documents through a validator and reports to a sink.
#[derive(Clone)]
pub struct FixtureRunner {
    fixture_dir: String,
    validator: Arc<dyn Validator>,
    sink: Arc<dyn AssertionSink>,
    source: Arc<dyn FixtureSource>,
}

impl FixtureRunner {
    /// Starts a runner configuration.
    pub fn builder() -> FixtureRunnerBuilder {
        FixtureRunnerBuilder::default()
    }

    /// Creates a runner reading fixtures through [`DefaultSource`].
    pub fn new(
        fixture_dir: impl Into<String>,
        validator: Arc<dyn Validator>,
        sink: Arc<dyn AssertionSink>,
    ) -> Self {
        Self {
            fixture_dir: fixture_dir.into(),
            validator,
            sink,
            source: Arc::new(DefaultSource::new()),
        }
    }

    /// Returns the configured fixture directory prefix.
    pub fn fixture_dir(&self) -> &str {
        &self.fixture_dir
    }

    /// Fetches and runs the fixtures for `type_name`.
    ///
    /// A fetch failure is reported as a single failed assertion and yields
    /// [`TypeOutcome::LoadFailed`].
    ///
    /// # Errors
    /// Returns [`RunnerError::Parse`] when the fetched body is not a valid
    /// fixture document. No assertion is made in that case.
    pub fn run_fixtures_for_type(&self, type_name: &str) -> Result<TypeReport, RunnerError> {
        let reporter = ResultReporter::new(self.sink.as_ref());
        let location = fixture_location(&self.fixture_dir, type_name);
        debug!(type_name, location = %location, "fetching fixtures");

        let body = match self.source.fetch(&location) {
            Ok(body) => body,
            Err(error) => {
                warn!(type_name, location = %location, %error, "failed to load fixtures");
                self.sink.ok(false, &load_failure_message(type_name));
                return Ok(TypeReport {
                    type_name: type_name.to_string(),
                    outcome: TypeOutcome::LoadFailed {
                        reason: error.to_string(),
                    },
                });
            }
        };

        let set = FixtureSet::parse(type_name, &body).map_err(|source| RunnerError::Parse {
            type_name: type_name.to_string(),
            source,
        })?;
        debug!(type_name, cases = set.cases.len(), "parsed fixtures");

        let mut passed = 0;
        let mut failed = 0;
        let mut tally = |held: bool| {
            if held {
                passed += 1;
            } else {
                failed += 1;
            }
        };

        for case in &set.cases {
            let schema = &case.schema;
            for instance in &case.pass {
                let result = self.validator.validate(schema, instance);
                tally(reporter.report_expected_valid(&result, &pass_message(instance, schema)));
            }

            for instance in &case.fail {
                let result = self.validator.validate(schema, instance);
                tally(reporter.report_expected_invalid(&result, &fail_message(instance, schema)));
            }
        }

        info!(type_name, cases = set.cases.len(), passed, failed, "fixtures complete");
        Ok(TypeReport {
            type_name: type_name.to_string(),
            outcome: TypeOutcome::Completed {
                cases: set.cases.len(),
                passed,
                failed,
            },
        })
    }

    /// Runs several types strictly in the given order.
    ///
    /// # Errors
    /// Stops at and returns the first [`RunnerError`].
    pub fn run_fixtures_for_types<I, S>(
        &self,
        type_names: I,
    ) -> Result<Vec<TypeReport>, RunnerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        type_names
            .into_iter()
            .map(|type_name| self.run_fixtures_for_type(type_name.as_ref()))
            .collect()
    }
}

/// Builder validating runner configuration.
#[derive(Default)]
pub struct FixtureRunnerBuilder {
    fixture_dir: Option<String>,
    validator: Option<Arc<dyn Validator>>,
    sink: Option<Arc<dyn AssertionSink>>,
    source: Option<Arc<dyn FixtureSource>>,
}

impl FixtureRunnerBuilder {
    /// Sets the prefix every fixture location starts with.
    pub fn fixture_dir(mut self, fixture_dir: impl Into<String>) -> Self {
        self.fixture_dir = Some(fixture_dir.into());
        self
    }

    /// Sets the validator under test.
    pub fn validator(mut self, validator: Arc<dyn Validator>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Sets the assertion sink.
    pub fn sink(mut self, sink: Arc<dyn AssertionSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Overrides the fixture source. Defaults to [`DefaultSource`].
    pub fn source(mut self, source: Arc<dyn FixtureSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Validates configuration and builds the runner.
    ///
    /// # Errors
    /// Returns the [`ConfigurationError`] naming the first missing value.
    pub fn build(self) -> Result<FixtureRunner, ConfigurationError> {
        let fixture_dir = self
            .fixture_dir
            .ok_or(ConfigurationError::MissingFixtureDir)?;
        let validator = self.validator.ok_or(ConfigurationError::MissingValidator)?;
        let sink = self.sink.ok_or(ConfigurationError::MissingSink)?;
        let source = self
            .source
            .unwrap_or_else(|| Arc::new(DefaultSource::new()) as Arc<dyn FixtureSource>);

        Ok(FixtureRunner {
            fixture_dir,
            validator,
            sink,
            source,
        })
    }
}

/// Runner setup errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// No fixture directory was supplied.
    #[error("You must specify a fixture_dir")]
    MissingFixtureDir,
    /// No validator was supplied.
    #[error("You must specify a validator")]
    MissingValidator,
    /// No assertion sink was supplied.
    #[error("You must specify an assertion sink")]
    MissingSink,
}

/// Errors escaping a fixture run.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// Fetched body is not a valid fixture document.
    #[error("failed to parse fixtures for {type_name}: {source}")]
    Parse {
        /// Type whose document failed.
        type_name: String,
        /// Decode failure.
        #[source]
        source: FixtureError,
    },
}
