//! Classifies validator results and forwards one assertion per result.

use schema_fixtures_core::ValidationResult;
use tracing::warn;

use crate::sink::AssertionSink;

/// Tracing target used for raw result dumps.
pub const REPORT_TARGET: &str = "schema_fixtures::report";

/// Routes validator results to an assertion sink.
#[derive(Clone, Copy)]
pub struct ResultReporter<'a> {
    sink: &'a dyn AssertionSink,
}

impl<'a> ResultReporter<'a> {
    /// Creates a reporter writing to `sink`.
    pub fn new(sink: &'a dyn AssertionSink) -> Self {
        Self { sink }
    }

    /// Asserts that `result` carries no error indicator.
    ///
    /// On failure the raw result is dumped before the assertion is made.
    /// Returns the asserted value.
    pub fn report_expected_valid(&self, result: &ValidationResult, message: &str) -> bool {
        let passed = !result.has_error();
        if !passed {
            self.dump(result, message);
        }
        self.sink.ok(passed, message);
        passed
    }

    /// Asserts that `result` carries an error indicator.
    ///
    /// An unexpected pass is dumped like an unexpected error. Returns the
    /// asserted value.
    pub fn report_expected_invalid(&self, result: &ValidationResult, message: &str) -> bool {
        let passed = result.has_error();
        if !passed {
            self.dump(result, message);
        }
        self.sink.ok(passed, message);
        passed
    }

    // Best-effort: nothing here may stop the assertion that follows.
    fn dump(&self, result: &ValidationResult, message: &str) {
        let Ok(raw) = serde_json::to_string(result) else {
            return;
        };

        warn!(target: REPORT_TARGET, assertion = message, result = %raw, "unexpected validation result");
        let _ = self.sink.diagnostic(&raw);
    }
}
