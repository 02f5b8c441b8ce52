//! Assertion sinks receiving the runner's `ok(passed, message)` calls.

use std::io::Write;
use std::sync::Mutex;

use thiserror::Error;

/// Collaborator receiving every assertion the runner makes.
pub trait AssertionSink: Send + Sync {
    /// Records one assertion.
    fn ok(&self, passed: bool, message: &str);

    /// Receives a raw diagnostic dump for a failed assertion.
    ///
    /// Errors are ignored by the reporter. The default discards the dump.
    fn diagnostic(&self, _raw: &str) -> Result<(), SinkError> {
        Ok(())
    }
}

/// One recorded assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assertion {
    /// Whether the assertion held.
    pub passed: bool,
    /// Assertion message.
    pub message: String,
}

/// In-memory sink keeping assertions and diagnostics in call order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    assertions: Mutex<Vec<Assertion>>,
    diagnostics: Mutex<Vec<String>>,
}

impl RecordingSink {
    /// Creates an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of recorded assertions.
    pub fn assertions(&self) -> Vec<Assertion> {
        self.assertions
            .lock()
            .map(|assertions| assertions.clone())
            .unwrap_or_default()
    }

    /// Returns a snapshot of recorded diagnostic dumps.
    pub fn diagnostics(&self) -> Vec<String> {
        self.diagnostics
            .lock()
            .map(|diagnostics| diagnostics.clone())
            .unwrap_or_default()
    }

    /// Number of recorded assertions that did not hold.
    pub fn failure_count(&self) -> usize {
        self.assertions()
            .iter()
            .filter(|assertion| !assertion.passed)
            .count()
    }
}

impl AssertionSink for RecordingSink {
    fn ok(&self, passed: bool, message: &str) {
        if let Ok(mut assertions) = self.assertions.lock() {
            assertions.push(Assertion {
                passed,
                message: message.to_string(),
            });
        }
    }

    fn diagnostic(&self, raw: &str) -> Result<(), SinkError> {
        let mut diagnostics = self.diagnostics.lock().map_err(|_| SinkError::Poisoned)?;
        diagnostics.push(raw.to_string());
        Ok(())
    }
}

/// Totals written by [`TapSink::finish`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapSummary {
    /// Assertions that held.
    pub passed: usize,
    /// Assertions that did not hold.
    pub failed: usize,
}

#[derive(Debug)]
struct TapState<W> {
    writer: W,
    passed: usize,
    failed: usize,
    write_error: Option<std::io::Error>,
}

/// Sink writing Test Anything Protocol lines to `W`.
///
/// Assertions are numbered from 1. Diagnostics become `#` comment lines and
/// [`TapSink::finish`] writes the trailing `1..N` plan.
#[derive(Debug)]
pub struct TapSink<W> {
    state: Mutex<TapState<W>>,
}

impl<W: Write + Send> TapSink<W> {
    /// Creates a TAP sink and writes the version header.
    ///
    /// # Errors
    /// Returns [`SinkError::Io`] when the header cannot be written.
    pub fn new(mut writer: W) -> Result<Self, SinkError> {
        writeln!(writer, "TAP version 13")?;
        Ok(Self {
            state: Mutex::new(TapState {
                writer,
                passed: 0,
                failed: 0,
                write_error: None,
            }),
        })
    }

    /// Writes the plan line and returns the writer with final totals.
    ///
    /// # Errors
    /// Returns the first write error seen by [`AssertionSink::ok`], or any
    /// error writing the plan.
    pub fn finish(self) -> Result<(W, TapSummary), SinkError> {
        let mut state = self.state.into_inner().map_err(|_| SinkError::Poisoned)?;
        if let Some(error) = state.write_error.take() {
            return Err(SinkError::Io(error));
        }

        writeln!(state.writer, "1..{}", state.passed + state.failed)?;
        state.writer.flush()?;
        Ok((
            state.writer,
            TapSummary {
                passed: state.passed,
                failed: state.failed,
            },
        ))
    }
}

impl<W: Write + Send> AssertionSink for TapSink<W> {
    fn ok(&self, passed: bool, message: &str) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };

        if passed {
            state.passed += 1;
        } else {
            state.failed += 1;
        }
        let number = state.passed + state.failed;
        let status = if passed { "ok" } else { "not ok" };
        let line = format!("{status} {number} - {}", single_line(message));

        if let Err(error) = writeln!(state.writer, "{line}")
            && state.write_error.is_none()
        {
            state.write_error = Some(error);
        }
    }

    fn diagnostic(&self, raw: &str) -> Result<(), SinkError> {
        let mut state = self.state.lock().map_err(|_| SinkError::Poisoned)?;
        for line in raw.lines() {
            writeln!(state.writer, "# {line}")?;
        }
        Ok(())
    }
}

fn single_line(message: &str) -> String {
    message.replace(['\r', '\n'], " ")
}

/// Errors produced by assertion sinks.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Writing sink output failed.
    #[error("sink write failure: {0}")]
    Io(#[from] std::io::Error),
    /// Sink state lock was poisoned by a panicking writer.
    #[error("sink state lock poisoned")]
    Poisoned,
    /// Sink refused the diagnostic.
    #[error("sink rejected diagnostic: {0}")]
    Rejected(String),
}
