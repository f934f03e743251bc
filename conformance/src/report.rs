//! Human-readable pass/fail lines
//!
//! The console format is fixed: a 12-column label followed by
//! `mcapi test passed`.

use std::io::{self, Write};

use tracing::warn;

use crate::error::HarnessError;

/// Width of the label column in pass lines
const LABEL_WIDTH: usize = 12;

/// Render the pass line for `label`
pub fn pass_line(label: &str) -> String {
    format!("{label:<width$}mcapi test passed", width = LABEL_WIDTH)
}

/// Sink for the run's report
pub trait Reporter {
    /// A check (or HMAC sub-case) passed
    fn passed(&mut self, label: &str);

    /// The run stopped. Called at most once.
    fn failed(&mut self, error: &HarnessError);
}

/// Writes the report to stdout
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    fn write_line(line: &str) {
        write_report_line(&mut io::stdout().lock(), line);
    }
}

/// A closed sink must not turn a pass into a panic; the error is logged
fn write_report_line(out: &mut impl Write, line: &str) -> bool {
    match writeln!(out, "{line}") {
        Ok(()) => true,
        Err(err) => {
            warn!(error = %err, line, "could not write report line");
            false
        }
    }
}

impl Reporter for ConsoleReporter {
    fn passed(&mut self, label: &str) {
        Self::write_line(&pass_line(label));
    }

    fn failed(&mut self, error: &HarnessError) {
        if let Some(failure) = error.failure() {
            Self::write_line(&failure.to_string());
        }
        Self::write_line(&error.to_string());
    }
}

/// Keeps every line in memory
#[derive(Debug, Default, Clone)]
pub struct RecordingReporter {
    lines: Vec<String>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines in the order they were reported
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl Reporter for RecordingReporter {
    fn passed(&mut self, label: &str) {
        self.lines.push(pass_line(label));
    }

    fn failed(&mut self, error: &HarnessError) {
        if let Some(failure) = error.failure() {
            self.lines.push(failure.to_string());
        }
        self.lines.push(error.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CheckFailure;

    #[test]
    fn pass_lines_are_column_aligned() {
        assert_eq!(pass_line("md5"), "md5         mcapi test passed");
        assert_eq!(pass_line("sha256"), "sha256      mcapi test passed");
        assert_eq!(pass_line("hmac sha"), "hmac sha    mcapi test passed");
        assert_eq!(pass_line("hmac sha512"), "hmac sha512 mcapi test passed");
        assert_eq!(pass_line("huffman"), "huffman     mcapi test passed");
    }

    #[test]
    fn failure_prints_diagnostic_then_trailer() {
        let mut reporter = RecordingReporter::new();
        reporter.passed("md5");
        reporter.failed(&HarnessError::Check {
            check: "sha",
            failure: CheckFailure::DigestMismatch { label: "sha" },
        });
        assert_eq!(
            reporter.lines(),
            [
                "md5         mcapi test passed",
                "sha final memcmp failed",
                "mcapi check_sha failed",
            ]
        );
    }

    struct ClosedSink;

    impl Write for ClosedSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_errors_are_reported_not_raised() {
        crate::logging::init_test_tracing();
        assert!(!write_report_line(&mut ClosedSink, "md5         mcapi test passed"));

        let mut buffer = Vec::new();
        assert!(write_report_line(&mut buffer, "md5         mcapi test passed"));
        assert_eq!(buffer, b"md5         mcapi test passed\n");
    }
}
