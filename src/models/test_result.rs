//! Result records produced by the executor
//!
//! Defines per-test outcomes, per-suite outcomes and run-wide summaries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::outcome::FailureRecord;

/// An unhandled fault caught while running a test
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fault {
    /// `"panic"` or `"error"`
    pub kind: String,
    pub message: String,
}

impl Fault {
    pub fn panic(message: impl Into<String>) -> Self {
        Self {
            kind: "panic".to_string(),
            message: message.into(),
        }
    }

    pub fn error(err: &anyhow::Error) -> Self {
        Self {
            kind: "error".to_string(),
            message: format!("{err:#}"),
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Test execution status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Pass,
    Fail,
    Skip,
    Error,
}

impl TestStatus {
    pub fn symbol(&self) -> &'static str {
        match self {
            TestStatus::Pass => "✓",
            TestStatus::Fail | TestStatus::Error => "✗",
            TestStatus::Skip => "○",
        }
    }

    /// Failed and errored outcomes break a run; skips do not
    pub fn is_success(&self) -> bool {
        matches!(self, TestStatus::Pass | TestStatus::Skip)
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStatus::Pass => write!(f, "PASS"),
            TestStatus::Fail => write!(f, "FAIL"),
            TestStatus::Skip => write!(f, "SKIP"),
            TestStatus::Error => write!(f, "ERROR"),
        }
    }
}

/// Result of executing one test
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TestOutcome {
    Passed {
        name: String,
        duration_ms: f64,
    },
    Failed {
        name: String,
        errors: Vec<FailureRecord>,
        duration_ms: f64,
    },
    Skipped {
        name: String,
        reason: String,
    },
    Errored {
        name: String,
        fault: Fault,
        duration_ms: f64,
    },
}

impl TestOutcome {
    pub fn name(&self) -> &str {
        match self {
            TestOutcome::Passed { name, .. }
            | TestOutcome::Failed { name, .. }
            | TestOutcome::Skipped { name, .. }
            | TestOutcome::Errored { name, .. } => name,
        }
    }

    pub fn status(&self) -> TestStatus {
        match self {
            TestOutcome::Passed { .. } => TestStatus::Pass,
            TestOutcome::Failed { .. } => TestStatus::Fail,
            TestOutcome::Skipped { .. } => TestStatus::Skip,
            TestOutcome::Errored { .. } => TestStatus::Error,
        }
    }

    /// Elapsed time; skipped tests are never timed
    pub fn duration_ms(&self) -> f64 {
        match self {
            TestOutcome::Passed { duration_ms, .. }
            | TestOutcome::Failed { duration_ms, .. }
            | TestOutcome::Errored { duration_ms, .. } => *duration_ms,
            TestOutcome::Skipped { .. } => 0.0,
        }
    }
}

impl fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status().symbol(), self.name())?;
        match self {
            TestOutcome::Skipped { reason, .. } => write!(f, " - skipped: {reason}"),
            TestOutcome::Errored { fault, .. } => write!(f, " - {fault}"),
            TestOutcome::Failed { errors, .. } => write!(f, " - {} failure(s)", errors.len()),
            TestOutcome::Passed { .. } => Ok(()),
        }
    }
}

/// Result of executing one suite
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SuiteOutcome {
    pub suite_name: String,
    pub results: Vec<TestOutcome>,
    /// Wall-clock time for the whole suite, teardown included
    pub total_duration_ms: f64,
    pub started_at: DateTime<Utc>,
}

impl SuiteOutcome {
    pub fn new(
        suite_name: impl Into<String>,
        results: Vec<TestOutcome>,
        total_duration_ms: f64,
    ) -> Self {
        Self {
            suite_name: suite_name.into(),
            results,
            total_duration_ms,
            started_at: Utc::now(),
        }
    }

    pub fn started_at(mut self, started_at: DateTime<Utc>) -> Self {
        self.started_at = started_at;
        self
    }

    pub fn count(&self, status: TestStatus) -> usize {
        self.results.iter().filter(|r| r.status() == status).count()
    }

    pub fn is_success(&self) -> bool {
        self.results.iter().all(|r| r.status().is_success())
    }
}

/// Aggregate counts across every suite of a run
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub errors: usize,
    /// Sum of suite durations; exceeds wall-clock time when suites overlap
    pub duration_ms: f64,
}

impl RunSummary {
    pub fn new(suites: &[SuiteOutcome]) -> Self {
        suites.iter().fold(Self::default(), |mut summary, suite| {
            summary.total += suite.results.len();
            summary.passed += suite.count(TestStatus::Pass);
            summary.failed += suite.count(TestStatus::Fail);
            summary.skipped += suite.count(TestStatus::Skip);
            summary.errors += suite.count(TestStatus::Error);
            summary.duration_ms += suite.total_duration_ms;
            summary
        })
    }

    /// True when nothing failed or errored
    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }
}
