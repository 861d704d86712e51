//! JSON report
//!
//! Serializes a run with its summary for tools that prefer JSON over JUnit.

use serde::Serialize;

use crate::error::Result;
use crate::models::{RunSummary, SuiteOutcome};

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: RunSummary,
    success: bool,
    suites: &'a [SuiteOutcome],
}

/// Serialize a run as pretty-printed JSON
pub fn to_json(suites: &[SuiteOutcome]) -> Result<String> {
    let summary = RunSummary::new(suites);
    let report = JsonReport {
        success: summary.is_success(),
        summary,
        suites,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
