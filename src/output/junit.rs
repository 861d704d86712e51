//! JUnit-style XML report
//!
//! A pure projection of suite outcomes into the layout most CI systems read:
//! `<testsuites>` wrapping one `<testsuite>` per suite wrapping one
//! `<testcase>` per test.

use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};
use crate::models::{RunSummary, SuiteOutcome, TestOutcome, TestStatus};

/// Escape the five XML-reserved characters
///
/// Control characters XML 1.0 cannot carry (everything below U+0020 except
/// tab, newline and carriage return) become U+FFFD.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\t' | '\n' | '\r' => escaped.push(c),
            c if c < '\u{20}' => escaped.push(char::REPLACEMENT_CHARACTER),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn seconds(ms: f64) -> String {
    format!("{:.3}", ms / 1000.0)
}

fn format_testcase(suite_name: &str, result: &TestOutcome) -> String {
    let open = format!(
        "    <testcase name=\"{}\" classname=\"{}\" time=\"{}\"",
        escape(result.name()),
        escape(suite_name),
        seconds(result.duration_ms())
    );

    match result {
        TestOutcome::Passed { .. } => format!("{open}/>\n"),
        TestOutcome::Failed { errors, .. } => {
            let message = errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            let detail = errors
                .iter()
                .map(|e| e.detail())
                .collect::<Vec<_>>()
                .join("\n");
            format!(
                "{open}>\n      <failure message=\"{}\">{}</failure>\n    </testcase>\n",
                escape(&message),
                escape(&detail)
            )
        }
        TestOutcome::Errored { fault, .. } => format!(
            "{open}>\n      <error message=\"{}\" type=\"{}\">{}</error>\n    </testcase>\n",
            escape(&fault.message),
            escape(&fault.kind),
            escape(&fault.to_string())
        ),
        TestOutcome::Skipped { reason, .. } => format!(
            "{open}>\n      <skipped message=\"{}\"/>\n    </testcase>\n",
            escape(reason)
        ),
    }
}

fn format_testsuite(suite: &SuiteOutcome) -> String {
    let mut output = format!(
        "  <testsuite name=\"{}\" tests=\"{}\" failures=\"{}\" errors=\"{}\" skipped=\"{}\" time=\"{}\" timestamp=\"{}\">\n",
        escape(&suite.suite_name),
        suite.results.len(),
        suite.count(TestStatus::Fail),
        suite.count(TestStatus::Error),
        suite.count(TestStatus::Skip),
        seconds(suite.total_duration_ms),
        suite.started_at.format("%Y-%m-%dT%H:%M:%S")
    );
    for result in &suite.results {
        output.push_str(&format_testcase(&suite.suite_name, result));
    }
    output.push_str("  </testsuite>\n");
    output
}

/// Serialize a run as a JUnit XML document
pub fn to_xml(suites: &[SuiteOutcome]) -> String {
    let summary = RunSummary::new(suites);
    let mut output = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    output.push_str(&format!(
        "<testsuites tests=\"{}\" failures=\"{}\" errors=\"{}\" skipped=\"{}\" time=\"{}\">\n",
        summary.total,
        summary.failed,
        summary.errors,
        summary.skipped,
        seconds(summary.duration_ms)
    ));
    for suite in suites {
        output.push_str(&format_testsuite(suite));
    }
    output.push_str("</testsuites>\n");
    output
}

/// Write the JUnit XML document for a run to `path`
pub fn write_report(path: impl AsRef<Path>, suites: &[SuiteOutcome]) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, to_xml(suites)).map_err(|source| Error::Report {
        path: path.to_path_buf(),
        source,
    })?;
    info!("JUnit report written to {}", path.display());
    Ok(())
}
