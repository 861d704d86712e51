//! Console formatter for test results
//!
//! Renders suite outcomes as human-readable text with status glyphs,
//! optional ANSI colors, per-failure detail and a run summary.

use std::io::{self, IsTerminal, Write};

use crate::config::ColorChoice;
use crate::models::{RunSummary, SuiteOutcome, TestOutcome, TestStatus};

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Format a duration given in milliseconds
///
/// Under 1ms: two decimals. Under one second: whole milliseconds.
/// Otherwise seconds with two decimals.
pub fn format_duration(ms: f64) -> String {
    if ms < 1.0 {
        format!("{ms:.2}ms")
    } else if ms < 1000.0 {
        format!("{}ms", ms.trunc() as u64)
    } else {
        format!("{:.2}s", ms / 1000.0)
    }
}

/// Console result formatter
pub struct ResultFormatter {
    colorize: bool,
}

impl ResultFormatter {
    pub fn new(colorize: bool) -> Self {
        Self { colorize }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.colorize {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn status_color(status: TestStatus) -> &'static str {
        match status {
            TestStatus::Pass => GREEN,
            TestStatus::Fail | TestStatus::Error => RED,
            TestStatus::Skip => YELLOW,
        }
    }

    /// Format one test line plus any indented failure detail
    pub fn format_result(&self, result: &TestOutcome) -> String {
        let status = result.status();
        let glyph = self.paint(Self::status_color(status), status.symbol());
        let mut output = String::new();

        match result {
            TestOutcome::Skipped { name, reason } => {
                output.push_str(&format!(
                    "  {glyph} {name} {}\n",
                    self.paint(DIM, &format!("(skipped: {reason})"))
                ));
            }
            TestOutcome::Passed { name, duration_ms } => {
                output.push_str(&format!(
                    "  {glyph} {name} {}\n",
                    self.paint(DIM, &format!("({})", format_duration(*duration_ms)))
                ));
            }
            TestOutcome::Failed {
                name,
                errors,
                duration_ms,
            } => {
                output.push_str(&format!(
                    "  {glyph} {name} {}\n",
                    self.paint(DIM, &format!("({})", format_duration(*duration_ms)))
                ));
                for error in errors {
                    output.push_str(&format!("      {}\n", self.paint(RED, &error.message)));
                    if let Some(expected) = &error.expected {
                        output.push_str(&format!("        expected: {expected}\n"));
                    }
                    if let Some(actual) = &error.actual {
                        output.push_str(&format!("        actual:   {actual}\n"));
                    }
                }
            }
            TestOutcome::Errored {
                name,
                fault,
                duration_ms,
            } => {
                output.push_str(&format!(
                    "  {glyph} {name} {}\n",
                    self.paint(DIM, &format!("({})", format_duration(*duration_ms)))
                ));
                output.push_str(&format!(
                    "      {}\n",
                    self.paint(RED, &format!("error: {}", fault.message))
                ));
            }
        }

        output
    }

    /// Format a suite header followed by every test line
    pub fn format_suite(&self, suite: &SuiteOutcome) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "\n{} {}\n",
            self.paint(BOLD, &suite.suite_name),
            self.paint(DIM, &format!("({})", format_duration(suite.total_duration_ms)))
        ));
        for result in &suite.results {
            output.push_str(&self.format_result(result));
        }
        output
    }

    /// Format the closing summary line
    pub fn format_summary(&self, summary: &RunSummary) -> String {
        let passed = format!("{}/{} passed", summary.passed, summary.total);
        let passed = if summary.is_success() {
            self.paint(GREEN, &passed)
        } else {
            self.paint(RED, &passed)
        };

        let failed = format!("{} failed", summary.failed);
        let failed = if summary.failed > 0 {
            self.paint(RED, &failed)
        } else {
            failed
        };

        let errors = format!("{} errored", summary.errors);
        let errors = if summary.errors > 0 {
            self.paint(RED, &errors)
        } else {
            errors
        };

        let skipped = format!("{} skipped", summary.skipped);
        let skipped = if summary.skipped > 0 {
            self.paint(YELLOW, &skipped)
        } else {
            skipped
        };

        format!(
            "\n{passed}, {failed}, {skipped}, {errors} ({} across suites)\n",
            format_duration(summary.duration_ms)
        )
    }

    /// Format a whole run: every suite, then the summary
    pub fn format_run(&self, suites: &[SuiteOutcome]) -> String {
        let mut output = String::new();
        for suite in suites {
            output.push_str(&self.format_suite(suite));
        }
        output.push_str(&self.format_summary(&RunSummary::new(suites)));
        output
    }
}

impl Default for ResultFormatter {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Render a run to stdout and report whether it succeeded
///
/// Terminal detection happens once, here.
pub fn render_console(suites: &[SuiteOutcome], color: ColorChoice) -> io::Result<bool> {
    let stdout = io::stdout();
    let colorize = match color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => stdout.is_terminal(),
    };

    let formatter = ResultFormatter::new(colorize);
    let mut handle = stdout.lock();
    handle.write_all(formatter.format_run(suites).as_bytes())?;
    handle.flush()?;

    Ok(RunSummary::new(suites).is_success())
}
