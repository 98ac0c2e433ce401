//! Output formatters for the vec4len CLI
//!
//! Supports colored text for terminals and JSON for tooling and CI.

use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};

use crate::{BackendsReport, Result, RunReport, VerifyReport};

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Colored text output for terminal
    #[default]
    Text,
    /// JSON output for tooling and CI
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Format a run report as colored text
#[must_use]
pub fn format_run(report: &RunReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} {}\n",
        "Backend:".white().bold(),
        report.backend.cyan().bold()
    ));
    output.push_str(&format!(
        "  ├── elements: {} (seed {})\n",
        report.count, report.seed
    ));
    output.push_str(&format!("  ├── passes: {}\n", report.iterations));
    output.push_str(&format!("  ├── sum: {}\n", report.sum));
    output.push_str(&format!(
        "  ├── min: {:.3} ms, mean: {:.3} ms\n",
        report.min_ms, report.mean_ms
    ));
    output.push_str(&format!(
        "  └── throughput: {:.1} M elements/s\n",
        report.elements_per_sec / 1e6
    ));

    output
}

/// Format a verify report as colored text
#[must_use]
pub fn format_verify(report: &VerifyReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} {} elements, seed {}, relative tolerance {:e}\n",
        "Equivalence:".white().bold(),
        report.count,
        report.seed,
        report.tolerance
    ));
    output.push_str(&format!("  reference (scalar): {}\n", report.reference));

    let last = report.results.len().saturating_sub(1);
    for (i, result) in report.results.iter().enumerate() {
        let branch = if i == last { "└──" } else { "├──" };
        output.push_str(&format!(
            "  {} {:<10} {:>16} rel.err {:.2e} {}\n",
            branch,
            result.backend,
            result.sum,
            result.relative_error,
            "[OK]".green()
        ));
    }

    output
}

/// Format the backend list as colored text
#[must_use]
pub fn format_backends(report: &BackendsReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} {}\n",
        "Selected:".white().bold(),
        report.selected.cyan().bold()
    ));
    for info in &report.backends {
        let status = if info.available {
            "available".green()
        } else {
            "unavailable".red()
        };
        output.push_str(&format!("  {:<10} {}\n", info.name, status));
    }

    output
}

/// Write `report` to stdout as text (using `text`) or JSON
pub fn write_report<T: Serialize>(
    report: &T,
    format: OutputFormat,
    text: impl Fn(&T) -> String,
) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Text => write!(handle, "{}", text(report))?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut handle, report)?;
            writeln!(handle)?;
        }
    }

    Ok(())
}
