//! Output formatting for scan reports.
//!
//! Provides the plain-text report and a JSON rendering of `ScanReport`.
//! Where the text goes (terminal, file) is the caller's concern.

use std::io::Write;

use crate::report::ScanReport;

/// Format a `ScanReport` as JSON to a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &ScanReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Format a `ScanReport` as the human-readable text report.
///
/// ```text
/// Searching for markdown files in: <root>
/// Found <N> markdown file(s).
///
/// File: <path>
/// Missing alt text line <n>: <raw reference>
/// ```
///
/// Files without findings get no block. Unreadable files get a `Warning:` line
/// at their position in file order.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(report: &ScanReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(
        writer,
        "Searching for markdown files in: {}",
        report.root.display()
    )?;
    writeln!(writer, "Found {} markdown file(s).", report.markdown_files)?;

    for scan_err in &report.scan_errors {
        writeln!(writer, "{}", scan_err.format_human_readable())?;
    }

    for file in &report.files {
        if let Some(err) = &file.error {
            writeln!(writer, "{}", err.format_human_readable())?;
            continue;
        }
        if file.findings.is_empty() {
            continue;
        }

        writeln!(writer)?;
        writeln!(writer, "File: {}", file.file.display())?;
        for finding in &file.findings {
            writeln!(
                writer,
                "Missing alt text line {}: {}",
                finding.line(),
                finding.raw()
            )?;
        }
    }

    Ok(())
}
