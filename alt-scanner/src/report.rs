//! Scan report types.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::ScanError;

/// One occurrence of inline markdown image syntax: `![alt](target "title")`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct ImageReference {
    /// File the reference was found in.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column of the leading `!` (1-indexed, in bytes).
    pub column: usize,
    /// The matched text, e.g. `![](img.png)`.
    pub raw: String,
    /// Text between the brackets, untrimmed. May be empty.
    pub alt: String,
    /// Text between the parentheses: the image path plus any title.
    pub target: String,
}

impl ImageReference {
    /// Empty or whitespace-only alt text counts as missing.
    #[must_use]
    pub fn is_missing_alt(&self) -> bool {
        self.alt.trim().is_empty()
    }

    /// Whether the target points at a remote (`http`/`https`) resource.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        self.target.trim_start().starts_with("http")
    }
}

/// An image reference without alt text: the unit reported to the user.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct MissingAltFinding(pub ImageReference);

impl MissingAltFinding {
    /// Line number (1-indexed).
    #[must_use]
    pub fn line(&self) -> usize {
        self.0.line
    }

    /// The raw reference text as it appears in the source line.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.0.raw
    }
}

/// Outcome of scanning one discovered markdown file.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct FileScan {
    pub file: PathBuf,
    /// Findings in ascending line order (then column). Empty when `error` is set.
    pub findings: Vec<MissingAltFinding>,
    /// Set when the file could not be read; the scan carried on without it.
    pub error: Option<ScanError>,
}

/// Result of a scan run.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct ScanReport {
    /// The scan root as an absolute path.
    pub root: PathBuf,
    /// Number of markdown files discovered (readable or not).
    pub markdown_files: usize,
    /// One entry per discovered file, in lexicographic path order.
    pub files: Vec<FileScan>,
    /// Discovery-stage errors (walk failures, bad exclude patterns).
    pub scan_errors: Vec<ScanError>,
}

impl ScanReport {
    /// All findings, grouped by file in file order.
    pub fn findings(&self) -> impl Iterator<Item = &MissingAltFinding> {
        self.files.iter().flat_map(|f| f.findings.iter())
    }

    /// Number of images missing alt text.
    #[must_use]
    pub fn findings_count(&self) -> usize {
        self.files.iter().map(|f| f.findings.len()).sum()
    }

    /// Number of markdown files that could not be read.
    #[must_use]
    pub fn failed_files(&self) -> usize {
        self.files.iter().filter(|f| f.error.is_some()).count()
    }

    /// Whether every file was scanned and no image is missing alt text.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.scan_errors.is_empty() && self.failed_files() == 0 && self.findings_count() == 0
    }
}
