//! # alt-scanner
//!
//! Finds markdown images that have no alternative text.
//!
//! The pipeline is a single stateless pass: walk the root for `.md` files,
//! extract inline image references line by line, keep the ones whose alt text
//! is empty, and collect them into a [`ScanReport`] grouped by file.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use alt_scanner::{FsSourceConfig, ScanConfig, scan_fs};
//!
//! let report = scan_fs(&FsSourceConfig::new("docs"), &ScanConfig::default()).unwrap();
//! println!("Markdown files: {}", report.markdown_files);
//! println!("Missing alt text: {}", report.findings_count());
//! println!("Unreadable files: {}", report.failed_files());
//! ```

mod config;
mod error;
mod format;
pub mod output;
mod report;
mod strategy;

pub use config::{FsSourceConfig, ScanConfig};
pub use error::{RootError, ScanError, ScanErrorKind};
pub use format::markdown::{extract_image_references, scan_markdown_content};
pub use report::{FileScan, ImageReference, MissingAltFinding, ScanReport};

use strategy::fs::{check_root, find_markdown_files, read_file_bounded};

/// Scan markdown files under `fs_config.root` for images missing alt text.
///
/// This is the primary public API.
///
/// # Errors
///
/// Returns a [`RootError`] (reachable through `downcast_ref`) if the root does
/// not exist or is not a directory; nothing is scanned in that case.
/// Returns an I/O error if the root cannot be made absolute.
/// Unreadable files never fail the scan: they are recorded on their
/// [`FileScan`] and the remaining files are still scanned.
pub fn scan_fs(fs_config: &FsSourceConfig, scan_config: &ScanConfig) -> anyhow::Result<ScanReport> {
    check_root(&fs_config.root)?;

    let root = std::path::absolute(&fs_config.root)?;
    let source = FsSourceConfig {
        root: root.clone(),
        ..fs_config.clone()
    };

    tracing::info!(root = %root.display(), "searching for markdown files");
    let (paths, scan_errors) = find_markdown_files(&source);
    tracing::info!(count = paths.len(), "found markdown files");

    let files = paths
        .into_iter()
        .map(|path| match read_file_bounded(&path, source.max_file_size) {
            Ok(content) => {
                let findings = scan_markdown_content(&content, &path, scan_config);
                tracing::debug!(file = %path.display(), findings = findings.len(), "scanned file");
                FileScan {
                    file: path,
                    findings,
                    error: None,
                }
            }
            Err(err) => {
                tracing::warn!(file = %path.display(), error = %err.message, "could not read file");
                FileScan {
                    file: path,
                    findings: Vec::new(),
                    error: Some(err),
                }
            }
        })
        .collect::<Vec<_>>();

    Ok(ScanReport {
        root,
        markdown_files: files.len(),
        files,
        scan_errors,
    })
}
