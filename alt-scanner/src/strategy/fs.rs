//! Filesystem scan source.
//!
//! Discovers markdown files under a root directory and reads them for the
//! extractor. Symlinks are not followed by default, traversal depth is bounded,
//! and reads are capped at `max_file_size`.

use std::io::Read;
use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::config::FsSourceConfig;
use crate::error::{RootError, ScanError, ScanErrorKind};

/// Directories to skip
pub const SKIP_DIRS: &[&str] = &["target", "node_modules", ".git"];

/// Check the scan root before any traversal begins.
///
/// # Errors
///
/// Returns `RootError::NotFound` if `root` does not exist and
/// `RootError::NotADirectory` if it exists but is not a directory.
pub fn check_root(root: &Path) -> Result<(), RootError> {
    if !root.exists() {
        return Err(RootError::NotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(RootError::NotADirectory(root.to_path_buf()));
    }
    Ok(())
}

/// Check if a path matches any of the exclude patterns
fn matches_exclude(path: &Path, exclude_patterns: &[Pattern]) -> bool {
    let path_str = path.to_string_lossy();
    exclude_patterns.iter().any(|pattern| {
        pattern.matches(&path_str)
            || path
                .file_name()
                .is_some_and(|name| pattern.matches(&name.to_string_lossy()))
    })
}

/// Returns `true` if the entry should be **included** (i.e., is NOT a skip dir).
fn is_not_skip_dir(entry: &walkdir::DirEntry) -> bool {
    if entry.depth() > 0
        && entry.file_type().is_dir()
        && let Some(name) = entry.file_name().to_str()
    {
        return !SKIP_DIRS.contains(&name);
    }
    true
}

fn has_entries(dir: &Path) -> bool {
    std::fs::read_dir(dir).is_ok_and(|mut entries| entries.next().is_some())
}

/// `.md` extension, compared case-insensitively.
#[must_use]
pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

/// Find all markdown files under `config.root`.
///
/// Returns `(files, scan_errors)`:
/// - `files`: markdown paths sorted lexicographically, ready to read.
/// - `scan_errors`: walk errors, invalid exclude patterns, and directories
///   left unscanned by `max_depth`. These are reported, never silently discarded.
///
/// The root itself is assumed to have passed [`check_root`].
#[must_use]
pub fn find_markdown_files(config: &FsSourceConfig) -> (Vec<PathBuf>, Vec<ScanError>) {
    let mut files = Vec::new();
    let mut scan_errors = Vec::new();

    let mut exclude_patterns = Vec::with_capacity(config.exclude.len());
    for pat_str in &config.exclude {
        match Pattern::new(pat_str) {
            Ok(pat) => exclude_patterns.push(pat),
            Err(e) => {
                scan_errors.push(ScanError::new(
                    pat_str,
                    ScanErrorKind::InvalidExcludePattern,
                    format!("Invalid exclude glob pattern '{pat_str}': {e}"),
                ));
            }
        }
    }

    for entry_result in WalkDir::new(&config.root)
        .follow_links(config.follow_links)
        .max_depth(config.max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(is_not_skip_dir)
    {
        let entry = match entry_result {
            Ok(e) => e,
            Err(walk_err) => {
                let path = walk_err
                    .path()
                    .map_or_else(|| config.root.clone(), Path::to_path_buf);
                tracing::warn!(path = %path.display(), error = %walk_err, "directory traversal error");
                scan_errors.push(ScanError::new(
                    path,
                    ScanErrorKind::WalkError,
                    format!("Directory traversal error: {walk_err}"),
                ));
                continue;
            }
        };

        let file_path = entry.path();

        if entry.file_type().is_dir()
            && entry.depth() == config.max_depth
            && has_entries(file_path)
        {
            tracing::warn!(path = %file_path.display(), max_depth = config.max_depth, "directory not scanned");
            scan_errors.push(ScanError::new(
                file_path,
                ScanErrorKind::DepthLimitExceeded,
                format!(
                    "Directory not scanned: maximum depth of {} reached",
                    config.max_depth
                ),
            ));
            continue;
        }

        // Regular files only: no directories, devices, pipes or sockets
        if !entry.file_type().is_file() {
            continue;
        }

        if !is_markdown(file_path) || matches_exclude(file_path, &exclude_patterns) {
            continue;
        }

        files.push(file_path.to_path_buf());
    }

    files.sort();
    files.dedup();
    (files, scan_errors)
}

/// Read a file using a bounded streaming read, enforcing `max_file_size`.
///
/// # Errors
///
/// Returns a `ScanError` if the file cannot be opened or read, exceeds
/// `max_file_size`, or is not valid UTF-8.
pub fn read_file_bounded(path: &Path, max_file_size: u64) -> Result<String, ScanError> {
    let file = std::fs::File::open(path).map_err(|e| {
        ScanError::new(
            path,
            ScanErrorKind::IoError,
            format!("Failed to open file: {e}"),
        )
    })?;

    // Read at most max_file_size + 1 bytes to detect oversized files
    let mut buffer = Vec::new();
    file.take(max_file_size.saturating_add(1))
        .read_to_end(&mut buffer)
        .map_err(|e| {
            ScanError::new(
                path,
                ScanErrorKind::IoError,
                format!("Failed to read file: {e}"),
            )
        })?;

    if buffer.len() as u64 > max_file_size {
        return Err(ScanError::new(
            path,
            ScanErrorKind::FileTooLarge,
            format!("File exceeds maximum size of {max_file_size} bytes"),
        ));
    }

    String::from_utf8(buffer).map_err(|_| {
        ScanError::new(
            path,
            ScanErrorKind::InvalidEncoding,
            "File is not valid UTF-8".to_owned(),
        )
    })
}
