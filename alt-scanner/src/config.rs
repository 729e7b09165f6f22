//! Configuration types for alt-text scanning.
//!
//! Split into extractor config (what counts as a finding) and source-specific
//! config (how markdown files are discovered and read).

use std::path::PathBuf;

/// Extractor options, independent of where the markdown came from.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct ScanConfig {
    /// Do not report images whose target starts with `http` (default: off).
    ///
    /// Remote images cannot be inspected locally, so some workflows only care
    /// about images that live in the repository.
    pub skip_remote: bool,
    /// Skip lines inside fenced code blocks (default: off).
    /// Useful when image syntax is shown as code in documentation.
    pub skip_code_blocks: bool,
}

/// Filesystem-specific source options.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct FsSourceConfig {
    /// Root directory to scan recursively. Must exist and be a directory.
    pub root: PathBuf,
    /// Exclude patterns (glob format), matched against the full path or the file name.
    pub exclude: Vec<String>,
    /// Maximum file size in bytes (default: 10 MB).
    pub max_file_size: u64,
    /// Whether to follow symbolic links (default: `false`).
    pub follow_links: bool,
    /// Maximum directory traversal depth (default: 64).
    pub max_depth: usize,
}

impl FsSourceConfig {
    /// Config for `root` with every other option at its default.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }
}

impl Default for FsSourceConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            exclude: Vec::new(),
            max_file_size: 10_485_760,
            follow_links: false,
            max_depth: 64,
        }
    }
}
