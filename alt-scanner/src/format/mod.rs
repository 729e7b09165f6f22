//! Format-specific scanners for image references.
//!
//! - `markdown` — inline `![alt](target)` syntax, with fenced code block tracking

pub mod markdown;
