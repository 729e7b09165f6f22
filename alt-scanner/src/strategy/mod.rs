//! Scan source strategies.
//!
//! Only the filesystem strategy exists. Remote markdown sources would be a
//! second module here, each read bounded by its own timeout.

pub mod fs;
