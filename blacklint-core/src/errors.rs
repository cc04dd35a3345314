//! errors.rs - Fatal error types for the blacklint-core library.
//!
//! Content defects in a rule file are never errors in this sense: they are
//! collected as [`crate::checker::ValidationError`] values. The variants here
//! cover conditions that abort a scan outright, such as an unreadable file or
//! an unusable configuration.
//!
//! License: MIT OR APACHE 2.0

use std::path::PathBuf;
use thiserror::Error;

/// All fatal error types in the `blacklint-core` library.
///
/// Marked `#[non_exhaustive]` so new failure modes can be added without
/// breaking downstream matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CheckError {
    #[error("Failed to read rule file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid discovery pattern: {0}")]
    Glob(#[from] glob::PatternError),

    #[error("Failed to list rule files: {0}")]
    GlobEntry(#[from] glob::GlobError),

    #[error("Invalid scan configuration: {0}")]
    Config(String),
}

impl CheckError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CheckError::Io { path: path.into(), source }
    }
}
