//! Pattern-level processing for blacklist entries.
//!
//! `comments` strips inline `(?#...)` groups to produce deduplication keys, and
//! `compiler` compile-checks entries in the blacklist regex dialect.

pub mod comments;
pub mod compiler;
