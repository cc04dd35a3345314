// blacklint-core/src/lib.rs
//! # blacklint Core Library
//!
//! `blacklint-core` validates the static rule corpus of a chat-moderation bot
//! before the corpus is deployed. A corpus is a directory of plain text files:
//! `bad_*.txt` and `blacklisted_*.txt` hold one pattern per line, and
//! `watched_*.txt` hold tab-separated triples whose third field is the pattern.
//!
//! The library is not a rule engine: it never matches patterns against posts.
//! It only checks that every file is well-formed and that every pattern
//! compiles, so a broken rule is caught in CI instead of in production.
//!
//! ## Modules
//!
//! * `config`: [`ScanConfig`], the naming conventions and compile limits of a corpus.
//! * `discovery`: Lists rule files and tags them with a [`RuleCategory`] and [`RuleContent`].
//! * `classifier`: Line-ending checks and rule text extraction for one raw line.
//! * `sanitizers`: Comment stripping and pattern compile-checking.
//! * `dedupe`: The [`SeenIndex`] used to report duplicate entries.
//! * `checker`: The scan driver, [`BlacklistChecker`], and its report types.
//! * `links`: Helpers for Stack Exchange post links.
//! * `changes`: Decides whether a set of changed files can be hot-reloaded.
//! * `errors`: [`CheckError`], the fatal error type.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use blacklint_core::{BlacklistChecker, ScanConfig};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let checker = BlacklistChecker::new(ScanConfig::default());
//!     let report = checker.check_dir(Path::new("."))?;
//!     for error in &report.errors {
//!         println!("{}", error);
//!     }
//!     std::process::exit(if report.is_clean() { 0 } else { 1 });
//! }
//! ```
//!
//! ## Error Handling
//!
//! Content defects are collected as [`ValidationError`] values and never abort
//! a scan. Only environment problems, such as an unreadable rule file, surface
//! as a [`CheckError`].
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod changes;
pub mod checker;
pub mod classifier;
pub mod config;
pub mod dedupe;
pub mod discovery;
pub mod errors;
pub mod links;
pub mod sanitizers;

/// Re-exports the scan configuration.
pub use config::{environ_or_none, ScanConfig};

/// Re-exports the fatal error type.
pub use errors::CheckError;

/// Re-exports the scan driver and its report types.
pub use checker::{blacklist_integrity_check, BlacklistChecker, IntegrityReport, ValidationError, ValidationErrorKind};

pub use classifier::{classify_line, ClassifiedLine, TerminatorDefect};
pub use dedupe::{Location, SeenIndex};
pub use discovery::{discover_rule_files, RuleCategory, RuleContent, RuleFile};

/// Re-exports the pattern-level helpers.
pub use sanitizers::comments::strip_pattern_comments;
pub use sanitizers::compiler::{CachePolicy, PatternCompiler, PatternError};

pub use changes::{only_blacklists_changed, only_files_changed, only_module_changed};
pub use links::{api_parameter_from_link, escape_format, expand_shorthand_link, post_id_from_link, to_metasmoke_link};
