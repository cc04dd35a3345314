//! compiler.rs - Compile-checks blacklist patterns.
//!
//! Patterns are written in an extended dialect: named groups, Unicode property
//! escapes, look-around of any width, backreferences, atomic groups, branch
//! reset groups and `(?#...)` comments. `fancy_regex` does the parsing. The
//! constructs it lacks are rewritten into equivalent-for-validation syntax by
//! [`to_engine_dialect`] before the pattern reaches the engine.
//!
//! There is no process-wide cache. Each [`PatternCompiler`] owns its memo (if
//! any) and a scan builds its own non-caching instance, so compiling thousands
//! of throwaway patterns leaves nothing behind.
//!
//! License: MIT OR APACHE 2.0

use fancy_regex::RegexBuilder;
use log::debug;
use std::borrow::Cow;
use std::collections::HashMap;
use std::error::Error as _;
use thiserror::Error;

use crate::config::ScanConfig;

/// Group openers the engine rejects, with the opener used in their place.
///
/// Look-behind becomes look-ahead, which has no fixed-width restriction, and a
/// branch reset group becomes a plain non-capturing group.
const OPENER_REWRITES: [(&str, &str); 3] = [("(?<=", "(?="), ("(?<!", "(?!"), ("(?|", "(?:")];

/// Whether a compiler remembers outcomes between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Every call compiles from scratch and keeps nothing.
    #[default]
    Disabled,
    /// Outcomes are memoized per pattern text for the compiler's lifetime.
    Enabled,
}

/// A pattern that failed to compile.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{description}")]
pub struct PatternError {
    /// One-line summary of the engine's complaint.
    pub description: String,
}

impl PatternError {
    fn from_engine(err: &fancy_regex::Error) -> Self {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            let cause_text = cause.to_string();
            if !message.contains(&cause_text) {
                message.push_str(": ");
                message.push_str(&cause_text);
            }
            source = cause.source();
        }
        Self { description: short_description(&message) }
    }
}

/// Rewrites `pattern` into syntax `fancy_regex` can compile.
///
/// Outside character classes, comment groups are dropped and the openers in
/// [`OPENER_REWRITES`] are replaced. Class contents are copied untouched, so
/// `[(?#)]` stays a class of four characters. An unterminated `(?#` is left in
/// place for the engine to reject.
pub(crate) fn to_engine_dialect(pattern: &str) -> Cow<'_, str> {
    let bytes = pattern.as_bytes();
    let mut out = String::new();
    let mut copied = 0;
    let mut in_class = false;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                i += 2;
                continue;
            }
            b'[' if !in_class => {
                in_class = true;
                i += 1;
                // A leading `]` (after an optional `^`) is a literal member.
                if bytes.get(i) == Some(&b'^') {
                    i += 1;
                }
                if bytes.get(i) == Some(&b']') {
                    i += 1;
                }
                continue;
            }
            b']' if in_class => in_class = false,
            b'(' if !in_class => {
                let rest = &pattern[i..];
                if rest.starts_with("(?#") {
                    if let Some(close) = rest.find(')') {
                        out.push_str(&pattern[copied..i]);
                        i += close + 1;
                        copied = i;
                        continue;
                    }
                } else if let Some((from, to)) = OPENER_REWRITES.iter().find(|(from, _)| rest.starts_with(from)) {
                    out.push_str(&pattern[copied..i]);
                    out.push_str(to);
                    i += from.len();
                    copied = i;
                    continue;
                }
            }
            _ => {}
        }
        i += 1;
    }

    if copied == 0 {
        Cow::Borrowed(pattern)
    } else {
        out.push_str(&pattern[copied..]);
        Cow::Owned(out)
    }
}

/// Reduces a possibly multi-line engine message to one line.
///
/// Syntax errors from the underlying regex engine render a caret diagram
/// followed by an `error: ...` line; that line is the useful part.
fn short_description(message: &str) -> String {
    let lines: Vec<&str> = message.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    let error_line = lines.iter().find_map(|l| l.strip_prefix("error:")).map(str::trim);

    match (lines.first(), error_line) {
        (Some(first), Some(error)) if first.ends_with(':') => format!("{} {}", first, error),
        (_, Some(error)) => error.to_string(),
        (Some(first), None) => first.to_string(),
        (None, None) => "unknown pattern error".to_string(),
    }
}

/// Compiles patterns in the blacklist dialect to check their syntax.
#[derive(Debug)]
pub struct PatternCompiler {
    size_limit: usize,
    backtrack_limit: usize,
    policy: CachePolicy,
    memo: HashMap<String, Result<(), PatternError>>,
}

impl PatternCompiler {
    pub fn new(config: &ScanConfig, policy: CachePolicy) -> Self {
        Self {
            size_limit: config.size_limit,
            backtrack_limit: config.backtrack_limit,
            policy,
            memo: HashMap::new(),
        }
    }

    /// A compiler that retains nothing between calls.
    pub fn non_caching(config: &ScanConfig) -> Self {
        Self::new(config, CachePolicy::Disabled)
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Number of memoized outcomes. Always zero for a non-caching compiler.
    pub fn cached_len(&self) -> usize {
        self.memo.len()
    }

    /// Compiles `pattern` in Unicode mode and discards the program.
    pub fn compile(&mut self, pattern: &str) -> Result<(), PatternError> {
        if self.policy == CachePolicy::Enabled {
            if let Some(outcome) = self.memo.get(pattern) {
                return outcome.clone();
            }
        }

        let outcome = self.compile_uncached(pattern);

        if self.policy == CachePolicy::Enabled {
            self.memo.insert(pattern.to_string(), outcome.clone());
        }
        outcome
    }

    fn compile_uncached(&self, pattern: &str) -> Result<(), PatternError> {
        let engine_pattern = to_engine_dialect(pattern);
        let result = RegexBuilder::new(&engine_pattern)
            .backtrack_limit(self.backtrack_limit)
            .delegate_size_limit(self.size_limit)
            .build();

        match result {
            Ok(_compiled) => Ok(()),
            Err(e) => {
                let err = PatternError::from_engine(&e);
                debug!(
                    target: "blacklint_core::sanitizer",
                    "Pattern {:?} failed to compile: {}",
                    pattern, err
                );
                Err(err)
            }
        }
    }
}
