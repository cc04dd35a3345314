//! The blacklist integrity checker.
//!
//! Drives discovery, line classification, pattern compilation and duplicate
//! tracking over a corpus and collects every defect it finds. Defects are
//! values: a scan only fails outright when a rule file cannot be listed or
//! read.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, info, warn};
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::classifier::{classify_line, TerminatorDefect};
use crate::config::ScanConfig;
use crate::dedupe::{Location, SeenIndex};
use crate::discovery::{discover_rule_files, RuleFile};
use crate::errors::CheckError;
use crate::sanitizers::comments::strip_pattern_comments;
use crate::sanitizers::compiler::PatternCompiler;

/// The kinds of defect a rule line can have.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationErrorKind {
    DosLineEnding,
    MissingNewline,
    EmptyLine,
    RegexCompileFailure { description: String },
    /// `entry` is the comment-stripped text; `first` is where it first appeared.
    DuplicateEntry { entry: String, first: Location },
    /// A watched line with fewer than three tab-separated fields.
    MalformedWatchedEntry { fields: usize },
}

impl From<TerminatorDefect> for ValidationErrorKind {
    fn from(defect: TerminatorDefect) -> Self {
        match defect {
            TerminatorDefect::DosLineEnding => ValidationErrorKind::DosLineEnding,
            TerminatorDefect::MissingNewline => ValidationErrorKind::MissingNewline,
            TerminatorDefect::EmptyLine => ValidationErrorKind::EmptyLine,
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ValidationErrorKind::DosLineEnding => write!(f, "DOS line ending"),
            ValidationErrorKind::MissingNewline => write!(f, "No newline"),
            ValidationErrorKind::EmptyLine => write!(f, "Empty line"),
            ValidationErrorKind::RegexCompileFailure { description } => write!(f, "Bad regex: {}", description),
            ValidationErrorKind::DuplicateEntry { entry, first } => {
                write!(f, "Duplicate entry {} (also {})", entry, first)
            }
            ValidationErrorKind::MalformedWatchedEntry { fields } => write!(
                f,
                "Malformed watched entry: expected at least 3 tab-separated fields, found {}",
                fields
            ),
        }
    }
}

/// One defect found in a rule file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub file: String,
    pub line: usize,
    #[serde(flatten)]
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    pub fn new(file: impl Into<String>, line: usize, kind: ValidationErrorKind) -> Self {
        Self { file: file.into(), line, kind }
    }

    pub fn location(&self) -> Location {
        Location::new(self.file.clone(), self.line)
    }
}

/// Renders as `{file}:{line}:{message}`.
impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.kind)
    }
}

/// Result of a completed scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntegrityReport {
    pub files_scanned: usize,
    pub lines_scanned: usize,
    /// Defects in file discovery order, then line order.
    pub errors: Vec<ValidationError>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// The defects formatted as `{file}:{line}:{message}` strings.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

/// Per-scan state. Built fresh for each scan and dropped when it ends.
struct ScanState {
    compiler: PatternCompiler,
    seen: SeenIndex,
    report: IntegrityReport,
}

/// Checks blacklist corpora for structural defects.
#[derive(Debug, Clone, Default)]
pub struct BlacklistChecker {
    config: ScanConfig,
}

impl BlacklistChecker {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Discovers and checks every rule file in `dir`.
    pub fn check_dir(&self, dir: &Path) -> Result<IntegrityReport, CheckError> {
        let files = discover_rule_files(dir, &self.config)?;
        self.check_files(&files)
    }

    /// Checks `files` in the given order.
    pub fn check_files(&self, files: &[RuleFile]) -> Result<IntegrityReport, CheckError> {
        let mut state = ScanState {
            compiler: PatternCompiler::non_caching(&self.config),
            seen: SeenIndex::new(),
            report: IntegrityReport::default(),
        };

        for rule_file in files {
            check_file(rule_file, &mut state)?;
            state.report.files_scanned += 1;
        }

        info!(
            "Scanned {} rule files ({} lines, {} unique entries): {} problem(s) found.",
            state.report.files_scanned,
            state.report.lines_scanned,
            state.seen.len(),
            state.report.errors.len()
        );
        Ok(state.report)
    }
}

fn check_file(rule_file: &RuleFile, state: &mut ScanState) -> Result<(), CheckError> {
    debug!(
        "Checking {} ({} file, {:?})",
        rule_file.display_name, rule_file.category, rule_file.content
    );

    let file = File::open(&rule_file.path).map_err(|e| CheckError::io(&rule_file.path, e))?;
    let mut reader = BufReader::new(file);
    let mut raw = String::new();
    let mut lineno = 0usize;

    loop {
        raw.clear();
        let read = reader
            .read_line(&mut raw)
            .map_err(|e| CheckError::io(&rule_file.path, e))?;
        if read == 0 {
            break;
        }
        lineno += 1;
        check_line(rule_file, lineno, &raw, state);
    }

    state.report.lines_scanned += lineno;
    Ok(())
}

fn check_line(rule_file: &RuleFile, lineno: usize, raw: &str, state: &mut ScanState) {
    let errors = &mut state.report.errors;
    let classified = classify_line(raw, rule_file.category);

    if let Some(defect) = classified.terminator {
        errors.push(ValidationError::new(&rule_file.display_name, lineno, defect.into()));
    }

    let Some(candidate) = classified.candidate else {
        if let Some(fields) = classified.malformed_fields {
            warn!(
                "{}:{}: watched entry has {} field(s), expected at least 3",
                rule_file.display_name, lineno, fields
            );
            errors.push(ValidationError::new(
                &rule_file.display_name,
                lineno,
                ValidationErrorKind::MalformedWatchedEntry { fields },
            ));
        }
        return;
    };

    if rule_file.validates_patterns() {
        if let Err(e) = state.compiler.compile(candidate) {
            errors.push(ValidationError::new(
                &rule_file.display_name,
                lineno,
                ValidationErrorKind::RegexCompileFailure { description: e.description },
            ));
        }
    }

    let entry = strip_pattern_comments(candidate);
    let location = Location::new(rule_file.display_name.clone(), lineno);
    if let Some(first) = state.seen.observe(&entry, location) {
        errors.push(ValidationError::new(
            &rule_file.display_name,
            lineno,
            ValidationErrorKind::DuplicateEntry { entry: entry.into_owned(), first: first.clone() },
        ));
    }
}

/// Checks the corpus in `dir` with the default conventions and returns the
/// defects as `{file}:{line}:{message}` strings. An empty list means clean.
pub fn blacklist_integrity_check(dir: &Path) -> Result<Vec<String>, CheckError> {
    let report = BlacklistChecker::default().check_dir(dir)?;
    Ok(report.messages())
}
