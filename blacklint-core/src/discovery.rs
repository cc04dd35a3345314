//! Rule file discovery.
//!
//! Lists the rule files of a corpus directory and tags each one with its
//! category and content kind. This is the only place where file names are
//! inspected; later stages dispatch on the tags.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::ScanConfig;
use crate::errors::CheckError;

/// The three families of rule files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    /// One pattern per line.
    Bad,
    /// One pattern per line.
    Blacklisted,
    /// Tab-separated triples; the third field is the pattern.
    Watched,
}

impl RuleCategory {
    /// All categories in discovery order.
    pub const ALL: [RuleCategory; 3] = [RuleCategory::Bad, RuleCategory::Blacklisted, RuleCategory::Watched];

    /// The file name prefix configured for this category.
    pub fn prefix<'a>(&self, config: &'a ScanConfig) -> &'a str {
        match self {
            RuleCategory::Bad => &config.bad_prefix,
            RuleCategory::Blacklisted => &config.blacklisted_prefix,
            RuleCategory::Watched => &config.watched_prefix,
        }
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            RuleCategory::Bad => "bad",
            RuleCategory::Blacklisted => "blacklisted",
            RuleCategory::Watched => "watched",
        };
        f.write_str(name)
    }
}

/// Whether a file's entries are patterns or plain numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleContent {
    /// Entries are compiled as patterns.
    Patterns,
    /// Entries are numeric blacklists and are never compiled.
    Numbers,
}

/// One discovered rule file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleFile {
    pub path: PathBuf,
    /// Name used in reports, relative to the scanned directory.
    pub display_name: String,
    pub category: RuleCategory,
    pub content: RuleContent,
}

impl RuleFile {
    /// Builds a `RuleFile`, deriving the content kind from the file name.
    pub fn new(path: PathBuf, display_name: String, category: RuleCategory, config: &ScanConfig) -> Self {
        let content = if display_name.contains(config.numbers_marker.as_str()) {
            RuleContent::Numbers
        } else {
            RuleContent::Patterns
        };
        Self { path, display_name, category, content }
    }

    pub fn validates_patterns(&self) -> bool {
        self.content == RuleContent::Patterns
    }
}

/// Lists the rule files under `dir` in deterministic order.
///
/// All `bad_` files come first, then `blacklisted_`, then `watched_`; within a
/// category files are sorted lexically. Directories are skipped and no path is
/// returned twice. No file is opened.
pub fn discover_rule_files(dir: &Path, config: &ScanConfig) -> Result<Vec<RuleFile>, CheckError> {
    let escaped_dir = glob::Pattern::escape(&dir.to_string_lossy());
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut files = Vec::new();

    for category in RuleCategory::ALL {
        let file_pattern = format!(
            "{}*.{}",
            glob::Pattern::escape(category.prefix(config)),
            glob::Pattern::escape(&config.extension)
        );
        let pattern = Path::new(&escaped_dir).join(file_pattern);
        let pattern = pattern.to_string_lossy();
        debug!("Discovering {} rule files with pattern '{}'", category, pattern);

        let mut paths = Vec::new();
        for entry in glob::glob(&pattern)? {
            let path = entry?;
            if path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        for path in paths {
            if !seen.insert(path.clone()) {
                continue;
            }
            let display_name = path
                .strip_prefix(dir)
                .unwrap_or(&path)
                .to_string_lossy()
                .into_owned();
            files.push(RuleFile::new(path, display_name, category, config));
        }
    }

    debug!("Discovered {} rule files in {}", files.len(), dir.display());
    Ok(files)
}
