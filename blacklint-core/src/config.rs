//! Configuration management for `blacklint-core`.
//!
//! This module defines [`ScanConfig`], which carries the file naming conventions
//! of a blacklist corpus, the compile limits handed to the pattern engine, and
//! the file lists used for hot-reload classification. Configurations are
//! plain YAML and every field has a default, so an empty file is valid.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::CheckError;

/// Default compiled-program size limit handed to the regex builder (1 GiB).
///
/// Long bounded repetitions over Unicode classes such as `\w{1,500}` compile
/// to tens of megabytes, so the limit only stops runaway nesting.
pub const DEFAULT_SIZE_LIMIT: usize = 1 << 30;

/// Default backtracking budget for patterns that need the backtracking VM.
pub const DEFAULT_BACKTRACK_LIMIT: usize = 1_000_000;

/// Naming conventions and limits for one corpus scan.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File name prefix of "bad" pattern files (e.g. `bad_keywords.txt`).
    pub bad_prefix: String,
    /// File name prefix of "blacklisted" pattern files.
    pub blacklisted_prefix: String,
    /// File name prefix of "watched" keyword triple files.
    pub watched_prefix: String,
    /// Extension shared by all rule files, without the leading dot.
    pub extension: String,
    /// Substring marking a file as a plain numbers list. Such files are not
    /// compiled as patterns.
    pub numbers_marker: String,
    pub size_limit: usize,
    pub backtrack_limit: usize,
    /// File names whose change can be picked up without a restart.
    pub reload_safe_files: Vec<String>,
    /// Module names that may additionally be hot-reloaded.
    pub reload_safe_modules: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            bad_prefix: "bad_".to_string(),
            blacklisted_prefix: "blacklisted_".to_string(),
            watched_prefix: "watched_".to_string(),
            extension: "txt".to_string(),
            numbers_marker: "numbers".to_string(),
            size_limit: DEFAULT_SIZE_LIMIT,
            backtrack_limit: DEFAULT_BACKTRACK_LIMIT,
            reload_safe_files: vec![
                "bad_keywords.txt".to_string(),
                "blacklisted_usernames.txt".to_string(),
                "blacklisted_websites.txt".to_string(),
                "watched_keywords.txt".to_string(),
            ],
            reload_safe_modules: vec!["findspam.py".to_string()],
        }
    }
}

impl ScanConfig {
    /// Loads a scan configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading scan configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml(&text)
            .with_context(|| format!("Failed to load config file {}", path.display()))?;
        debug!("Loaded scan configuration: {:?}", config);
        Ok(config)
    }

    /// Parses and validates a configuration from a YAML string.
    ///
    /// A document with no content (blank, only comments, or `null`) yields the
    /// defaults.
    pub fn from_yaml(text: &str) -> Result<Self> {
        if is_blank_document(text) {
            return Ok(Self::default());
        }
        let config: Option<ScanConfig> =
            serde_yml::from_str(text).context("Failed to parse scan configuration")?;
        let config = config.unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    /// Checks that the conventions can produce a usable discovery pattern.
    pub fn validate(&self) -> Result<(), CheckError> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("bad_prefix", &self.bad_prefix),
            ("blacklisted_prefix", &self.blacklisted_prefix),
            ("watched_prefix", &self.watched_prefix),
            ("extension", &self.extension),
            ("numbers_marker", &self.numbers_marker),
        ] {
            if value.is_empty() {
                errors.push(format!("`{}` must not be empty.", field));
            } else if value.contains(['/', '\\']) {
                errors.push(format!("`{}` must not contain a path separator.", field));
            }
        }

        if self.extension.starts_with('.') {
            errors.push("`extension` must be given without a leading dot.".to_string());
        }
        if self.size_limit == 0 {
            errors.push("`size_limit` must be greater than zero.".to_string());
        }
        if self.backtrack_limit == 0 {
            errors.push("`backtrack_limit` must be greater than zero.".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CheckError::Config(format!("validation failed:\n{}", errors.join("\n"))))
        }
    }
}

/// True when a YAML text holds nothing but whitespace, comments and document markers.
fn is_blank_document(text: &str) -> bool {
    text.lines().map(str::trim).all(|line| {
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}

/// Looks up an environment variable, treating an unset or non-unicode value as absent.
///
/// Allows `environ_or_none("KEY").unwrap_or_else(|| "default".into())` shorthand.
pub fn environ_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_yields_defaults() {
        let config = ScanConfig::from_yaml("").unwrap();
        assert_eq!(config, ScanConfig::default());
    }

    #[test]
    fn comment_only_yaml_yields_defaults() {
        for text in ["# nothing\n", "---\n# still nothing\n\n", "~\n", "null\n"] {
            let config = ScanConfig::from_yaml(text).unwrap();
            assert_eq!(config, ScanConfig::default(), "{:?}", text);
        }
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let config = ScanConfig::from_yaml("extension: lst\nnumbers_marker: digits\n").unwrap();
        assert_eq!(config.extension, "lst");
        assert_eq!(config.numbers_marker, "digits");
        assert_eq!(config.bad_prefix, "bad_");
        assert_eq!(config.size_limit, DEFAULT_SIZE_LIMIT);
    }

    #[test]
    fn validation_collects_every_problem() {
        let err = ScanConfig::from_yaml("bad_prefix: ''\nextension: .txt\nsize_limit: 0\n").unwrap_err();
        let message = format!("{:#}", err);
        assert!(matches!(err.downcast_ref::<CheckError>(), Some(CheckError::Config(_))));
        assert!(message.contains("`bad_prefix` must not be empty."));
        assert!(message.contains("leading dot"));
        assert!(message.contains("`size_limit` must be greater than zero."));
    }

    #[test]
    fn environ_or_none_reports_missing_keys() {
        assert_eq!(environ_or_none("BLACKLINT_SURELY_UNSET_VARIABLE_FOR_TESTS"), None);
    }
}
