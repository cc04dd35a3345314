//! Classifies a set of changed files as hot-reloadable or not.
//!
//! A deployment that only touches blacklist files can be picked up by
//! reloading the lists; anything else needs a restart.

use std::collections::HashSet;

use crate::config::ScanConfig;

/// Returns true when every whitespace-separated name in `diff` is in `allowed`.
///
/// The empty name is always allowed, so an empty diff qualifies.
pub fn only_files_changed<S: AsRef<str>>(diff: &str, allowed: &[S]) -> bool {
    let allowed: HashSet<&str> = allowed.iter().map(|s| s.as_ref()).collect();
    diff.split_whitespace().all(|name| name.is_empty() || allowed.contains(name))
}

/// True when only reload-safe blacklist files changed.
pub fn only_blacklists_changed(diff: &str, config: &ScanConfig) -> bool {
    only_files_changed(diff, &config.reload_safe_files)
}

/// True when only reload-safe blacklist files or modules changed.
pub fn only_module_changed(diff: &str, config: &ScanConfig) -> bool {
    let allowed: Vec<&str> = config
        .reload_safe_files
        .iter()
        .chain(&config.reload_safe_modules)
        .map(String::as_str)
        .collect();
    only_files_changed(diff, &allowed)
}
