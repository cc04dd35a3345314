//! The `reload-check` command.

use anyhow::{Context, Result};
use log::debug;
use std::io::Read;

use blacklint_core::{only_blacklists_changed, only_module_changed, ScanConfig};

use crate::cli::ReloadCheckCommand;

/// What a deployment of the changed files requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadDecision {
    Reload,
    Restart,
}

impl ReloadDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReloadDecision::Reload => "reload",
            ReloadDecision::Restart => "restart",
        }
    }
}

/// Classifies the whitespace-separated file list read from `input`.
pub fn run_reload_check<R: Read>(cmd: &ReloadCheckCommand, config: &ScanConfig, input: R) -> Result<ReloadDecision> {
    let mut diff = String::new();
    match &cmd.input_file {
        Some(path) => {
            diff = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read changed file list {}", path.display()))?;
        }
        None => {
            let mut input = input;
            input.read_to_string(&mut diff).context("Failed to read changed file list from stdin")?;
        }
    }
    debug!("Classifying changed files: {:?}", diff.split_whitespace().collect::<Vec<_>>());

    let reloadable = if cmd.modules {
        only_module_changed(&diff, config)
    } else {
        only_blacklists_changed(&diff, config)
    };
    Ok(if reloadable { ReloadDecision::Reload } else { ReloadDecision::Restart })
}
