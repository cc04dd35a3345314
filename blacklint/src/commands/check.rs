//! The `check` command: the CI gate over a rule corpus.

use anyhow::{Context, Result};
use log::{debug, info};
use std::io::Write;

use blacklint_core::{BlacklistChecker, IntegrityReport, ScanConfig};

use crate::cli::CheckCommand;
use crate::output;

/// Options for [`run_check`] that do not come from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckOptions {
    /// Suppress the stderr summary (set by `--quiet`).
    pub quiet: bool,
    /// Whether the status writer understands ANSI colors.
    pub color: bool,
}

/// Runs a scan and writes the defects to `out` and a summary to `status`.
///
/// Returns the report; the caller decides the exit code from it.
pub fn run_check<O: Write, S: Write>(
    cmd: &CheckCommand,
    config: ScanConfig,
    opts: CheckOptions,
    out: &mut O,
    status: &mut S,
) -> Result<IntegrityReport> {
    info!("Checking rule corpus in {}", cmd.dir.display());
    let checker = BlacklistChecker::new(config);
    let report = checker
        .check_dir(&cmd.dir)
        .with_context(|| format!("Failed to check rule files in {}", cmd.dir.display()))?;

    if cmd.json {
        serde_json::to_writer_pretty(&mut *out, &report.errors).context("Failed to write JSON report")?;
        writeln!(out)?;
    } else {
        for error in &report.errors {
            writeln!(out, "{}", error)?;
        }
    }
    out.flush()?;
    debug!("Wrote {} defect(s).", report.errors.len());

    if !cmd.no_summary && !opts.quiet {
        write_summary(cmd, &report, opts.color, status)?;
    }
    Ok(report)
}

fn write_summary<S: Write>(cmd: &CheckCommand, report: &IntegrityReport, color: bool, status: &mut S) -> Result<()> {
    if report.files_scanned == 0 {
        output::print_warn_message(
            status,
            &format!("no rule files found in {}.", cmd.dir.display()),
            color,
        )?;
    }
    if report.is_clean() {
        output::print_success_message(
            status,
            &format!(
                "{} rule file(s), {} line(s) checked; no problems found.",
                report.files_scanned, report.lines_scanned
            ),
            color,
        )?;
    } else {
        output::print_error_message(
            status,
            &format!(
                "{} problem(s) found in {} rule file(s).",
                report.errors.len(),
                report.files_scanned
            ),
            color,
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn command(dir: PathBuf, json: bool) -> CheckCommand {
        CheckCommand { dir, json, no_summary: false }
    }

    #[test]
    fn writes_one_line_per_defect() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("bad_keywords.txt"), "a\na\n").unwrap();

        let mut out = Vec::new();
        let mut status = Vec::new();
        let report = run_check(
            &command(dir.path().to_path_buf(), false),
            ScanConfig::default(),
            CheckOptions::default(),
            &mut out,
            &mut status,
        )
        .unwrap();

        assert!(!report.is_clean());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "bad_keywords.txt:2:Duplicate entry a (also bad_keywords.txt:1)\n"
        );
        assert_eq!(String::from_utf8(status).unwrap(), "error: 1 problem(s) found in 1 rule file(s).\n");
    }

    #[test]
    fn warns_when_no_rule_files_exist() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "not a rule file\n").unwrap();

        let mut out = Vec::new();
        let mut status = Vec::new();
        let report = run_check(
            &command(dir.path().to_path_buf(), false),
            ScanConfig::default(),
            CheckOptions::default(),
            &mut out,
            &mut status,
        )
        .unwrap();

        assert!(report.is_clean());
        let status = String::from_utf8(status).unwrap();
        let mut lines = status.lines();
        assert_eq!(lines.next(), Some(format!("warning: no rule files found in {}.", dir.path().display()).as_str()));
        assert_eq!(lines.next(), Some("ok: 0 rule file(s), 0 line(s) checked; no problems found."));
    }

    #[test]
    fn json_output_is_an_array() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("bad_keywords.txt"), "ok\n").unwrap();

        let mut out = Vec::new();
        let mut status = Vec::new();
        run_check(
            &command(dir.path().to_path_buf(), true),
            ScanConfig::default(),
            CheckOptions { quiet: true, color: false },
            &mut out,
            &mut status,
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value, serde_json::json!([]));
        assert!(status.is_empty());
    }
}
