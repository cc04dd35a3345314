// blacklint-core/tests/integrity_check_tests.rs
//! Integration tests for the blacklist integrity checker.
//!
//! Each test lays out a small corpus in a temporary directory and runs a full
//! scan over it, asserting on the exact defect list the CI gate would print.

use anyhow::Result;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};
use test_log::test;

use blacklint_core::{
    blacklist_integrity_check, discover_rule_files, strip_pattern_comments, BlacklistChecker, CheckError,
    Location, ScanConfig, ValidationErrorKind,
};

/// Creates a corpus directory holding the given `(file name, content)` pairs.
fn corpus(files: &[(&str, &str)]) -> Result<TempDir> {
    let dir = tempdir()?;
    for (name, content) in files {
        fs::write(dir.path().join(name), content)?;
    }
    Ok(dir)
}

fn kinds_for_line(dir: &Path, file: &str, line: usize) -> Result<Vec<ValidationErrorKind>> {
    let report = BlacklistChecker::default().check_dir(dir)?;
    Ok(report
        .errors
        .into_iter()
        .filter(|e| e.file == file && e.line == line)
        .map(|e| e.kind)
        .collect())
}

#[test]
fn clean_corpus_produces_no_errors() -> Result<()> {
    let dir = corpus(&[
        ("bad_keywords.txt", "cheap\\W?pills\n(?i)viagra(?#common)\n"),
        ("blacklisted_websites.txt", "example\\.com\n\\p{Han}{4,}\\.xyz\n"),
        ("blacklisted_numbers.txt", "+1 800 555 0100\n"),
        ("watched_keywords.txt", "1500000000\tuser\tsuspicious\\s+phrase\n"),
    ])?;
    assert!(blacklist_integrity_check(dir.path())?.is_empty());
    Ok(())
}

#[test]
fn dos_line_endings_are_reported_once_per_line() -> Result<()> {
    let dir = corpus(&[("bad_dos.txt", "one\r\ntwo\r\n\r\n")])?;
    let errors = blacklist_integrity_check(dir.path())?;
    assert_eq!(
        errors,
        vec![
            "bad_dos.txt:1:DOS line ending",
            "bad_dos.txt:2:DOS line ending",
            "bad_dos.txt:3:DOS line ending",
        ]
    );
    Ok(())
}

#[test]
fn missing_final_newline_is_reported() -> Result<()> {
    let dir = corpus(&[("blacklisted_usernames.txt", "alice\nbob")])?;
    assert_eq!(
        kinds_for_line(dir.path(), "blacklisted_usernames.txt", 2)?,
        vec![ValidationErrorKind::MissingNewline]
    );
    Ok(())
}

#[test]
fn blank_lines_are_reported() -> Result<()> {
    let dir = corpus(&[("bad_keywords.txt", "foo\n\nbar\n")])?;
    assert_eq!(blacklist_integrity_check(dir.path())?, vec!["bad_keywords.txt:2:Empty line"]);
    Ok(())
}

#[test]
fn duplicates_across_files_reference_first_occurrence() -> Result<()> {
    let dir = corpus(&[
        ("bad_keywords.txt", "spam\nham\n"),
        ("blacklisted_websites.txt", "eggs\nspam(?#again)\n"),
        ("watched_keywords.txt", "t\tu\tham\n"),
    ])?;
    let report = BlacklistChecker::default().check_dir(dir.path())?;
    let duplicates: Vec<_> = report
        .errors
        .iter()
        .filter_map(|e| match &e.kind {
            ValidationErrorKind::DuplicateEntry { entry, first } => Some((e.location(), entry.clone(), first.clone())),
            _ => None,
        })
        .collect();

    assert_eq!(
        duplicates,
        vec![
            (
                Location::new("blacklisted_websites.txt", 2),
                "spam".to_string(),
                Location::new("bad_keywords.txt", 1)
            ),
            (
                Location::new("watched_keywords.txt", 1),
                "ham".to_string(),
                Location::new("bad_keywords.txt", 2)
            ),
        ]
    );
    assert_eq!(report.errors.len(), 2);
    Ok(())
}

#[test]
fn trailing_comments_do_not_hide_duplicates() -> Result<()> {
    let dir = corpus(&[("bad_keywords.txt", "foo(?#first note)\nfoo(?#second note)\n")])?;
    assert_eq!(
        blacklist_integrity_check(dir.path())?,
        vec!["bad_keywords.txt:2:Duplicate entry foo (also bad_keywords.txt:1)"]
    );
    Ok(())
}

#[test]
fn escaped_comment_opener_is_part_of_the_entry() -> Result<()> {
    let dir = corpus(&[("bad_keywords.txt", "foo\\(?#x\\)\nfoo\n")])?;
    // The escaped opener is pattern text, so the entry differs from "foo".
    assert!(blacklist_integrity_check(dir.path())?.is_empty());
    Ok(())
}

#[test]
fn extended_dialect_patterns_are_clean() -> Result<()> {
    let dir = corpus(&[
        ("bad_keywords.txt", "(?<=a+)b\n(?<!\\w{1,3})x\n(?|red|green)\n"),
        ("blacklisted_websites.txt", "\\w{1,500}\\.com\n(?:\\w+\\W+){1,200}\n[(?#)]\n"),
    ])?;
    let errors = blacklist_integrity_check(dir.path())?;
    assert!(errors.is_empty(), "{:?}", errors);
    Ok(())
}

#[test]
fn compile_failures_are_reported_and_scan_continues() -> Result<()> {
    let dir = corpus(&[("blacklisted_y.txt", "foo(bar\n[abc\nfine\n")])?;
    let errors = blacklist_integrity_check(dir.path())?;
    assert_eq!(errors.len(), 2, "{:?}", errors);
    assert!(errors[0].starts_with("blacklisted_y.txt:1:Bad regex: "));
    assert!(errors[1].starts_with("blacklisted_y.txt:2:Bad regex: "));
    Ok(())
}

#[test]
fn numbers_files_never_report_compile_failures() -> Result<()> {
    let dir = corpus(&[
        ("blacklisted_numbers.txt", "(555\n"),
        ("watched_numbers.txt", "a\tb\t(555) 123\n"),
    ])?;
    let report = BlacklistChecker::default().check_dir(dir.path())?;
    assert!(report.errors.iter().all(|e| !matches!(e.kind, ValidationErrorKind::RegexCompileFailure { .. })));
    assert!(report.is_clean());
    Ok(())
}

#[test]
fn compile_check_and_dedupe_still_run_on_bad_terminators() -> Result<()> {
    let dir = corpus(&[("bad_keywords.txt", "dup\ndup(")])?;
    let kinds = kinds_for_line(dir.path(), "bad_keywords.txt", 2)?;
    assert_eq!(kinds.len(), 2);
    assert_eq!(kinds[0], ValidationErrorKind::MissingNewline);
    assert!(matches!(kinds[1], ValidationErrorKind::RegexCompileFailure { .. }));
    Ok(())
}

#[test]
fn errors_follow_discovery_then_line_order() -> Result<()> {
    let dir = corpus(&[
        ("watched_keywords.txt", "\n"),
        ("blacklisted_b.txt", "\n"),
        ("bad_z.txt", "x\n\n"),
        ("bad_a.txt", "\n"),
    ])?;
    let errors = blacklist_integrity_check(dir.path())?;
    assert_eq!(errors[0], "bad_a.txt:1:Empty line");
    // Later blank lines are also duplicates of the first one; keep only the line-ending defects.
    let order: Vec<&str> = errors
        .iter()
        .filter(|e| e.ends_with(":Empty line"))
        .map(|e| e.as_str())
        .collect();
    assert_eq!(
        order,
        vec![
            "bad_a.txt:1:Empty line",
            "bad_z.txt:2:Empty line",
            "blacklisted_b.txt:1:Empty line",
            "watched_keywords.txt:1:Empty line",
        ]
    );
    Ok(())
}

#[test]
fn repeated_scans_are_identical() -> Result<()> {
    let dir = corpus(&[
        ("bad_keywords.txt", "a\na\nb(\n"),
        ("watched_keywords.txt", "x\ty\ta\nshort\n"),
    ])?;
    let checker = BlacklistChecker::default();
    let first = checker.check_dir(dir.path())?;
    let second = checker.check_dir(dir.path())?;
    assert_eq!(first, second);
    assert_eq!(first.errors.len(), 4);
    Ok(())
}

#[test]
fn unreadable_file_is_fatal() -> Result<()> {
    let dir = corpus(&[("bad_keywords.txt", "ok\n")])?;
    let config = ScanConfig::default();
    let files = discover_rule_files(dir.path(), &config)?;
    fs::remove_file(dir.path().join("bad_keywords.txt"))?;

    let err = BlacklistChecker::new(config).check_files(&files).unwrap_err();
    assert!(matches!(err, CheckError::Io { .. }), "{:?}", err);
    Ok(())
}

#[test]
fn invalid_utf8_is_fatal() -> Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("bad_binary.txt"), [0x66u8, 0xff, 0xfe, b'\n'])?;
    let err = blacklist_integrity_check(dir.path()).unwrap_err();
    assert!(err.to_string().contains("bad_binary.txt"));
    Ok(())
}

#[test]
fn custom_conventions_from_yaml() -> Result<()> {
    let config = ScanConfig::from_yaml("extension: lst\nnumbers_marker: phones\n")?;
    let dir = corpus(&[
        ("bad_words.lst", "x(\n"),
        ("blacklisted_phones.lst", "(555\n"),
        ("bad_ignored.txt", "((\n"),
    ])?;
    let report = BlacklistChecker::new(config).check_dir(dir.path())?;
    assert_eq!(report.files_scanned, 2);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].file, "bad_words.lst");
    Ok(())
}

#[test]
fn stripped_entries_are_stable() {
    for line in ["foo(?#a)bar", "x\\(?#y)", "(?#only)", "a(?#b)(?#c)d"] {
        let once = strip_pattern_comments(line).into_owned();
        assert_eq!(strip_pattern_comments(&once), once.as_str());
    }
}
