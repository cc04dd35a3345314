//! Line classification for rule files.
//!
//! A raw line (terminator included) is checked for line-ending defects and
//! turned into the candidate rule text that later stages compile and
//! deduplicate. Terminator defects do not suppress the candidate.

use crate::discovery::RuleCategory;

/// Line-ending defects. At most one is reported per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminatorDefect {
    DosLineEnding,
    MissingNewline,
    EmptyLine,
}

/// Outcome of classifying one raw line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine<'a> {
    pub terminator: Option<TerminatorDefect>,
    /// The effective rule text. `None` only for malformed watched lines.
    pub candidate: Option<&'a str>,
    /// Field count of a watched line that has fewer than three fields.
    pub malformed_fields: Option<usize>,
}

/// Index of the pattern field in a watched triple.
const WATCHED_PATTERN_FIELD: usize = 2;

/// Classifies `raw` according to its terminator and extracts the rule text.
///
/// Checks run in priority order: `\r\n` ending, missing `\n`, bare `\n`.
/// Exactly one trailing `\n` is removed from the candidate, so a DOS line keeps
/// its `\r`. Watched lines with content are split on tabs and the third field
/// becomes the candidate.
pub fn classify_line(raw: &str, category: RuleCategory) -> ClassifiedLine<'_> {
    let terminator = if raw.ends_with("\r\n") {
        Some(TerminatorDefect::DosLineEnding)
    } else if !raw.ends_with('\n') {
        Some(TerminatorDefect::MissingNewline)
    } else if raw == "\n" {
        Some(TerminatorDefect::EmptyLine)
    } else {
        None
    };

    let content = raw.strip_suffix('\n').unwrap_or(raw);

    if category != RuleCategory::Watched || content.is_empty() {
        return ClassifiedLine { terminator, candidate: Some(content), malformed_fields: None };
    }

    match content.split('\t').nth(WATCHED_PATTERN_FIELD) {
        Some(field) => ClassifiedLine { terminator, candidate: Some(field), malformed_fields: None },
        None => ClassifiedLine {
            terminator,
            candidate: None,
            malformed_fields: Some(content.split('\t').count()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_line_strips_newline() {
        let line = classify_line("foo\n", RuleCategory::Bad);
        assert_eq!(line.terminator, None);
        assert_eq!(line.candidate, Some("foo"));
    }

    #[test]
    fn dos_ending_takes_priority_and_keeps_carriage_return() {
        let line = classify_line("foo\r\n", RuleCategory::Blacklisted);
        assert_eq!(line.terminator, Some(TerminatorDefect::DosLineEnding));
        assert_eq!(line.candidate, Some("foo\r"));

        // A bare "\r\n" is a DOS ending, not an empty line.
        let line = classify_line("\r\n", RuleCategory::Bad);
        assert_eq!(line.terminator, Some(TerminatorDefect::DosLineEnding));
    }

    #[test]
    fn missing_newline_on_last_line() {
        let line = classify_line("foo", RuleCategory::Bad);
        assert_eq!(line.terminator, Some(TerminatorDefect::MissingNewline));
        assert_eq!(line.candidate, Some("foo"));
    }

    #[test]
    fn empty_line() {
        let line = classify_line("\n", RuleCategory::Bad);
        assert_eq!(line.terminator, Some(TerminatorDefect::EmptyLine));
        assert_eq!(line.candidate, Some(""));

        let line = classify_line("\n", RuleCategory::Watched);
        assert_eq!(line.terminator, Some(TerminatorDefect::EmptyLine));
        assert_eq!(line.malformed_fields, None);
    }

    #[test]
    fn watched_line_uses_third_field() {
        let line = classify_line("metaA\tmetaB\tbadword\n", RuleCategory::Watched);
        assert_eq!(line.terminator, None);
        assert_eq!(line.candidate, Some("badword"));

        let line = classify_line("1500000000\tuser\tbadword\textra\n", RuleCategory::Watched);
        assert_eq!(line.candidate, Some("badword"));
    }

    #[test]
    fn short_watched_line_is_malformed() {
        let line = classify_line("metaA\tbadword\n", RuleCategory::Watched);
        assert_eq!(line.candidate, None);
        assert_eq!(line.malformed_fields, Some(2));
    }

    #[test]
    fn tabs_are_not_split_outside_watched_files() {
        let line = classify_line("a\tb\n", RuleCategory::Bad);
        assert_eq!(line.candidate, Some("a\tb"));
    }
}
