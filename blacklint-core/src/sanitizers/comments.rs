//! comments.rs - Removal of inline `(?#...)` comment groups.
//!
//! Blacklist authors annotate patterns with comment groups. Two entries that
//! differ only in their comments are the same rule, so the duplicate tracker
//! keys on the comment-free text produced here.
//!
//! License: MIT OR APACHE 2.0

use std::borrow::Cow;

const COMMENT_OPENER: &[u8] = b"(?#";

/// Removes every `(?#...)` group from `text`.
///
/// A group opens at `(?#` when preceded by an even number of backslashes
/// (an escaped `\(` is a literal parenthesis) and closes at the first `)`.
/// An unterminated opener is left untouched. Removal repeats until nothing
/// changes, so the result is a fixed point and stripping is idempotent.
pub fn strip_pattern_comments(text: &str) -> Cow<'_, str> {
    let mut current = match strip_once(text) {
        Some(stripped) => stripped,
        None => return Cow::Borrowed(text),
    };
    while let Some(stripped) = strip_once(&current) {
        current = stripped;
    }
    Cow::Owned(current)
}

/// One left-to-right removal pass. Returns `None` when no group was found.
fn strip_once(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let mut out: Option<String> = None;
    let mut copied_up_to = 0;
    let mut backslashes = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'\\' {
            backslashes += 1;
            i += 1;
            continue;
        }

        if backslashes % 2 == 0 && bytes[i..].starts_with(COMMENT_OPENER) {
            let body_start = i + COMMENT_OPENER.len();
            if let Some(close) = bytes[body_start..].iter().position(|&b| b == b')') {
                let end = body_start + close + 1;
                let buf = out.get_or_insert_with(|| String::with_capacity(text.len()));
                buf.push_str(&text[copied_up_to..i]);
                copied_up_to = end;
                i = end;
                backslashes = 0;
                continue;
            }
        }

        backslashes = 0;
        i += 1;
    }

    out.map(|mut buf| {
        buf.push_str(&text[copied_up_to..]);
        buf
    })
}
