//! Duplicate entry tracking across a whole corpus scan.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Where an entry was seen: report name of the file and 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub file: String,
    pub line: usize,
}

impl Location {
    pub fn new(file: impl Into<String>, line: usize) -> Self {
        Self { file: file.into(), line }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Append-only map from normalized entry text to its first location.
///
/// Keys are compared byte for byte. One index lives for exactly one scan.
#[derive(Debug, Default)]
pub struct SeenIndex {
    first_seen: HashMap<String, Location>,
}

impl SeenIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `entry` at `location`, or returns where it was first seen.
    pub fn observe(&mut self, entry: &str, location: Location) -> Option<&Location> {
        if self.first_seen.contains_key(entry) {
            return self.first_seen.get(entry);
        }
        self.first_seen.insert(entry.to_string(), location);
        None
    }

    pub fn len(&self) -> usize {
        self.first_seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first_seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_occurrence_wins() {
        let mut index = SeenIndex::new();
        assert!(index.observe("foo", Location::new("bad_a.txt", 1)).is_none());
        assert!(index.observe("bar", Location::new("bad_a.txt", 2)).is_none());

        let first = index.observe("foo", Location::new("bad_b.txt", 7)).cloned();
        assert_eq!(first, Some(Location::new("bad_a.txt", 1)));

        // The later sighting does not replace the original.
        let again = index.observe("foo", Location::new("bad_c.txt", 3)).cloned();
        assert_eq!(again, Some(Location::new("bad_a.txt", 1)));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn keys_are_byte_exact() {
        let mut index = SeenIndex::new();
        assert!(index.observe("foo", Location::new("f", 1)).is_none());
        assert!(index.observe("foo\r", Location::new("f", 2)).is_none());
        assert!(index.observe("Foo", Location::new("f", 3)).is_none());
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn location_display() {
        assert_eq!(Location::new("watched_keywords.txt", 12).to_string(), "watched_keywords.txt:12");
    }
}
