//! Known non-plate words (sponsor banners, venue names, slogans).
//!
//! Entries are compared case-insensitively against whole trimmed lines.

use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Denylist {
    words: HashSet<String>,
}

impl Denylist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry. Blank entries are ignored.
    pub fn insert(&mut self, word: &str) -> bool {
        let key = canonical(word);
        if key.is_empty() {
            return false;
        }
        self.words.insert(key)
    }

    /// Whole-line, case-insensitive membership. Substrings never match.
    pub fn contains(&self, line: &str) -> bool {
        !self.words.is_empty() && self.words.contains(&canonical(line))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Entries in sorted order.
    pub fn words(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.words.iter().map(String::as_str).collect();
        words.sort_unstable();
        words
    }

    /// Merge another list into this one.
    pub fn extend_from(&mut self, other: &Denylist) {
        self.words.extend(other.words.iter().cloned());
    }
}

impl<S: AsRef<str>> FromIterator<S> for Denylist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = Self::new();
        for word in iter {
            list.insert(word.as_ref());
        }
        list
    }
}

fn canonical(word: &str) -> String {
    word.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_case_insensitively() {
        let list: Denylist = ["Winnipeg", " jets "].into_iter().collect();
        assert!(list.contains("WINNIPEG"));
        assert!(list.contains("winnipeg"));
        assert!(list.contains("JETS"));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn never_matches_substrings() {
        let list: Denylist = ["WINNIPEG"].into_iter().collect();
        assert!(!list.contains("WINNIPEG JETS"));
        assert!(!list.contains("WINNI"));
    }

    #[test]
    fn ignores_blank_entries() {
        let list: Denylist = ["", "   "].into_iter().collect();
        assert!(list.is_empty());
        assert!(!list.contains(""));
    }
}
