//! Short-code table: two-letter shorthand tokens expanding to phrases
//!
//! Keys are normalized to upper-case on load and on query; matching is
//! exact, never prefix-based.

use crate::types::{StoreError, MAX_SHORT_TEXT};
use heapless::{String, Vec};

/// One short-code entry
#[derive(Clone, Debug)]
pub struct ShortcodeEntry {
    key: [u8; 2],
    phrase: String<MAX_SHORT_TEXT>,
}

impl ShortcodeEntry {
    pub fn key(&self) -> &str {
        // Keys are validated ASCII from `load`
        core::str::from_utf8(&self.key).unwrap_or("??")
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }
}

/// What `load` did with the record's phrase field
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Loaded {
    /// Phrase did not fit its bound and was cut short
    pub truncated: bool,
}

/// Exact-match key-to-phrase map
#[derive(Debug, Default)]
pub struct ShortcodeTable<const N: usize> {
    entries: Vec<ShortcodeEntry, N>,
}

impl<const N: usize> ShortcodeTable<N> {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add one entry. The key is upper-cased; an over-long phrase is
    /// truncated at the table bound, and the caller is told so it can
    /// report it.
    pub fn load(&mut self, key: [u8; 2], phrase: &str) -> Result<Loaded, StoreError> {
        if self.entries.is_full() {
            return Err(StoreError::CapacityExceeded);
        }

        let key = [key[0].to_ascii_uppercase(), key[1].to_ascii_uppercase()];

        let mut truncated = false;
        let mut stored: String<MAX_SHORT_TEXT> = String::new();
        for c in phrase.chars() {
            if stored.push(c).is_err() {
                truncated = true;
                break;
            }
        }

        // is_full was checked above
        let _ = self.entries.push(ShortcodeEntry { key, phrase: stored });
        Ok(Loaded { truncated })
    }

    /// Exact-match lookup after normalizing the query to upper-case
    pub fn lookup(&self, token: &str) -> Option<&str> {
        let tb = token.as_bytes();
        if tb.len() != 2 {
            return None;
        }
        let query = [tb[0].to_ascii_uppercase(), tb[1].to_ascii_uppercase()];
        self.entries
            .iter()
            .find(|e| e.key == query)
            .map(|e| e.phrase.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShortcodeEntry> {
        self.entries.iter()
    }
}
