//! Message history: the completed words of the message being assembled

use crate::types::{StoreError, MESSAGE_TEXT};
use heapless::{String, Vec};

/// Bounded ordered list of completed words and short-code expansions
#[derive(Debug, Default)]
pub struct MessageHistory<const N: usize> {
    entries: Vec<String<MESSAGE_TEXT>, N>,
}

impl<const N: usize> MessageHistory<N> {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an owned copy of `word`. A full history refuses the push
    /// and leaves existing entries untouched.
    pub fn push(&mut self, word: &str) -> Result<(), StoreError> {
        if self.entries.is_full() {
            return Err(StoreError::CapacityExceeded);
        }
        let mut entry: String<MESSAGE_TEXT> = String::new();
        entry
            .push_str(word)
            .map_err(|_| StoreError::CapacityExceeded)?;
        // is_full was checked above
        let _ = self.entries.push(entry);
        Ok(())
    }

    /// Remove and return the most recent entry
    pub fn pop(&mut self) -> Option<String<MESSAGE_TEXT>> {
        self.entries.pop()
    }

    /// Indexed retrieval; out of range is a miss, never a clamp
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|s| s.as_str())
    }

    /// Join all entries with single spaces into `out`, for the speech
    /// collaborator. Nothing is written when the message does not fit.
    pub fn assemble<const M: usize>(&self, out: &mut String<M>) -> Result<(), StoreError> {
        let needed: usize =
            self.entries.iter().map(|e| e.len() + 1).sum::<usize>().saturating_sub(1);
        if needed > M {
            return Err(StoreError::CapacityExceeded);
        }
        out.clear();
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                let _ = out.push(' ');
            }
            let _ = out.push_str(entry);
        }
        Ok(())
    }
}
