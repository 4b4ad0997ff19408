//! Morse code table: load, freeze, binary-search lookup
//!
//! Keys are base-10 digit strings of 1 (dot) and 2 (dash), most significant
//! digit first, exactly as produced by
//! [`PulseSequence::value`](crate::pulses::PulseSequence::value). The table
//! is load-then-freeze: all entries go in first, `freeze` sorts them once,
//! and only a frozen table answers lookups.

use crate::types::StoreError;
use heapless::Vec;

/// One code-table entry
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CodeEntry {
    pub key: u32,
    pub value: char,
}

/// Sorted key-to-character map with binary-search lookup
#[derive(Debug, Default)]
pub struct CodeTable<const N: usize> {
    entries: Vec<CodeEntry, N>,
    frozen: bool,
}

impl<const N: usize> CodeTable<N> {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            frozen: false,
        }
    }

    /// Add one entry. Rejected with `CapacityExceeded` when the table is
    /// full and with `Frozen` after `freeze` has run.
    pub fn load(&mut self, key: u32, value: char) -> Result<(), StoreError> {
        if self.frozen {
            return Err(StoreError::Frozen);
        }
        self.entries
            .push(CodeEntry { key, value })
            .map_err(|_| StoreError::CapacityExceeded)
    }

    /// Sort entries ascending by key and seal the table.
    ///
    /// Must be called exactly once, after the last `load` and before the
    /// first `lookup`. Keys are unique by contract, so an unstable sort
    /// is sufficient; with duplicate keys, which entry a lookup returns
    /// is unspecified.
    pub fn freeze(&mut self) -> Result<(), StoreError> {
        if self.frozen {
            return Err(StoreError::AlreadyFrozen);
        }
        self.entries.sort_unstable_by_key(|e| e.key);
        self.frozen = true;
        Ok(())
    }

    /// Binary search over the frozen ordering.
    ///
    /// A miss is a value, not a fault; reporting it is the caller's job.
    /// An unfrozen table answers every lookup with a miss.
    pub fn lookup(&self, key: u32) -> Option<char> {
        if !self.frozen {
            return None;
        }
        self.entries
            .binary_search_by_key(&key, |e| e.key)
            .ok()
            .map(|i| self.entries[i].value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Reset to the empty, unfrozen state (pre-load step only)
    pub fn clear(&mut self) {
        self.entries.clear();
        self.frozen = false;
    }
}
